//! Trick scoring with a rolling combo window.
//!
//! Repeating the same trick inside the window adds to the combo, any other
//! trick restarts it. `score` only ever holds the points of the latest trick.

use std::fmt;

use instant::Duration;

use crate::game::config::ComboConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trick {
    Ollie,
    Manual,
}

impl Trick {
    pub fn points(self, config: &ComboConfig) -> u32 {
        match self {
            Trick::Ollie => config.ollie_points,
            Trick::Manual => config.manual_points,
        }
    }
}

impl fmt::Display for Trick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trick::Ollie => f.write_str("Ollie"),
            Trick::Manual => f.write_str("Manual"),
        }
    }
}

/// Which strafe direction was pressed last, for manual detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreBoard {
    score: u32,
    combo: u32,
    last_trick: Option<(Trick, Duration)>,
    last_side: Option<(Side, Duration)>,
}

impl ScoreBoard {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn last_trick(&self) -> Option<Trick> {
        self.last_trick.map(|(trick, _)| trick)
    }

    /// Score `trick` landed at `now`.
    pub fn land(&mut self, trick: Trick, now: Duration, config: &ComboConfig) {
        let points = trick.points(config);
        let chained = matches!(
            self.last_trick,
            Some((last, at)) if last == trick && now.saturating_sub(at) < config.window
        );
        if chained {
            self.combo += points;
        } else {
            self.combo = points;
        }
        self.score = points;
        self.last_trick = Some((trick, now));
        log::info!("{}", self.label().unwrap_or_default());
    }

    /// Record a fresh strafe press and return `true` when it completes a
    /// manual, i.e. the opposite side was pressed less than the manual window ago.
    pub fn strafe(&mut self, side: Side, now: Duration, config: &ComboConfig) -> bool {
        let manual = matches!(
            self.last_side,
            Some((last, at)) if last != side && now.saturating_sub(at) < config.manual_window
        );
        if manual {
            self.land(Trick::Manual, now, config);
        }
        self.last_side = Some((side, now));
        manual
    }

    /// Drop the combo once the last trick is older than the window. Returns
    /// `true` on the tick the combo ends.
    pub fn expire(&mut self, now: Duration, config: &ComboConfig) -> bool {
        match self.last_trick {
            Some((_, at)) if now.saturating_sub(at) >= config.window => {
                self.combo = 0;
                self.last_trick = None;
                log::debug!("combo expired");
                true
            }
            _ => false,
        }
    }

    /// The text shown next to the board: latest trick and the running combo.
    pub fn label(&self) -> Option<String> {
        if self.combo == 0 {
            return None;
        }
        let combo = format!("Combo: {}", self.combo);
        Some(match self.last_trick() {
            Some(trick) => format!("{} (+{})\n{}", trick, self.score, combo),
            None => combo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::SkateConfig;

    const RULES: ComboConfig = SkateConfig::COMBO.combo;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn same_trick_inside_window_accumulates() {
        let mut board = ScoreBoard::default();
        board.land(Trick::Ollie, secs(0.0), &RULES);
        board.land(Trick::Ollie, secs(4.0), &RULES);
        assert_eq!(board.combo(), 200);
        assert_eq!(board.score(), 100);
    }

    #[test]
    fn other_trick_restarts_the_combo() {
        let mut board = ScoreBoard::default();
        board.land(Trick::Ollie, secs(0.0), &RULES);
        board.land(Trick::Ollie, secs(1.0), &RULES);
        board.land(Trick::Manual, secs(2.0), &RULES);
        assert_eq!(board.combo(), 50);
        assert_eq!(board.score(), 50);
        assert_eq!(board.last_trick(), Some(Trick::Manual));
    }

    #[test]
    fn combo_expires_after_five_seconds() {
        let mut board = ScoreBoard::default();
        board.land(Trick::Ollie, secs(1.0), &RULES);
        assert!(!board.expire(secs(5.9), &RULES));
        assert_eq!(board.combo(), 100);
        assert!(board.expire(secs(6.0), &RULES));
        assert_eq!(board.combo(), 0);
        assert_eq!(board.label(), None);
        assert!(!board.expire(secs(7.0), &RULES));
    }

    #[test]
    fn opposite_strafes_within_a_second_make_a_manual() {
        let mut board = ScoreBoard::default();
        assert!(!board.strafe(Side::Left, secs(0.0), &RULES));
        assert!(board.strafe(Side::Right, secs(0.5), &RULES));
        assert_eq!(board.last_trick(), Some(Trick::Manual));
        assert_eq!(board.combo(), 50);
    }

    #[test]
    fn manuals_inside_the_window_accumulate() {
        let mut board = ScoreBoard::default();
        board.strafe(Side::Left, secs(0.0), &RULES);
        assert!(board.strafe(Side::Right, secs(0.5), &RULES));
        assert!(board.strafe(Side::Left, secs(1.0), &RULES));
        assert_eq!(board.combo(), 100);
        assert_eq!(board.score(), 50);

        board.land(Trick::Ollie, secs(2.0), &RULES);
        assert_eq!(board.combo(), 100);
        assert_eq!(board.score(), 100);
    }

    #[test]
    fn slow_or_same_side_strafes_do_not_score() {
        let mut board = ScoreBoard::default();
        board.strafe(Side::Left, secs(0.0), &RULES);
        assert!(!board.strafe(Side::Left, secs(0.2), &RULES));
        assert!(!board.strafe(Side::Right, secs(1.5), &RULES));
        assert_eq!(board.combo(), 0);
    }

    #[test]
    fn label_shows_trick_and_combo() {
        let mut board = ScoreBoard::default();
        board.land(Trick::Ollie, secs(0.0), &RULES);
        board.land(Trick::Ollie, secs(0.5), &RULES);
        assert_eq!(board.label().as_deref(), Some("Ollie (+100)\nCombo: 200"));
    }
}

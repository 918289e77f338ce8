//! Title / play / pause phases wrapped around a scene.
//!
//! The session owns the held-keys state and the game clock. Ticks and the
//! clock only run while playing. Leaving to the title drops the scene; the
//! next start builds a fresh one.

use instant::Duration;

use crate::game::{
    Simulation,
    clock::GameClock,
    input::{InputState, Key},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Title,
    Playing,
    Paused,
}

pub struct Session<S> {
    phase: Phase,
    scene: Option<S>,
    build: Box<dyn Fn() -> S>,
    input: InputState,
    clock: GameClock,
}

impl<S: Simulation> Session<S> {
    /// A session waiting on the title screen.
    pub fn new(build: impl Fn() -> S + 'static) -> Self {
        Self {
            phase: Phase::Title,
            scene: None,
            build: Box::new(build),
            input: InputState::default(),
            clock: GameClock::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scene(&self) -> Option<&S> {
        self.scene.as_ref()
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Build a fresh scene and start playing it.
    pub fn start(&mut self) {
        self.scene = Some((self.build)());
        self.clock = GameClock::default();
        self.enter(Phase::Playing);
    }

    fn enter(&mut self, phase: Phase) {
        log::info!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.input.clear();
    }

    /// Feed one key event. Returns the new phase when the event changed it.
    pub fn key_event(&mut self, key: Key, pressed: bool) -> Option<Phase> {
        if !pressed {
            self.input.release(key);
            return None;
        }
        if !self.input.press(key) {
            return None;
        }

        match (self.phase, key) {
            (Phase::Title, Key::Start) => self.start(),
            (Phase::Playing, Key::Pause) => self.enter(Phase::Paused),
            (Phase::Paused, Key::Pause) => self.enter(Phase::Playing),
            (Phase::Paused, Key::Quit) => {
                self.scene = None;
                self.enter(Phase::Title);
            }
            (Phase::Playing, key) => {
                let now = self.clock.now();
                if let Some(scene) = self.scene.as_mut() {
                    scene.key_pressed(key, now);
                }
                return None;
            }
            _ => return None,
        }
        // Still down: its auto-repeat must not count as a second press.
        self.input.press(key);
        Some(self.phase)
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.input.set_focused(focused);
    }

    /// Run one fixed step of `step` length. Returns `false` when not playing.
    pub fn tick(&mut self, step: Duration) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };
        let now = self.clock.advance(step);
        scene.tick(&self.input.snapshot(), now);
        true
    }
}

impl<S: Simulation + Default + 'static> Default for Session<S> {
    fn default() -> Self {
        Self::new(S::default)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Deg;

    use super::*;
    use crate::{
        camera::Camera,
        game::input::InputSnapshot,
    };

    #[derive(Default)]
    struct Counter {
        ticks: u32,
        presses: Vec<(Key, Duration)>,
        forward_ticks: u32,
    }

    impl Simulation for Counter {
        fn tick(&mut self, input: &InputSnapshot, _: Duration) {
            self.ticks += 1;
            if input.is_held(Key::Forward) {
                self.forward_ticks += 1;
            }
        }

        fn key_pressed(&mut self, key: Key, now: Duration) {
            self.presses.push((key, now));
        }

        fn view(&self) -> Camera {
            Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0))
        }
    }

    const STEP: Duration = Duration::from_millis(16);

    #[test]
    fn title_waits_for_start() {
        let mut session = Session::new(Counter::default);
        assert!(!session.tick(STEP));
        assert_eq!(session.key_event(Key::Action, true), None);
        assert_eq!(session.key_event(Key::Start, true), Some(Phase::Playing));
        assert!(session.tick(STEP));
        assert_eq!(session.scene().map(|s| s.ticks), Some(1));
    }

    #[test]
    fn pause_freezes_ticks_and_clock() {
        let mut session = Session::new(Counter::default);
        session.start();
        session.tick(STEP);
        session.key_event(Key::Pause, true);
        assert_eq!(session.phase(), Phase::Paused);
        assert!(!session.tick(STEP));
        assert_eq!(session.now(), STEP);

        session.key_event(Key::Pause, false);
        assert_eq!(session.key_event(Key::Pause, true), Some(Phase::Playing));
        session.tick(STEP);
        assert_eq!(session.scene().map(|s| s.ticks), Some(2));
    }

    #[test]
    fn quit_from_pause_rebuilds_the_scene() {
        let mut session = Session::new(Counter::default);
        session.start();
        session.tick(STEP);
        session.key_event(Key::Pause, true);
        assert_eq!(session.key_event(Key::Quit, true), Some(Phase::Title));
        assert!(session.scene().is_none());

        session.key_event(Key::Start, true);
        assert_eq!(session.scene().map(|s| s.ticks), Some(0));
        assert_eq!(session.now(), Duration::ZERO);
    }

    #[test]
    fn presses_are_forwarded_with_game_time() {
        let mut session = Session::new(Counter::default);
        session.start();
        session.tick(STEP);
        session.key_event(Key::Action, true);
        // Auto-repeat is swallowed.
        session.key_event(Key::Action, true);
        let presses = &session.scene().map(|s| s.presses.clone()).unwrap_or_default();
        assert_eq!(presses, &vec![(Key::Action, STEP)]);
    }

    #[test]
    fn held_pause_key_does_not_toggle_back() {
        let mut session = Session::new(Counter::default);
        session.start();
        assert_eq!(session.key_event(Key::Pause, true), Some(Phase::Paused));
        assert_eq!(session.key_event(Key::Pause, true), None);
        assert_eq!(session.key_event(Key::Pause, true), None);
        assert_eq!(session.phase(), Phase::Paused);

        session.key_event(Key::Pause, false);
        assert_eq!(session.key_event(Key::Pause, true), Some(Phase::Playing));
    }

    #[test]
    fn held_start_key_is_not_forwarded_to_the_scene() {
        let mut session = Session::new(Counter::default);
        assert_eq!(session.key_event(Key::Start, true), Some(Phase::Playing));
        session.key_event(Key::Start, true);
        assert_eq!(session.scene().map(|s| s.presses.len()), Some(0));
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut session = Session::new(Counter::default);
        session.start();
        session.key_event(Key::Forward, true);
        session.tick(STEP);
        session.set_focused(false);
        session.tick(STEP);
        assert_eq!(session.scene().map(|s| s.forward_ticks), Some(1));
    }
}

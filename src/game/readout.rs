//! On-screen text of a running game: stats, combo labels and phase prompts.
//!
//! Only the text and where it is pinned live here. Drawing it needs the `ui`
//! feature; without it the flows log the same lines.

use crate::game::{
    Simulation,
    session::{Phase, Session},
};

pub const TITLE_PROMPT: &str = "Press [RETURN] to start";
pub const PAUSE_PROMPT: &str = "Game on pause, press [ESC] to resume or [Q] to quit";

/// Where a caption is pinned on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Centre,
    /// Just above the pose preview in the bottom-right corner.
    AboveCorner,
}

impl Anchor {
    /// Top-left pixel of the caption's text box.
    pub fn origin(self, viewport: [u32; 2]) -> [f32; 2] {
        let [w, h] = viewport.map(|v| v as f32);
        match self {
            Anchor::TopLeft => [10.0, 10.0],
            Anchor::Centre => [(w / 2.0 - 200.0).max(0.0), h / 2.0],
            Anchor::AboveCorner => [(w - 138.0).max(0.0), (h - 268.0).max(0.0)],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    pub anchor: Anchor,
    pub text: String,
}

impl Caption {
    pub fn new(anchor: Anchor, text: impl Into<String>) -> Self {
        Self {
            anchor,
            text: text.into(),
        }
    }
}

/// Anything that has text to show this frame.
pub trait Readout {
    fn captions(&self) -> Vec<Caption>;
}

impl<S: Simulation + Readout> Readout for Session<S> {
    fn captions(&self) -> Vec<Caption> {
        let mut captions = self.scene().map(Readout::captions).unwrap_or_default();
        match self.phase() {
            Phase::Title => captions.push(Caption::new(Anchor::Centre, TITLE_PROMPT)),
            Phase::Paused => captions.push(Caption::new(Anchor::Centre, PAUSE_PROMPT)),
            Phase::Playing => (),
        }
        captions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_caption_sits_above_the_preview() {
        assert_eq!(Anchor::AboveCorner.origin([800, 600]), [662.0, 332.0]);
        assert_eq!(Anchor::AboveCorner.origin([100, 100]), [0.0, 0.0]);
        assert_eq!(Anchor::TopLeft.origin([800, 600]), [10.0, 10.0]);
    }
}

//! Game simulation, free of any GPU or window types.
//!
//! - `config` holds the per-variant tuning tables
//! - `input` turns key events into per-tick snapshots
//! - `motion`, `ollie`, `combo`, `enemy`, `preview` and `animation` are the
//!   small state machines the scenes are built from
//! - `shooter` and `skate` are the two scenes
//! - `session` wraps a scene in title/play/pause phases
//! - `geometry` builds the quads the flows upload and draw
//! - `readout` is the text a frame shows: stats, combo label, prompts

use instant::Duration;

use crate::camera::Camera;

pub mod animation;
pub mod clock;
pub mod combo;
pub mod config;
pub mod enemy;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod ollie;
pub mod preview;
pub mod readout;
pub mod session;
pub mod shooter;
pub mod skate;

/// A scene advanced in fixed steps.
pub trait Simulation {
    /// One fixed step. `now` is game time after this step.
    fn tick(&mut self, input: &input::InputSnapshot, now: Duration);

    /// A fresh key press, delivered when it happens rather than on the next tick.
    fn key_pressed(&mut self, key: input::Key, now: Duration);

    /// The camera the scene should be rendered from.
    fn view(&self) -> Camera;
}

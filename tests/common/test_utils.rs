#![allow(dead_code)]

use instant::Duration;
use quad_flow::game::{
    Simulation,
    input::Key,
    session::{Phase, Session},
};

pub const STEP: Duration = Duration::from_millis(16);

/// A session that is already playing a fresh scene.
pub fn playing<S: Simulation + 'static>(build: impl Fn() -> S + 'static) -> Session<S> {
    let mut session = Session::new(build);
    assert_eq!(session.key_event(Key::Start, true), Some(Phase::Playing));
    session.key_event(Key::Start, false);
    session
}

/// Press and release `key`.
pub fn tap<S: Simulation>(session: &mut Session<S>, key: Key) -> Option<Phase> {
    let phase = session.key_event(key, true);
    session.key_event(key, false);
    phase
}

pub fn hold<S: Simulation>(session: &mut Session<S>, keys: &[Key]) {
    keys.iter().for_each(|&key| _ = session.key_event(key, true));
}

pub fn release<S: Simulation>(session: &mut Session<S>, keys: &[Key]) {
    keys.iter().for_each(|&key| _ = session.key_event(key, false));
}

/// Run `n` fixed steps.
pub fn run<S: Simulation>(session: &mut Session<S>, n: usize) {
    for _ in 0..n {
        session.tick(STEP);
    }
}

/// Run fixed steps until `done` holds or `limit` steps passed. Returns the steps taken.
pub fn run_until<S: Simulation>(
    session: &mut Session<S>,
    limit: usize,
    mut done: impl FnMut(&Session<S>) -> bool,
) -> Option<usize> {
    for n in 1..=limit {
        session.tick(STEP);
        if done(session) {
            return Some(n);
        }
    }
    None
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

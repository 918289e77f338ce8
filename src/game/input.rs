//! Keyboard state decoupled from winit.
//!
//! [`InputState`] is fed key-down/key-up/focus events as they arrive. The
//! simulation never looks at it directly; it receives an [`InputSnapshot`]
//! taken at the start of every tick.

use std::collections::HashSet;

use winit::keyboard::KeyCode;

/// Logical game keys. Several physical keys may map to the same one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Sprint,
    TurnLeft,
    TurnRight,
    LookUp,
    LookDown,
    /// Shoot in the arena, ollie on the board.
    Action,
    Spawn,
    ToggleView,
    Pause,
    Start,
    Quit,
}

impl Key {
    pub fn from_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::KeyW => Key::Forward,
            KeyCode::KeyS => Key::Back,
            KeyCode::KeyA => Key::StrafeLeft,
            KeyCode::KeyD => Key::StrafeRight,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Sprint,
            KeyCode::ArrowLeft | KeyCode::KeyJ => Key::TurnLeft,
            KeyCode::ArrowRight | KeyCode::KeyL => Key::TurnRight,
            KeyCode::ArrowUp | KeyCode::KeyI => Key::LookUp,
            KeyCode::ArrowDown | KeyCode::KeyK => Key::LookDown,
            KeyCode::Space => Key::Action,
            KeyCode::KeyH => Key::Spawn,
            KeyCode::KeyT => Key::ToggleView,
            KeyCode::Escape => Key::Pause,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Start,
            KeyCode::KeyQ => Key::Quit,
            _ => return None,
        };
        Some(key)
    }
}

/// Held keys as seen by one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    held: HashSet<Key>,
    focused: bool,
}

impl InputSnapshot {
    pub fn new(held: impl IntoIterator<Item = Key>, focused: bool) -> Self {
        Self {
            held: held.into_iter().collect(),
            focused,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn focused(&self) -> bool {
        self.focused
    }
}

#[derive(Debug)]
pub struct InputState {
    held: HashSet<Key>,
    focused: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            held: HashSet::new(),
            focused: true,
        }
    }
}

impl InputState {
    /// Record a key going down. Returns `true` only for a fresh press, so
    /// that OS auto-repeat does not retrigger actions.
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.held.clear();
        }
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            held: self.held.clone(),
            focused: self.focused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_press_is_not_fresh() {
        let mut input = InputState::default();
        assert!(input.press(Key::Action));
        assert!(!input.press(Key::Action));
        input.release(Key::Action);
        assert!(input.press(Key::Action));
    }

    #[test]
    fn focus_loss_drops_held_keys() {
        let mut input = InputState::default();
        input.press(Key::Forward);
        input.press(Key::TurnLeft);
        input.set_focused(false);

        let snapshot = input.snapshot();
        assert!(!snapshot.focused());
        assert!(!snapshot.is_held(Key::Forward));
        assert!(!snapshot.is_held(Key::TurnLeft));
    }

    #[test]
    fn snapshot_is_detached_from_later_events() {
        let mut input = InputState::default();
        input.press(Key::Forward);
        let snapshot = input.snapshot();
        input.release(Key::Forward);
        assert!(snapshot.is_held(Key::Forward));
    }

    #[test]
    fn look_keys_have_two_bindings() {
        assert_eq!(Key::from_code(KeyCode::ArrowLeft), Some(Key::TurnLeft));
        assert_eq!(Key::from_code(KeyCode::KeyJ), Some(Key::TurnLeft));
        assert_eq!(Key::from_code(KeyCode::KeyZ), None);
    }
}

//! Keyboard and touch mapping
//!
//! Turns raw platform events into steering edges and menu triggers. The
//! session decides whether they apply; nothing here knows the phase.

use crate::sim::Steer;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Space or Enter: the menu button
    Confirm,
    Other,
}

impl Key {
    /// Map a DOM-style `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" | "a" | "A" => Key::Left,
            "ArrowRight" | "Right" | "d" | "D" => Key::Right,
            " " | "Enter" => Key::Confirm,
            _ => Key::Other,
        }
    }
}

/// What a single input event asks of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Steer(Steer),
    MenuButton,
}

pub fn key_down(key: Key) -> Option<Action> {
    match key {
        Key::Left => Some(Action::Steer(Steer::Left)),
        Key::Right => Some(Action::Steer(Steer::Right)),
        Key::Confirm => Some(Action::MenuButton),
        Key::Other => None,
    }
}

/// Releasing any key stops lateral motion
pub fn key_up(_key: Key) -> Steer {
    Steer::Release
}

/// Touches on the left half steer left, the rest steer right
pub fn touch_down(x: f32, width: f32) -> Steer {
    if x < width / 2.0 {
        Steer::Left
    } else {
        Steer::Right
    }
}

pub fn touch_up() -> Steer {
    Steer::Release
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_name("ArrowRight"), Key::Right);
        assert_eq!(Key::from_name(" "), Key::Confirm);
        assert_eq!(Key::from_name("Enter"), Key::Confirm);
        assert_eq!(Key::from_name("q"), Key::Other);
    }

    #[test]
    fn test_key_edges() {
        assert_eq!(key_down(Key::Left), Some(Action::Steer(Steer::Left)));
        assert_eq!(key_down(Key::Right), Some(Action::Steer(Steer::Right)));
        assert_eq!(key_down(Key::Confirm), Some(Action::MenuButton));
        assert_eq!(key_down(Key::Other), None);
        assert_eq!(key_up(Key::Left), Steer::Release);
        assert_eq!(key_up(Key::Other), Steer::Release);
    }

    #[test]
    fn test_touch_halves() {
        assert_eq!(touch_down(100.0, 900.0), Steer::Left);
        assert_eq!(touch_down(449.9, 900.0), Steer::Left);
        assert_eq!(touch_down(450.0, 900.0), Steer::Right);
        assert_eq!(touch_up(), Steer::Release);
    }
}

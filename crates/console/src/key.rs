//! Key events delivered by the host widget

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character
    Char(char),
    /// Completion
    Tab,
    /// Older history entry
    Up,
    /// Newer history entry
    Down,
    /// Submit (acted on when released)
    Enter,
    /// Delete before the caret
    Backspace,
    /// Caret one left
    Left,
    /// Caret one right
    Right,
    /// Caret to the start of the input
    Home,
    /// Caret to the end of the input
    End,
}

/// Press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key went down
    Pressed,
    /// Key came up
    Released,
}

/// A key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key
    pub key: Key,
    /// Press or release
    pub action: KeyAction,
}

impl KeyEvent {
    /// A key press
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Pressed,
        }
    }

    /// A key release
    pub fn released(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Released,
        }
    }
}

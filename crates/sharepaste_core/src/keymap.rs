//! Keyboard shortcuts and the actions they trigger.

/// Session-level action reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    Fork,
    SetLanguage,
    GotoLine,
}

/// A pressed key plus modifiers. `key` is compared case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    /// Ctrl/Cmd + `key`.
    pub fn command(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
            shift: false,
        }
    }

    /// Ctrl/Cmd + Shift + `key`.
    pub fn command_shift(key: char) -> Self {
        Self {
            shift: true,
            ..Self::command(key)
        }
    }

    fn has_command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Shortcut help rows (`chord`, `description`).
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("Ctrl/Cmd+S", "Submit the paste (new pastes only)"),
    ("Ctrl/Cmd+Shift+F", "Fork the viewed paste into a new one"),
    ("Ctrl/Cmd+L", "Set the highlighting language"),
    ("Ctrl/Cmd+G", "Go to line"),
];

/// Map a chord to its action. Chords without Ctrl/Cmd never map.
pub fn action_for(chord: KeyChord) -> Option<Action> {
    if !chord.has_command() {
        return None;
    }
    match (chord.key.to_ascii_lowercase(), chord.shift) {
        ('s', false) => Some(Action::Submit),
        ('f', true) => Some(Action::Fork),
        ('l', false) => Some(Action::SetLanguage),
        ('g', false) => Some(Action::GotoLine),
        _ => None,
    }
}

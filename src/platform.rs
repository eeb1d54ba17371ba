//! Platform-specific key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Platform-appropriate modifier for wizard shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

#[cfg(target_os = "macos")]
mod labels {
    pub const NEXT_STEP_SHORTCUT: &str = "Cmd+N";
    pub const PREV_STEP_SHORTCUT: &str = "Cmd+B";
    pub const ADD_SLOT_SHORTCUT: &str = "Cmd+A";
    pub const REMOVE_SLOT_SHORTCUT: &str = "Cmd+D";
}

#[cfg(not(target_os = "macos"))]
mod labels {
    pub const NEXT_STEP_SHORTCUT: &str = "Ctrl+N";
    pub const PREV_STEP_SHORTCUT: &str = "Ctrl+B";
    pub const ADD_SLOT_SHORTCUT: &str = "Ctrl+A";
    pub const REMOVE_SLOT_SHORTCUT: &str = "Ctrl+D";
}

pub use labels::*;

/// Submit shortcut display. Ctrl+S works on all platforms.
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

pub const QUIT_SHORTCUT: &str = "Ctrl+C";

/// Whether `key` is the shortcut for `c`; Ctrl is accepted everywhere
pub fn is_shortcut(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c)
        && (key.modifiers.contains(SHORTCUT_MODIFIER)
            || key.modifiers.contains(KeyModifiers::CONTROL))
}

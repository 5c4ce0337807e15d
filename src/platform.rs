//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for form shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Reset shortcut display
/// - macOS: "Cmd+R"
/// - Linux/Windows: "Ctrl+R"
#[cfg(target_os = "macos")]
pub const RESET_SHORTCUT: &str = "Cmd+R";

#[cfg(not(target_os = "macos"))]
pub const RESET_SHORTCUT: &str = "Ctrl+R";

/// Copy-snapshot shortcut display
#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "Cmd+Y";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "Ctrl+Y";

/// Paste-snapshot shortcut display
#[cfg(target_os = "macos")]
pub const PASTE_SHORTCUT: &str = "Cmd+V";

#[cfg(not(target_os = "macos"))]
pub const PASTE_SHORTCUT: &str = "Ctrl+V";

/// Whether `modifiers` carry the form shortcut modifier (Ctrl always works)
pub fn is_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(COPY_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}

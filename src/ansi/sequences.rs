//! Fixed ANSI escape sequences used by the terminal and renderer.

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

pub const CURSOR_HIDE: &str = "\x1b[?25l";
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

pub const ALT_SCREEN_ON: &str = "\x1b[?1049h";
pub const ALT_SCREEN_OFF: &str = "\x1b[?1049l";

/// Any-motion mouse tracking with SGR coordinates.
pub const MOUSE_ON: &str = "\x1b[?1003h\x1b[?1006h";
pub const MOUSE_OFF: &str = "\x1b[?1003l\x1b[?1006l";

pub const BRACKETED_PASTE_ON: &str = "\x1b[?2004h";
pub const BRACKETED_PASTE_OFF: &str = "\x1b[?2004l";

/// Synchronized output (DEC mode 2026), so a frame lands atomically.
pub mod sync {
    pub const BEGIN: &str = "\x1b[?2026h";
    pub const END: &str = "\x1b[?2026l";
}

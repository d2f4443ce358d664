//! Terminal mode control.

mod mouse;
mod raw;

pub use mouse::{MouseButton, MouseEvent, MouseEventKind};
pub use raw::{
    NonBlockingGuard, RawModeGuard, enable_raw_mode, is_tty, set_stdin_nonblocking,
    terminal_size,
};

use crate::ansi::sequences;
use std::io::{self, Write};

/// Terminal state manager.
///
/// Tracks which modes have been switched on so that [`cleanup`] (also run
/// on drop) only undoes what was done.
///
/// [`cleanup`]: Terminal::cleanup
pub struct Terminal<W: Write> {
    writer: W,
    alt_screen: bool,
    mouse_enabled: bool,
    paste_enabled: bool,
    cursor_hidden: bool,
    raw_mode_guard: Option<RawModeGuard>,
}

impl<W: Write> Terminal<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            alt_screen: false,
            mouse_enabled: false,
            paste_enabled: false,
            cursor_hidden: false,
            raw_mode_guard: None,
        }
    }

    /// Put stdin into raw mode until [`cleanup`](Self::cleanup).
    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.raw_mode_guard.is_none() {
            self.raw_mode_guard = Some(enable_raw_mode()?);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode_guard.is_some()
    }

    fn toggle(&mut self, on: bool, current: bool, enable: &str, disable: &str) -> io::Result<bool> {
        if on != current {
            self.writer
                .write_all(if on { enable } else { disable }.as_bytes())?;
        }
        Ok(on)
    }

    pub fn set_alt_screen(&mut self, on: bool) -> io::Result<()> {
        self.alt_screen = self.toggle(
            on,
            self.alt_screen,
            sequences::ALT_SCREEN_ON,
            sequences::ALT_SCREEN_OFF,
        )?;
        Ok(())
    }

    pub fn set_mouse(&mut self, on: bool) -> io::Result<()> {
        self.mouse_enabled =
            self.toggle(on, self.mouse_enabled, sequences::MOUSE_ON, sequences::MOUSE_OFF)?;
        Ok(())
    }

    pub fn set_bracketed_paste(&mut self, on: bool) -> io::Result<()> {
        self.paste_enabled = self.toggle(
            on,
            self.paste_enabled,
            sequences::BRACKETED_PASTE_ON,
            sequences::BRACKETED_PASTE_OFF,
        )?;
        Ok(())
    }

    pub fn set_cursor_hidden(&mut self, hidden: bool) -> io::Result<()> {
        self.cursor_hidden = self.toggle(
            hidden,
            self.cursor_hidden,
            sequences::CURSOR_HIDE,
            sequences::CURSOR_SHOW,
        )?;
        Ok(())
    }

    /// Clear the screen and home the cursor.
    pub fn clear(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::CLEAR_SCREEN.as_bytes())?;
        self.writer.write_all(sequences::CURSOR_HOME.as_bytes())
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn begin_sync(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::sync::BEGIN.as_bytes())
    }

    pub fn end_sync(&mut self) -> io::Result<()> {
        self.writer.write_all(sequences::sync::END.as_bytes())
    }

    #[must_use]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Restore every mode this terminal changed.
    pub fn cleanup(&mut self) -> io::Result<()> {
        self.set_cursor_hidden(false)?;
        self.set_mouse(false)?;
        self.set_bracketed_paste(false)?;
        self.set_alt_screen(false)?;
        self.raw_mode_guard = None;
        self.writer.write_all(sequences::RESET.as_bytes())?;
        self.flush()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

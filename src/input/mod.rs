//! Input parsing for terminal events.
//!
//! Raw bytes from the terminal go through [`InputParser`] and come out as
//! [`Event`]s: keys, SGR mouse reports, bracketed paste, focus and resize.

mod event;
mod keyboard;
mod parser;

pub use event::Event;
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, MAX_PASTE_BYTES, ParseError, ParseResult};

pub use crate::terminal::{MouseButton, MouseEvent, MouseEventKind};

//! `emojipick` - Searchable, categorized emoji picker for the terminal
//!
//! A small cell-based rendering core (frame buffer, alpha blending,
//! scissoring, diffed ANSI output, input parsing) plus the picker widget
//! built on it: category tabs that follow the scroll position, live
//! search, hover previews and light/dark themes.
//!
//! ```
//! use emojipick::buffer::Rect;
//! use emojipick::renderer::{Renderer, RendererOptions};
//! use emojipick::{Dataset, EmojiPicker, PickerOptions};
//!
//! let mut renderer =
//!     Renderer::new_with_options(Vec::new(), 44, 24, RendererOptions::headless()).unwrap();
//! let mut picker = EmojiPicker::new(Dataset::builtin(), PickerOptions::default()).unwrap();
//! picker.draw(renderer.frame(), Rect::new(0, 0, 44, 24));
//! renderer.present().unwrap();
//! assert!(renderer.front_buffer().row_text(renderer.pool(), 22).contains("Max Emoji"));
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for color math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow Cell::CellContent etc
#![allow(clippy::struct_excessive_bools)] // Terminal state needs multiple flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod dataset;
pub mod error;
pub mod glyph_pool;
pub mod group;
pub mod input;
pub mod layout;
pub mod picker;
pub mod renderer;
pub mod search;
pub mod style;
pub mod tabs;
pub mod terminal;
pub mod theme;
pub mod unicode;

// Re-export core types at crate root
pub use cell::{Cell, CellContent, GlyphId};
pub use color::Rgba;
pub use error::{Error, Result};
pub use style::{Style, TextAttributes};

// Re-export input types
pub use input::{Event, InputParser, KeyCode, KeyEvent, KeyModifiers, MouseEvent};

// Re-export ANSI types
pub use ansi::ColorMode;

// Re-export commonly used types
pub use dataset::{Category, Dataset, EmojiRecord};
pub use picker::{EmojiPicker, PickerOptions, PickerOutcome};
pub use renderer::{RenderStats, Renderer, RendererOptions};
pub use terminal::{RawModeGuard, Terminal, enable_raw_mode, is_tty, terminal_size};
pub use theme::{Theme, ThemeMode};

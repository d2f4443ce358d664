//! Terminal cell type representing a single character position.
//!
//! The picker surface is a grid of cells. Every emoji glyph occupies two
//! columns: the first cell carries the glyph and the second becomes a
//! [`CellContent::Continuation`].
//!
//! ```
//! use emojipick::{Cell, Rgba, Style};
//!
//! let cell = Cell::new('A', Style::fg(Rgba::WHITE));
//! assert_eq!(cell.display_width(), 1);
//!
//! let blank = Cell::clear(Rgba::BLACK);
//! assert!(blank.is_empty());
//! ```

use crate::color::Rgba;
use crate::style::{Style, TextAttributes};

/// Reference into a [`GlyphPool`](crate::glyph_pool::GlyphPool) with the
/// display width cached alongside the slot.
///
/// ```text
/// [31: reserved][30-24: width (7 bits)][23-0: slot (24 bits)]
/// ```
///
/// Slot 0 is never handed out by the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphId(u32);

impl GlyphId {
    const WIDTH_SHIFT: u32 = 24;
    const WIDTH_MASK: u32 = 0x7F << Self::WIDTH_SHIFT;
    const SLOT_MASK: u32 = 0x00FF_FFFF;

    /// Create an id from a pool slot and a display width.
    #[must_use]
    pub const fn new(slot: u32, width: u8) -> Self {
        Self((slot & Self::SLOT_MASK) | (((width & 0x7F) as u32) << Self::WIDTH_SHIFT))
    }

    #[must_use]
    pub const fn slot(self) -> u32 {
        self.0 & Self::SLOT_MASK
    }

    #[must_use]
    pub const fn width(self) -> usize {
        ((self.0 & Self::WIDTH_MASK) >> Self::WIDTH_SHIFT) as usize
    }
}

/// Content of a terminal cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellContent {
    /// Single-codepoint character.
    Char(char),
    /// Multi-codepoint glyph stored in the pool.
    Glyph(GlyphId),
    /// Empty/cleared cell (renders as a space).
    #[default]
    Empty,
    /// Second column of a wide glyph.
    Continuation,
}

impl CellContent {
    /// Display width of this content.
    #[must_use]
    pub fn display_width(&self) -> usize {
        match self {
            Self::Char(c) => crate::unicode::display_width_char(*c),
            Self::Glyph(id) => id.width(),
            Self::Empty => 1,
            Self::Continuation => 0,
        }
    }

    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }
}

/// A single terminal cell with content and styling.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub content: CellContent,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attributes: TextAttributes,
}

impl Cell {
    /// Create a new cell with a single character.
    #[must_use]
    pub fn new(ch: char, style: Style) -> Self {
        Self::with_content(CellContent::Char(ch), style)
    }

    /// Create a cell holding arbitrary content.
    #[must_use]
    pub fn with_content(content: CellContent, style: Style) -> Self {
        Self {
            content,
            fg: style.fg.unwrap_or(Rgba::WHITE),
            bg: style.bg.unwrap_or(Rgba::TRANSPARENT),
            attributes: style.attributes,
        }
    }

    /// Create a cleared cell with the given background.
    #[must_use]
    pub fn clear(bg: Rgba) -> Self {
        Self {
            content: CellContent::Empty,
            fg: Rgba::WHITE,
            bg,
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a continuation cell (placeholder for wide characters).
    #[must_use]
    pub fn continuation(bg: Rgba) -> Self {
        Self {
            content: CellContent::Continuation,
            ..Self::clear(bg)
        }
    }

    #[must_use]
    pub fn display_width(&self) -> usize {
        self.content.display_width()
    }

    #[must_use]
    pub fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// Composite this cell over `background`.
    ///
    /// Empty content lets the background's content show through, so a
    /// translucent fill tints whatever is already drawn.
    #[must_use]
    pub fn blend_over(self, background: &Cell) -> Cell {
        let (content, attributes) = if self.is_empty() {
            (background.content, background.attributes)
        } else {
            (self.content, self.attributes)
        };
        let fg = if self.is_empty() {
            self.bg.blend_over(background.fg)
        } else {
            self.fg.blend_over(background.bg)
        };

        Cell {
            content,
            fg,
            bg: self.bg.blend_over(background.bg),
            attributes,
        }
    }

    /// Exact comparison on content and color bits, used for frame diffing.
    #[inline]
    #[must_use]
    pub fn bits_eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.attributes == other.attributes
            && self.fg.bits_eq(other.fg)
            && self.bg.bits_eq(other.bg)
    }
}

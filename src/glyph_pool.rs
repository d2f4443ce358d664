//! Interning pool for multi-codepoint glyphs.
//!
//! Emoji such as `👨‍👩‍👧`, `🇫🇷` or `❤️` are a single grapheme cluster made
//! of several `char`s. A [`Cell`](crate::cell::Cell) cannot hold them inline,
//! so they are stored once in the pool and referenced by [`GlyphId`].
//!
//! The picker draws the same small set of glyphs every frame, so entries
//! are never freed: interning the same cluster twice returns the same id.
//!
//! ```
//! use emojipick::glyph_pool::GlyphPool;
//!
//! let mut pool = GlyphPool::new();
//! let id = pool.intern("👨‍👩‍👧");
//! assert_eq!(pool.get(id), Some("👨‍👩‍👧"));
//! assert_eq!(pool.intern("👨‍👩‍👧"), id);
//! ```
//!
//! # Invariants
//!
//! - Slot 0 is reserved and never returned
//! - `get` returns `None` for ids this pool did not produce

use crate::cell::{CellContent, GlyphId};
use crate::unicode::grapheme_width;
use std::collections::HashMap;

/// Maximum slot number (24-bit limit).
pub const MAX_SLOT: u32 = 0x00FF_FFFF;

/// Append-only glyph interning pool.
#[derive(Clone, Debug)]
pub struct GlyphPool {
    slots: Vec<String>,
    index: HashMap<String, u32>,
}

impl Default for GlyphPool {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphPool {
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Slot 0 is the reserved placeholder.
            slots: vec![String::new()],
            index: HashMap::new(),
        }
    }

    /// Intern a grapheme cluster, returning its id.
    ///
    /// When the pool is full the reserved slot is returned, which renders
    /// as a blank cell of the right width.
    pub fn intern(&mut self, grapheme: &str) -> GlyphId {
        let width = u8::try_from(grapheme_width(grapheme)).unwrap_or(2);
        if let Some(&slot) = self.index.get(grapheme) {
            return GlyphId::new(slot, width);
        }

        let Ok(slot) = u32::try_from(self.slots.len()) else {
            return GlyphId::new(0, width);
        };
        if slot > MAX_SLOT {
            tracing::warn!(slot, "glyph pool exhausted");
            return GlyphId::new(0, width);
        }

        self.slots.push(grapheme.to_owned());
        self.index.insert(grapheme.to_owned(), slot);
        GlyphId::new(slot, width)
    }

    /// Look up the text for an id.
    #[must_use]
    pub fn get(&self, id: GlyphId) -> Option<&str> {
        match id.slot() {
            0 => None,
            slot => self.slots.get(slot as usize).map(String::as_str),
        }
    }

    /// Number of interned glyphs (excluding the reserved slot).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell content for one grapheme cluster.
    ///
    /// A single `char` is stored inline; anything longer goes through the pool.
    pub fn content_for(&mut self, grapheme: &str) -> CellContent {
        let mut chars = grapheme.chars();
        match (chars.next(), chars.next()) {
            (None, _) => CellContent::Empty,
            (Some(c), None) => CellContent::Char(c),
            _ => CellContent::Glyph(self.intern(grapheme)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pool_is_empty() {
        let pool = GlyphPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.get(GlyphId::new(0, 2)), None);
    }

    #[test]
    fn test_intern_dedupes() {
        let mut pool = GlyphPool::new();
        let a = pool.intern("🇫🇷");
        let b = pool.intern("🇯🇵");
        let c = pool.intern("🇫🇷");
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
        assert_eq!(a.width(), 2);
        assert_ne!(a.slot(), 0);
    }

    #[test]
    fn test_get_unknown_slot() {
        let pool = GlyphPool::new();
        assert_eq!(pool.get(GlyphId::new(42, 2)), None);
    }

    #[test]
    fn test_content_for() {
        let mut pool = GlyphPool::new();
        assert_eq!(pool.content_for("a"), CellContent::Char('a'));
        assert_eq!(pool.content_for("😀"), CellContent::Char('😀'));
        assert_eq!(pool.content_for(""), CellContent::Empty);
        let CellContent::Glyph(id) = pool.content_for("❤️") else {
            panic!("expected pooled glyph");
        };
        assert_eq!(pool.get(id), Some("❤️"));
    }
}

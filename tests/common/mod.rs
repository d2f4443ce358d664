//! Shared helpers for integration tests.

#![allow(dead_code)] // Not every test binary uses every helper

use emojipick::buffer::{FrameBuffer, Rect};
use emojipick::glyph_pool::GlyphPool;
use emojipick::input::InputParser;
use emojipick::renderer::HitGrid;
use emojipick::{EmojiPicker, PickerOutcome, Rgba};
use tracing::Level;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Push raw terminal bytes through a parser into the picker.
///
/// Returns every outcome other than `Continue`.
pub fn feed(parser: &mut InputParser, picker: &mut EmojiPicker<'_>, bytes: &[u8]) -> Vec<PickerOutcome> {
    let mut events = parser.feed(bytes);
    events.extend(parser.flush());
    events
        .iter()
        .map(|event| picker.handle_event(event))
        .filter(|outcome| *outcome != PickerOutcome::Continue)
        .collect()
}

/// An off-screen drawing target.
pub struct Screen {
    pub buffer: FrameBuffer,
    pub pool: GlyphPool,
    pub hits: HitGrid,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        let mut buffer = FrameBuffer::new(width, height);
        buffer.clear(Rgba::BLACK);
        Self {
            buffer,
            pool: GlyphPool::new(),
            hits: HitGrid::new(width, height),
        }
    }

    pub fn draw(&mut self, picker: &mut EmojiPicker<'_>, area: Rect) {
        self.buffer.clear(Rgba::BLACK);
        self.hits.clear();
        picker.render(&mut self.buffer, &mut self.pool, &mut self.hits, area);
    }

    pub fn row(&self, y: u32) -> String {
        self.buffer.row_text(&self.pool, y)
    }

    /// All rows joined with newlines.
    pub fn text(&self) -> String {
        (0..self.buffer.height())
            .map(|y| self.row(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

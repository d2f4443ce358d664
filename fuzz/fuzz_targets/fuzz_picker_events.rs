//! Fuzz target for the picker's event handling and rendering.

#![no_main]

use emojipick::buffer::{FrameBuffer, Rect};
use emojipick::glyph_pool::GlyphPool;
use emojipick::input::InputParser;
use emojipick::renderer::HitGrid;
use emojipick::{Dataset, EmojiPicker, PickerOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u8, Vec<u8>)| {
    let (width, height, bytes) = input;
    let width = u32::from(width).max(12);
    let height = u32::from(height).max(7);
    let options = PickerOptions {
        width,
        height,
        ..PickerOptions::default()
    };
    let Ok(mut picker) = EmojiPicker::new(Dataset::builtin(), options) else {
        return;
    };

    let mut parser = InputParser::new();
    let mut events = parser.feed(&bytes);
    events.extend(parser.flush());
    for event in &events {
        let _ = picker.handle_event(event);
    }

    let mut buffer = FrameBuffer::new(width, height);
    let mut pool = GlyphPool::new();
    let mut hits = HitGrid::new(width, height);
    picker.render(&mut buffer, &mut pool, &mut hits, Rect::new(0, 0, width, height));
});

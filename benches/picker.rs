//! Full picker frame benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use emojipick::buffer::{FrameBuffer, Rect};
use emojipick::glyph_pool::GlyphPool;
use emojipick::renderer::{HitGrid, Renderer, RendererOptions};
use emojipick::{Dataset, EmojiPicker, Event, KeyEvent, MouseEvent, PickerOptions, Rgba};
use std::hint::black_box;

const AREA: Rect = Rect::new(0, 0, 44, 24);

fn render_offscreen(c: &mut Criterion) {
    let mut picker = EmojiPicker::new(Dataset::builtin(), PickerOptions::default()).unwrap();
    let mut buffer = FrameBuffer::new(44, 24);
    let mut pool = GlyphPool::new();
    let mut hits = HitGrid::new(44, 24);

    c.bench_function("picker_render_44x24", |b| {
        b.iter(|| {
            buffer.clear(Rgba::BLACK);
            hits.clear();
            picker.render(&mut buffer, &mut pool, &mut hits, black_box(AREA));
        })
    });

    picker.scroll_to(500);
    c.bench_function("picker_render_scrolled", |b| {
        b.iter(|| {
            buffer.clear(Rgba::BLACK);
            hits.clear();
            picker.render(&mut buffer, &mut pool, &mut hits, black_box(AREA));
        })
    });
}

fn render_and_present(c: &mut Criterion) {
    let mut picker = EmojiPicker::new(Dataset::builtin(), PickerOptions::default()).unwrap();
    let mut renderer =
        Renderer::new_with_options(std::io::sink(), 44, 24, RendererOptions::headless()).unwrap();
    let mut x = 2;

    c.bench_function("picker_present_hover_move", |b| {
        b.iter(|| {
            x = if x >= 40 { 2 } else { x + 4 };
            picker.handle_event(&Event::Mouse(MouseEvent::move_to(x, 5)));
            picker.draw(renderer.frame(), AREA);
            renderer.present().unwrap();
        })
    });
}

fn handle_keys(c: &mut Criterion) {
    let mut picker = EmojiPicker::new(Dataset::builtin(), PickerOptions::default()).unwrap();

    c.bench_function("picker_type_query", |b| {
        b.iter(|| {
            for ch in "face".chars() {
                picker.handle_event(&Event::Key(KeyEvent::char(black_box(ch))));
            }
            picker.set_query("");
        })
    });
}

criterion_group!(benches, render_offscreen, render_and_present, handle_keys);
criterion_main!(benches);

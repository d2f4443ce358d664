//! Rendering the picker off-screen and through the diffing renderer.

mod common;

use common::Screen;
use emojipick::buffer::Rect;
use emojipick::picker::PickerHit;
use emojipick::renderer::{Renderer, RendererOptions};
use emojipick::{
    Category, ColorMode, Dataset, EmojiPicker, Event, KeyEvent, MouseEvent, PickerOptions,
    ThemeMode,
};

const AREA: Rect = Rect::new(0, 0, 44, 24);

fn picker() -> EmojiPicker<'static> {
    common::init_logging();
    EmojiPicker::new(Dataset::builtin(), PickerOptions::default()).unwrap()
}

// ============================================================================
// Off-screen buffer
// ============================================================================

#[test]
fn default_frame_layout() {
    let mut picker = picker();
    let mut screen = Screen::new(44, 24);
    screen.draw(&mut picker, AREA);

    assert!(screen.row(0).starts_with('╭'));
    assert!(screen.row(0).ends_with('╮'));
    for category in Category::ALL {
        assert!(screen.row(1).contains(category.icon()));
    }
    assert!(screen.row(3).contains("🔍"));
    assert!(screen.row(3).contains("Search"));
    assert!(screen.row(4).contains("People"));
    assert!(screen.row(5).contains("😀"));
    assert!(screen.row(22).contains("Max Emoji™"));
    assert!(screen.row(23).starts_with('╰'));
}

#[test]
fn hit_grid_matches_geometry() {
    let mut picker = picker();
    let mut screen = Screen::new(44, 24);
    screen.draw(&mut picker, AREA);

    for y in 0..24 {
        for x in 0..44 {
            let drawn = screen.hits.test(x, y).and_then(PickerHit::from_id);
            assert_eq!(drawn, picker.hit_test(x, y), "mismatch at ({x}, {y})");
        }
    }
}

#[test]
fn search_results_replace_categories() {
    let mut picker = picker();
    for c in "thumbs".chars() {
        picker.handle_event(&Event::Key(KeyEvent::char(c)));
    }
    let mut screen = Screen::new(44, 24);
    screen.draw(&mut picker, AREA);

    assert!(screen.row(3).contains("thumbs"));
    assert!(screen.row(4).contains("Search Results"));
    assert!(screen.row(5).contains("👍"));
    assert!(screen.row(5).contains("👎"));
    assert!(!screen.text().contains("People"));
}

#[test]
fn hover_shows_description_and_alias() {
    let mut picker = picker();
    picker.handle_event(&Event::Mouse(MouseEvent::move_to(3, 5)));
    let mut screen = Screen::new(44, 24);
    screen.draw(&mut picker, AREA);

    let footer = screen.row(22);
    assert!(footer.contains("😀"));
    assert!(footer.contains("grinning face :grinning:"));
}

#[test]
fn scrolled_frame_pins_section_header() {
    let mut picker = picker();
    picker.scroll_to(5);
    let mut screen = Screen::new(44, 24);
    screen.draw(&mut picker, AREA);

    assert!(screen.row(4).contains("People"));
    assert_eq!(screen.hits.test(3, 4), None);
    assert!(screen.hits.test(3, 5).is_some());
}

#[test]
fn offset_area_moves_everything() {
    let mut picker = picker();
    let mut screen = Screen::new(60, 30);
    screen.draw(&mut picker, Rect::new(8, 3, 44, 24));

    assert!(screen.row(3).contains('╭'));
    assert!(screen.row(8).contains("😀"));
    assert_eq!(picker.hit_test(11, 8), Some(PickerHit::Card(0)));
    assert_eq!(
        screen.hits.test(11, 8).and_then(PickerHit::from_id),
        Some(PickerHit::Card(0))
    );
    // Outside the widget nothing is drawn or registered.
    assert_eq!(screen.hits.test(2, 8), None);
    assert!(screen.row(1).trim().is_empty());
}

#[test]
fn light_and_dark_differ() {
    let mut dark = picker();
    let mut light = EmojiPicker::new(
        Dataset::builtin(),
        PickerOptions {
            theme: ThemeMode::Light,
            ..PickerOptions::default()
        },
    )
    .unwrap();

    let mut a = Screen::new(44, 24);
    let mut b = Screen::new(44, 24);
    a.draw(&mut dark, AREA);
    b.draw(&mut light, AREA);

    assert_eq!(a.text(), b.text());
    let cell_a = a.buffer.get(20, 12).copied().unwrap_or_default();
    let cell_b = b.buffer.get(20, 12).copied().unwrap_or_default();
    assert_ne!(cell_a.bg, cell_b.bg);
}

// ============================================================================
// Through the renderer
// ============================================================================

#[test]
fn renderer_writes_picker_frame() {
    let mut picker = picker();
    let mut renderer =
        Renderer::new_with_options(Vec::new(), 44, 24, RendererOptions::headless()).unwrap();

    picker.draw(renderer.frame(), AREA);
    renderer.present().unwrap();

    let output = String::from_utf8_lossy(renderer.output()).to_string();
    assert!(output.contains("😀"));
    assert!(output.contains("People"));
    assert!(output.contains("\x1b[38;2;"));
    assert_eq!(renderer.stats().full_redraws, 1);
    assert_eq!(
        renderer.hit_test(3, 5).and_then(PickerHit::from_id),
        Some(PickerHit::Card(0))
    );
}

#[test]
fn renderer_redraws_only_what_changed() {
    let mut picker = picker();
    let mut renderer =
        Renderer::new_with_options(Vec::new(), 44, 24, RendererOptions::headless()).unwrap();

    picker.draw(renderer.frame(), AREA);
    renderer.present().unwrap();
    let first = renderer.stats().last_frame_cells;

    picker.handle_event(&Event::Mouse(MouseEvent::move_to(3, 5)));
    picker.draw(renderer.frame(), AREA);
    renderer.present().unwrap();
    let second = renderer.stats().last_frame_cells;

    assert!(second > 0);
    assert!(second < first);
    assert_eq!(renderer.stats().full_redraws, 1);
}

#[test]
fn renderer_respects_color_mode() {
    let mut picker = picker();
    let options = RendererOptions {
        color_mode: ColorMode::Color256,
        ..RendererOptions::headless()
    };
    let mut renderer = Renderer::new_with_options(Vec::new(), 44, 24, options).unwrap();

    picker.draw(renderer.frame(), AREA);
    renderer.present().unwrap();

    let output = String::from_utf8_lossy(renderer.output()).to_string();
    assert!(!output.contains("\x1b[38;2;"));
    assert!(output.contains("\x1b[38;5;"));
}

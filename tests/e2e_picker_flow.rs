//! End-to-end: raw terminal bytes through the input parser into the
//! picker, out through its callbacks.

mod common;

use common::feed;
use emojipick::input::InputParser;
use emojipick::{Dataset, EmojiPicker, PickerOptions, PickerOutcome};
use std::cell::RefCell;
use std::time::{Duration, Instant};

fn picker() -> EmojiPicker<'static> {
    common::init_logging();
    EmojiPicker::new(Dataset::builtin(), PickerOptions::default()).unwrap()
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn type_query_and_press_enter() {
    let chosen = RefCell::new(Vec::new());
    let mut picker = EmojiPicker::new(Dataset::builtin(), PickerOptions::default())
        .unwrap()
        .on_select(|emoji| chosen.borrow_mut().push(emoji.to_string()));
    let mut parser = InputParser::new();

    assert!(feed(&mut parser, &mut picker, b"grin").is_empty());
    assert_eq!(picker.query(), "grin");
    assert_eq!(picker.results_len(), 5);

    let outcomes = feed(&mut parser, &mut picker, b"\r");
    assert_eq!(outcomes, vec![PickerOutcome::Selected("😀".to_string())]);
    drop(picker);
    assert_eq!(chosen.into_inner(), vec!["😀"]);
}

#[test]
fn editing_keys() {
    let mut picker = picker();
    let mut parser = InputParser::new();

    feed(&mut parser, &mut picker, b"smilex\x7f");
    assert_eq!(picker.query(), "smile");
    assert_eq!(picker.results_len(), 4);

    // Ctrl+U
    feed(&mut parser, &mut picker, b"\x15");
    assert_eq!(picker.query(), "");
    assert_eq!(picker.results_len(), Dataset::builtin().len());
}

#[test]
fn escape_clears_then_dismisses() {
    let mut picker = picker();
    let mut parser = InputParser::new();

    assert!(feed(&mut parser, &mut picker, b"cat\x1b").is_empty());
    assert!(!picker.is_searching());
    assert_eq!(
        feed(&mut parser, &mut picker, b"\x1b"),
        vec![PickerOutcome::Dismissed]
    );
}

#[test]
fn bracketed_paste_becomes_query() {
    let mut picker = picker();
    let mut parser = InputParser::new();

    feed(&mut parser, &mut picker, b"\x1b[200~heart\x1b[201~");
    assert_eq!(picker.query(), "heart");
    assert_eq!(picker.results_len(), 25);
}

#[test]
fn split_escape_sequence_across_reads() {
    let mut picker = picker();
    let mut parser = InputParser::new();

    // Down arrow arriving in two reads.
    let mut events = parser.feed(b"\x1b[");
    assert!(events.is_empty());
    events.extend(parser.feed(b"B"));
    for event in &events {
        picker.handle_event(event);
    }
    assert_eq!(picker.scroll_offset(), 1);
}

// ============================================================================
// Tabs and polling
// ============================================================================

#[test]
fn tab_key_jumps_to_next_category() {
    let mut picker = picker();
    let mut parser = InputParser::new();

    feed(&mut parser, &mut picker, b"\t");
    assert_eq!(picker.active_tab(), 1);
    assert_eq!(picker.scroll_offset(), picker.boundaries()[1] as u32);

    // Shift+Tab back.
    feed(&mut parser, &mut picker, b"\x1b[Z");
    assert_eq!(picker.active_tab(), 0);
    assert_eq!(picker.scroll_offset(), 0);
}

#[test]
fn polling_follows_scroll() {
    let mut picker = picker();
    let mut parser = InputParser::new();
    let start = Instant::now();

    // PageDown twice moves past the People section.
    feed(&mut parser, &mut picker, b"\x1b[6~\x1b[6~");
    assert!(picker.scroll_offset() >= picker.boundaries()[1] as u32);
    assert_eq!(picker.active_tab(), 0);

    assert!(picker.tick(start));
    assert_eq!(picker.active_tab(), 1);

    feed(&mut parser, &mut picker, b"\x1b[H");
    assert!(!picker.tick(start + Duration::from_millis(10)));
    assert_eq!(picker.active_tab(), 1);
    assert!(picker.tick(start + Duration::from_millis(150)));
    assert_eq!(picker.active_tab(), 0);
}

// ============================================================================
// Mouse
// ============================================================================

#[test]
fn hover_then_click() {
    let hovered = RefCell::new(Vec::new());
    let chosen = RefCell::new(None);
    let mut picker = EmojiPicker::new(Dataset::builtin(), PickerOptions::default())
        .unwrap()
        .on_hover(|description| hovered.borrow_mut().push(description.to_string()))
        .on_select(|emoji| *chosen.borrow_mut() = Some(emoji.to_string()));
    let mut parser = InputParser::new();

    // SGR reports are 1-based; (3, 5) is the first card.
    feed(&mut parser, &mut picker, b"\x1b[<35;4;6M\x1b[<35;5;6M");
    assert_eq!(picker.hover().map(|h| h.record), Some(0));

    let outcomes = feed(&mut parser, &mut picker, b"\x1b[<0;7;6M");
    assert_eq!(outcomes, vec![PickerOutcome::Selected("😁".to_string())]);

    drop(picker);
    assert_eq!(hovered.into_inner(), vec!["grinning face"]);
    assert_eq!(chosen.into_inner().as_deref(), Some("😁"));
}

#[test]
fn wheel_scrolls_grid() {
    let mut picker = picker();
    let mut parser = InputParser::new();

    feed(&mut parser, &mut picker, b"\x1b[<65;10;10M\x1b[<65;10;10M");
    assert_eq!(picker.scroll_offset(), 6);
    feed(&mut parser, &mut picker, b"\x1b[<64;10;10M");
    assert_eq!(picker.scroll_offset(), 3);
}

#[test]
fn clicking_a_tab_while_searching() {
    let mut picker = picker();
    let mut parser = InputParser::new();

    feed(&mut parser, &mut picker, b"flag");
    assert!(picker.is_searching());

    // Tab slots are 5 columns wide from x = 1; the Flags tab is the last.
    feed(&mut parser, &mut picker, b"\x1b[<0;38;2M");
    assert!(!picker.is_searching());
    // Flags starts past the last full viewport; the view stops inside Symbols.
    assert_eq!(picker.scroll_offset(), picker.max_scroll());
    assert_eq!(picker.active_tab(), 6);
}

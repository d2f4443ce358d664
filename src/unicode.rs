//! Display width and grapheme helpers for terminal layout.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
#[must_use]
pub fn display_width(s: &str) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| (0x20..0x7f).contains(b)).count();
    }
    UnicodeWidthStr::width(s)
}

/// Display width of a single character in terminal columns.
///
/// Control characters have width 0.
#[inline]
#[must_use]
pub fn display_width_char(c: char) -> usize {
    if (' '..='~').contains(&c) {
        return 1;
    }
    if c < ' ' {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Cell width of one grapheme cluster, clamped to the 1..=2 columns a
/// terminal cell pair can hold.
///
/// Emoji sequences (ZWJ families, flags, VS16 forms) are reported with
/// inconsistent widths across Unicode versions; a terminal renders all of
/// them in two columns.
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (None, _) => 0,
        (Some(c), None) => display_width_char(c),
        _ if is_emoji_sequence(grapheme) => 2,
        _ => display_width(grapheme).clamp(1, 2),
    }
}

/// Whether a multi-codepoint cluster is an emoji presentation sequence.
fn is_emoji_sequence(grapheme: &str) -> bool {
    grapheme.chars().any(|c| {
        matches!(c, '\u{FE0F}' | '\u{200D}' | '\u{1F1E6}'..='\u{1F1FF}' | '\u{1F3FB}'..='\u{1F3FF}')
    })
}

/// Iterate over extended grapheme clusters.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Drop the final grapheme cluster of `s` in place.
///
/// Returns `false` when the string was already empty.
pub fn pop_grapheme(s: &mut String) -> bool {
    match s.grapheme_indices(true).next_back() {
        Some((idx, _)) => {
            s.truncate(idx);
            true
        }
        None => false,
    }
}

/// Truncate `s` so that it fits in `max_width` columns, never splitting a
/// grapheme cluster.
#[must_use]
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, g) in s.grapheme_indices(true) {
        let w = grapheme_width(g);
        if used + w > max_width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

//! Text and box drawing operations.

use crate::buffer::{FrameBuffer, Rect};
use crate::cell::{Cell, CellContent};
use crate::glyph_pool::GlyphPool;
use crate::style::Style;
use crate::unicode::{grapheme_width, graphemes};

/// Box drawing characters plus the style they are drawn in.
#[derive(Clone, Copy, Debug)]
pub struct BoxStyle {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub style: Style,
}

impl BoxStyle {
    /// Rounded corner box drawing characters.
    #[must_use]
    pub const fn rounded(style: Style) -> Self {
        Self {
            top_left: '╭',
            top_right: '╮',
            bottom_left: '╰',
            bottom_right: '╯',
            horizontal: '─',
            vertical: '│',
            style,
        }
    }
}

impl FrameBuffer {
    /// Draw one cell's worth of content, inheriting unset style colors
    /// from what is already there.
    fn put(&mut self, x: u32, y: u32, content: CellContent, style: Style) {
        let Some(dest) = self.get(x, y).copied() else {
            return;
        };
        let cell = Cell {
            content,
            fg: style.fg.unwrap_or(dest.fg),
            bg: style.bg.map_or(dest.bg, |bg| bg.blend_over(dest.bg)),
            attributes: style.attributes,
        };
        self.set(x, y, cell);
    }

    /// Draw a single character.
    pub fn draw_char(&mut self, x: u32, y: u32, ch: char, style: Style) {
        self.put(x, y, CellContent::Char(ch), style);
    }

    /// Draw text at position, handling grapheme clusters and wide glyphs.
    ///
    /// A wide glyph whose second column would be clipped is drawn as a
    /// blank. Returns the number of columns advanced.
    pub fn draw_text(
        &mut self,
        pool: &mut GlyphPool,
        x: u32,
        y: u32,
        text: &str,
        style: Style,
    ) -> u32 {
        let mut col = x;
        for grapheme in graphemes(text) {
            if col >= self.width() {
                break;
            }
            let width = grapheme_width(grapheme);
            if width == 0 {
                continue;
            }
            if width > 1 && !self.is_visible(col + 1, y) {
                self.put(col, y, CellContent::Empty, style);
                col += 1;
                continue;
            }

            let content = pool.content_for(grapheme);
            self.put(col, y, content, style);
            for i in 1..width as u32 {
                self.put(col + i, y, CellContent::Continuation, style);
            }
            col += width as u32;
        }
        col - x
    }

    /// Draw a horizontal run of one character.
    pub fn draw_hline(&mut self, x: u32, y: u32, len: u32, ch: char, style: Style) {
        for col in x..x.saturating_add(len) {
            self.draw_char(col, y, ch, style);
        }
    }

    /// Draw a box border around `rect`.
    pub fn draw_box(&mut self, rect: Rect, box_style: BoxStyle) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let style = box_style.style;
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);

        self.draw_char(x0, y0, box_style.top_left, style);
        self.draw_char(x1, y0, box_style.top_right, style);
        self.draw_char(x0, y1, box_style.bottom_left, style);
        self.draw_char(x1, y1, box_style.bottom_right, style);

        self.draw_hline(x0 + 1, y0, rect.width - 2, box_style.horizontal, style);
        self.draw_hline(x0 + 1, y1, rect.width - 2, box_style.horizontal, style);

        for row in (y0 + 1)..y1 {
            self.draw_char(x0, row, box_style.vertical, style);
            self.draw_char(x1, row, box_style.vertical, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_draw_text_inherits_background() {
        let mut pool = GlyphPool::new();
        let mut buf = FrameBuffer::new(8, 1);
        buf.clear(Rgba::BLACK);
        buf.draw_text(&mut pool, 0, 0, "hi", Style::fg(Rgba::WHITE));
        let cell = buf.get(0, 0).copied().unwrap_or_default();
        assert_eq!(cell.bg, Rgba::BLACK);
        assert_eq!(cell.fg, Rgba::WHITE);
    }

    #[test]
    fn test_draw_text_wide_advances_two() {
        let mut pool = GlyphPool::new();
        let mut buf = FrameBuffer::new(8, 1);
        let advanced = buf.draw_text(&mut pool, 1, 0, "😀a", Style::NONE);
        assert_eq!(advanced, 3);
        assert!(buf.get(2, 0).is_some_and(Cell::is_continuation));
        assert_eq!(buf.get(3, 0).and_then(|c| c.content.as_char()), Some('a'));
    }

    #[test]
    fn test_draw_text_clipped_wide_glyph_becomes_blank() {
        let mut pool = GlyphPool::new();
        let mut buf = FrameBuffer::new(3, 1);
        buf.draw_text(&mut pool, 2, 0, "😀", Style::NONE);
        assert!(buf.get(2, 0).is_some_and(Cell::is_empty));
    }

    #[test]
    fn test_draw_text_stops_at_edge() {
        let mut pool = GlyphPool::new();
        let mut buf = FrameBuffer::new(4, 1);
        assert_eq!(buf.draw_text(&mut pool, 0, 0, "abcdef", Style::NONE), 4);
        assert_eq!(buf.row_text(&pool, 0), "abcd");
    }

    #[test]
    fn test_draw_box_rounded() {
        let pool = GlyphPool::new();
        let mut buf = FrameBuffer::new(4, 3);
        buf.draw_box(buf.bounds(), BoxStyle::rounded(Style::NONE));
        assert_eq!(buf.row_text(&pool, 0), "╭──╮");
        assert_eq!(buf.row_text(&pool, 1), "│  │");
        assert_eq!(buf.row_text(&pool, 2), "╰──╯");
    }

    #[test]
    fn test_draw_box_too_small_is_noop() {
        let pool = GlyphPool::new();
        let mut buf = FrameBuffer::new(4, 1);
        buf.draw_box(buf.bounds(), BoxStyle::rounded(Style::NONE));
        assert_eq!(buf.row_text(&pool, 0), "    ");
    }
}

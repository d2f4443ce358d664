//! Buffered ANSI output writer with state tracking.

use crate::ansi::{self, ColorMode};
use crate::cell::{Cell, CellContent};
use crate::color::Rgba;
use crate::glyph_pool::GlyphPool;
use crate::style::TextAttributes;
use std::io::{self, Write};

/// SGR "default background".
const BG_DEFAULT: &[u8] = b"\x1b[49m";

/// Buffered writer that tracks ANSI state to minimize escape sequences.
///
/// Colors and attributes are only emitted when they differ from what the
/// terminal already has. Output accumulates in memory until [`flush`].
///
/// [`flush`]: AnsiWriter::flush
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    color_mode: ColorMode,

    current_fg: Option<Rgba>,
    current_bg: Option<Rgba>,
    current_attrs: TextAttributes,

    /// Tracked cursor position, `None` once it is uncertain.
    cursor: Option<(u32, u32)>,
}

impl<W: Write> AnsiWriter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_color_mode(writer, ColorMode::TrueColor)
    }

    pub fn with_color_mode(writer: W, color_mode: ColorMode) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            color_mode,
            current_fg: None,
            current_bg: None,
            current_attrs: TextAttributes::empty(),
            cursor: Some((0, 0)),
        }
    }

    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Forget all tracked state. The cursor is assumed to be at home.
    pub fn reset_state(&mut self) {
        self.current_fg = None;
        self.current_bg = None;
        self.current_attrs = TextAttributes::empty();
        self.cursor = Some((0, 0));
    }

    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Move the cursor, picking whichever of a relative or absolute move
    /// is shorter. An uncertain cursor always gets an absolute move.
    pub fn move_cursor(&mut self, row: u32, col: u32) {
        let relative = self.cursor.and_then(|(cur_row, cur_col)| {
            let dy = i64::from(row) - i64::from(cur_row);
            let dx = i64::from(col) - i64::from(cur_col);
            let rel_cost = |d: i64| if d == 0 { 0 } else { 3 + digits(d.unsigned_abs()) };
            let abs_cost = 4 + digits(u64::from(row) + 1) + digits(u64::from(col) + 1);
            let dx = i32::try_from(dx).ok()?;
            let dy = i32::try_from(dy).ok()?;
            (rel_cost(dx.into()) + rel_cost(dy.into()) < abs_cost).then_some((dx, dy))
        });
        if relative == Some((0, 0)) {
            return;
        }
        // Writes into a Vec<u8> cannot fail.
        let _ = match relative {
            Some((dx, dy)) => ansi::write_cursor_move(&mut self.buffer, dx, dy),
            None => ansi::write_cursor_position(&mut self.buffer, row, col),
        };

        self.cursor = Some((row, col));
    }

    pub fn set_fg(&mut self, color: Rgba) {
        if self.current_fg != Some(color) {
            let _ = ansi::write_fg_color_with_mode(&mut self.buffer, color, self.color_mode);
            self.current_fg = Some(color);
        }
    }

    /// Set the background; fully transparent maps to the terminal default.
    pub fn set_bg(&mut self, color: Rgba) {
        if self.current_bg == Some(color) {
            return;
        }
        if color.is_transparent() {
            if self.color_mode != ColorMode::NoColor {
                self.buffer.extend_from_slice(BG_DEFAULT);
            }
        } else {
            let _ = ansi::write_bg_color_with_mode(&mut self.buffer, color, self.color_mode);
        }
        self.current_bg = Some(color);
    }

    /// Set text attributes, only writing changes.
    pub fn set_attributes(&mut self, attrs: TextAttributes) {
        if self.current_attrs == attrs {
            return;
        }

        let removed = self.current_attrs - attrs;
        if !removed.is_empty() {
            let mut codes: Vec<&[u8]> = Vec::with_capacity(4);
            if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
                codes.push(b"22");
            }
            if removed.contains(TextAttributes::ITALIC) {
                codes.push(b"23");
            }
            if removed.contains(TextAttributes::UNDERLINE) {
                codes.push(b"24");
            }
            if removed.contains(TextAttributes::INVERSE) {
                codes.push(b"27");
            }

            self.buffer.extend_from_slice(b"\x1b[");
            for (i, code) in codes.iter().enumerate() {
                if i > 0 {
                    self.buffer.push(b';');
                }
                self.buffer.extend_from_slice(code);
            }
            self.buffer.push(b'm');

            // 22 clears bold and dim together.
            self.current_attrs -= removed;
            if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
                self.current_attrs -= TextAttributes::BOLD | TextAttributes::DIM;
            }
        }

        let to_add = attrs - self.current_attrs;
        if !to_add.is_empty() {
            let _ = ansi::write_attributes(&mut self.buffer, to_add);
        }
        self.current_attrs = attrs;
    }

    /// Write a cell at the current cursor position, resolving pooled glyphs.
    pub fn write_cell(&mut self, cell: &Cell, pool: &GlyphPool) {
        if cell.is_continuation() {
            return;
        }

        self.set_attributes(cell.attributes);
        self.set_fg(cell.fg);
        self.set_bg(cell.bg);

        match cell.content {
            CellContent::Char(c) => {
                let mut buf = [0u8; 4];
                self.buffer
                    .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            CellContent::Glyph(id) => match pool.get(id) {
                Some(glyph) => self.buffer.extend_from_slice(glyph.as_bytes()),
                None => self
                    .buffer
                    .extend(std::iter::repeat_n(b' ', id.width().max(1))),
            },
            CellContent::Empty => self.buffer.push(b' '),
            CellContent::Continuation => {}
        }

        // Terminals disagree on the width of multi-codepoint emoji.
        self.cursor = match cell.content {
            CellContent::Glyph(_) => None,
            _ => self.cursor.map(|(row, col)| {
                (row, col + u32::try_from(cell.display_width()).unwrap_or(1))
            }),
        };
    }

    /// Move to (row, col) and write a cell.
    pub fn write_cell_at(&mut self, row: u32, col: u32, cell: &Cell, pool: &GlyphPool) {
        self.move_cursor(row, col);
        self.write_cell(cell, pool);
    }

    /// Reset all attributes and colors.
    pub fn reset(&mut self) {
        self.write_str(ansi::RESET);
        self.current_fg = None;
        self.current_bg = None;
        self.current_attrs = TextAttributes::empty();
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()
    }

    /// Pending, unflushed bytes.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn digits(n: u64) -> usize {
    if n == 0 { 1 } else { (n.ilog10() + 1) as usize }
}

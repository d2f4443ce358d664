//! Cell-based frame buffer with alpha blending and scissoring.
//!
//! [`FrameBuffer`] is the drawing surface the picker renders into and the
//! renderer diffs against. It supports:
//!
//! - **Basic drawing**: set individual cells, draw text, draw boxes
//! - **Scissor clipping**: restrict drawing to rectangular regions
//! - **Alpha blending**: translucent fills tint what is already drawn
//!
//! # Examples
//!
//! ```
//! use emojipick::buffer::{FrameBuffer, Rect};
//! use emojipick::glyph_pool::GlyphPool;
//! use emojipick::{Rgba, Style};
//!
//! let mut pool = GlyphPool::new();
//! let mut buf = FrameBuffer::new(20, 3);
//! buf.clear(Rgba::BLACK);
//!
//! buf.push_scissor(Rect::new(0, 0, 10, 3).to_clip());
//! buf.draw_text(&mut pool, 0, 1, "grinning face 😀", Style::fg(Rgba::WHITE));
//! buf.pop_scissor();
//!
//! assert_eq!(buf.row_text(&pool, 1).trim_end(), "grinning f");
//! ```

mod drawing;
mod scissor;

pub use drawing::BoxStyle;
pub use scissor::{ClipRect, Rect, ScissorStack};

use crate::cell::{Cell, CellContent};
use crate::color::Rgba;
use crate::glyph_pool::GlyphPool;

/// Cell grid with a scissor stack.
///
/// Coordinates are (x, y) with (0, 0) at the top-left corner.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    scissor_stack: ScissorStack,
}

impl FrameBuffer {
    /// Create a new buffer. Zero dimensions are clamped to 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::clear(Rgba::TRANSPARENT); size],
            scissor_stack: ScissorStack::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whole-buffer area.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn cell_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?;
        (idx < self.cells.len()).then_some(idx)
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        self.cell_index(x, y).map(|idx| &self.cells[idx])
    }

    /// Whether drawing at (x, y) would land inside the buffer and scissor.
    #[must_use]
    pub fn is_visible(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        match (i32::try_from(x), i32::try_from(y)) {
            (Ok(x), Ok(y)) => self.scissor_stack.contains(x, y),
            _ => false,
        }
    }

    /// Replace the cell at position, respecting the scissor.
    ///
    /// Overwriting half of a wide glyph blanks the other half so no
    /// dangling continuation cell survives.
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        if !self.is_visible(x, y) {
            return;
        }
        if let Some(idx) = self.cell_index(x, y) {
            self.split_wide(idx, x, &cell);
            self.cells[idx] = cell;
        }
    }

    /// Composite the cell over the existing content.
    pub fn set_blended(&mut self, x: u32, y: u32, cell: Cell) {
        if !self.is_visible(x, y) {
            return;
        }
        if let Some(idx) = self.cell_index(x, y) {
            let blended = cell.blend_over(&self.cells[idx]);
            self.split_wide(idx, x, &blended);
            self.cells[idx] = blended;
        }
    }

    fn split_wide(&mut self, idx: usize, x: u32, incoming: &Cell) {
        let old = self.cells[idx];
        if old.content == incoming.content {
            return;
        }
        if old.is_continuation() && x > 0 {
            let lead = &mut self.cells[idx - 1];
            if lead.display_width() > 1 {
                lead.content = CellContent::Empty;
            }
        }
        if old.display_width() > 1 {
            if let Some(next) = self.cells.get_mut(idx + 1) {
                if next.is_continuation() && x + 1 < self.width {
                    next.content = CellContent::Empty;
                }
            }
        }
    }

    /// Clear the entire buffer with a background color.
    pub fn clear(&mut self, bg: Rgba) {
        self.cells.fill(Cell::clear(bg));
    }

    /// Fill a region with a background color.
    ///
    /// Opaque colors erase content; translucent colors tint it.
    pub fn fill_rect(&mut self, rect: Rect, bg: Rgba) {
        let clip = match self.scissor_stack.current().intersect(&rect.to_clip()) {
            Some(clip) => clip,
            None => return,
        };
        let cell = Cell::clear(bg);
        let opaque = bg.is_opaque();
        for y in clip.rows(self.height) {
            for x in clip.columns(self.width) {
                if opaque {
                    self.set(x, y, cell);
                } else {
                    self.set_blended(x, y, cell);
                }
            }
        }
    }

    pub fn push_scissor(&mut self, rect: ClipRect) {
        self.scissor_stack.push(rect);
    }

    pub fn pop_scissor(&mut self) {
        self.scissor_stack.pop();
    }

    /// Resize, discarding content.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Plain text of one row, resolving pooled glyphs.
    ///
    /// Continuation cells are skipped, so a wide glyph appears once.
    #[must_use]
    pub fn row_text(&self, pool: &GlyphPool, y: u32) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            let Some(cell) = self.get(x, y) else { break };
            match cell.content {
                CellContent::Char(c) => out.push(c),
                CellContent::Glyph(id) => out.push_str(pool.get(id).unwrap_or(" ")),
                CellContent::Empty => out.push(' '),
                CellContent::Continuation => {}
            }
        }
        out
    }
}

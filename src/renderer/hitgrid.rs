//! Hit testing grid for mouse events.

use crate::buffer::Rect;

/// Maps screen cells to the id of the widget part drawn there.
///
/// Later registrations overwrite earlier ones, so draw order decides
/// which part wins.
#[derive(Clone, Debug, Default)]
pub struct HitGrid {
    width: u32,
    height: u32,
    cells: Vec<Option<u32>>,
}

impl HitGrid {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![None; size],
        }
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

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Register `id` over an area, clipped to the grid.
    pub fn register(&mut self, area: Rect, id: u32) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                if let Some(idx) = self.cell_index(x, y) {
                    self.cells[idx] = Some(id);
                }
            }
        }
    }

    /// Id registered at a position, if any.
    #[must_use]
    pub fn test(&self, x: u32, y: u32) -> Option<u32> {
        self.cell_index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Resize, dropping all registrations.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

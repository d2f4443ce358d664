//! Frame diffing for incremental output.

use crate::buffer::FrameBuffer;

/// A horizontal run of changed cells on one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtySpan {
    pub x: u32,
    pub y: u32,
    pub width: u32,
}

/// Result of diffing two frames.
#[derive(Clone, Debug, Default)]
pub struct BufferDiff {
    /// Changed cells merged into per-row spans, in row-major order.
    pub spans: Vec<DirtySpan>,
    /// Total number of changed cells.
    pub change_count: usize,
    /// The frames had different sizes, so everything must be redrawn.
    pub size_changed: bool,
}

impl BufferDiff {
    /// Compare two frames cell by cell.
    #[must_use]
    pub fn compute(old: &FrameBuffer, new: &FrameBuffer) -> Self {
        if old.size() != new.size() {
            let (w, h) = new.size();
            return Self {
                spans: Vec::new(),
                change_count: (w as usize).saturating_mul(h as usize),
                size_changed: true,
            };
        }

        let (width, _) = new.size();
        let mut diff = Self::default();
        let mut open: Option<DirtySpan> = None;

        let rows = old.cells().chunks(width as usize).zip(new.cells().chunks(width as usize));
        for (y, (old_row, new_row)) in (0u32..).zip(rows) {
            for (x, (a, b)) in (0u32..).zip(old_row.iter().zip(new_row)) {
                if a.bits_eq(b) {
                    continue;
                }
                diff.change_count += 1;
                match open.as_mut() {
                    Some(span) if span.y == y && span.x + span.width == x => span.width += 1,
                    _ => {
                        diff.spans.extend(open.take());
                        open = Some(DirtySpan { x, y, width: 1 });
                    }
                }
            }
        }
        diff.spans.extend(open);
        diff
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.change_count == 0
    }

    /// A full redraw is cheaper once more than half the cells changed.
    #[must_use]
    pub fn should_full_redraw(&self, total_cells: usize) -> bool {
        self.size_changed || self.change_count > total_cells / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::color::Rgba;
    use crate::style::Style;

    #[test]
    fn test_identical_frames() {
        let a = FrameBuffer::new(10, 4);
        let b = FrameBuffer::new(10, 4);
        let diff = BufferDiff::compute(&a, &b);
        assert!(diff.is_empty());
        assert!(diff.spans.is_empty());
        assert!(!diff.should_full_redraw(40));
    }

    #[test]
    fn test_adjacent_changes_merge() {
        let a = FrameBuffer::new(10, 2);
        let mut b = FrameBuffer::new(10, 2);
        for x in 2..5 {
            b.set(x, 1, Cell::new('x', Style::NONE));
        }
        b.set(8, 1, Cell::new('y', Style::NONE));

        let diff = BufferDiff::compute(&a, &b);
        assert_eq!(diff.change_count, 4);
        assert_eq!(
            diff.spans,
            vec![
                DirtySpan { x: 2, y: 1, width: 3 },
                DirtySpan { x: 8, y: 1, width: 1 },
            ]
        );
    }

    #[test]
    fn test_spans_do_not_wrap_rows() {
        let a = FrameBuffer::new(3, 2);
        let mut b = FrameBuffer::new(3, 2);
        b.set(2, 0, Cell::clear(Rgba::BLACK));
        b.set(0, 1, Cell::clear(Rgba::BLACK));
        let diff = BufferDiff::compute(&a, &b);
        assert_eq!(diff.spans.len(), 2);
    }

    #[test]
    fn test_full_redraw_threshold() {
        let a = FrameBuffer::new(4, 1);
        let mut b = FrameBuffer::new(4, 1);
        b.clear(Rgba::BLACK);
        let diff = BufferDiff::compute(&a, &b);
        assert!(diff.should_full_redraw(4));
    }

    #[test]
    fn test_size_change_forces_redraw() {
        let diff = BufferDiff::compute(&FrameBuffer::new(4, 4), &FrameBuffer::new(5, 4));
        assert!(diff.size_changed);
        assert!(diff.should_full_redraw(20));
    }
}

//! Widget areas and the scissor (clipping) stack.

/// An on-screen area in cell coordinates.
///
/// Widgets are handed a `Rect` to draw into; it is converted to a
/// [`ClipRect`] when pushed onto the scissor stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the last column.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// Shrink by `n` cells on every side.
    #[must_use]
    pub const fn inset(&self, n: u32) -> Self {
        Self {
            x: self.x.saturating_add(n),
            y: self.y.saturating_add(n),
            width: self.width.saturating_sub(n.saturating_mul(2)),
            height: self.height.saturating_sub(n.saturating_mul(2)),
        }
    }

    /// The single row `dy` rows below the top edge.
    #[must_use]
    pub const fn row(&self, dy: u32) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_add(dy),
            width: self.width,
            height: 1,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clipping rectangle covering the same cells.
    #[must_use]
    pub fn to_clip(&self) -> ClipRect {
        ClipRect::new(
            i32::try_from(self.x).unwrap_or(i32::MAX),
            i32::try_from(self.y).unwrap_or(i32::MAX),
            self.width,
            self.height,
        )
    }
}

/// A clipping rectangle. Origins may be negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ClipRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this rectangle.
    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && py >= self.y
            && px < self.x.saturating_add_unsigned(self.width)
            && py < self.y.saturating_add_unsigned(self.height)
    }

    /// Intersection with another rectangle, or `None` when they are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self
            .x
            .saturating_add_unsigned(self.width)
            .min(other.x.saturating_add_unsigned(other.width));
        let y2 = self
            .y
            .saturating_add_unsigned(self.height)
            .min(other.y.saturating_add_unsigned(other.height));

        (x2 > x1 && y2 > y1).then(|| ClipRect {
            x: x1,
            y: y1,
            width: x2.abs_diff(x1),
            height: y2.abs_diff(y1),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Column span clamped to `[0, limit)`, as `start..end`.
    #[must_use]
    pub fn columns(&self, limit: u32) -> std::ops::Range<u32> {
        clamp_span(self.x, self.width, limit)
    }

    /// Row span clamped to `[0, limit)`, as `start..end`.
    #[must_use]
    pub fn rows(&self, limit: u32) -> std::ops::Range<u32> {
        clamp_span(self.y, self.height, limit)
    }
}

fn clamp_span(origin: i32, len: u32, limit: u32) -> std::ops::Range<u32> {
    let start = u32::try_from(origin.max(0)).unwrap_or(0).min(limit);
    let end = u32::try_from(origin.saturating_add_unsigned(len).max(0))
        .unwrap_or(0)
        .min(limit);
    start..end.max(start)
}

impl Default for ClipRect {
    fn default() -> Self {
        Self::new(0, 0, u32::MAX, u32::MAX)
    }
}

/// Stack of scissor rectangles; each push intersects with the current one.
#[derive(Clone, Debug, Default)]
pub struct ScissorStack {
    stack: Vec<ClipRect>,
    current: ClipRect,
}

impl ScissorStack {
    /// Create a new scissor stack with unbounded clipping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: ClipRect) {
        self.stack.push(self.current);
        self.current = self
            .current
            .intersect(&rect)
            .unwrap_or(ClipRect::new(0, 0, 0, 0));
    }

    pub fn pop(&mut self) {
        if let Some(rect) = self.stack.pop() {
            self.current = rect;
        }
    }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.current = ClipRect::default();
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.current.contains(x, y)
    }

    #[must_use]
    pub fn current(&self) -> ClipRect {
        self.current
    }
}

//! Cell geometry of the picker.
//!
//! The widget is split into fixed regions ([`WidgetRegions`]), and the
//! scrollable grid is laid out in content rows ([`GridLayout`]). Content
//! row 0 is the first section header. The scroll offset is the content row
//! shown at the top of the viewport.
//!
//! Tab boundaries come out of the same layout that drawing uses, so the
//! highlighted tab cannot drift from the rendered sections.

use crate::buffer::Rect;
use crate::group::Section;
use serde::{Deserialize, Serialize};

/// Smallest widget that still shows every region.
pub const MIN_WIDTH: u32 = 12;
pub const MIN_HEIGHT: u32 = 7;

/// Sizes of grid elements, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub card_width: u32,
    pub card_height: u32,
    pub header_height: u32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            card_width: 4,
            card_height: 1,
            header_height: 1,
        }
    }
}

impl LayoutMetrics {
    /// Metrics with every size at least 1.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            card_width: self.card_width.max(1),
            card_height: self.card_height.max(1),
            header_height: self.header_height.max(1),
        }
    }

    /// Whether one card and one header fit inside `grid`.
    #[must_use]
    pub fn fits(&self, grid: Rect) -> bool {
        self.card_width <= grid.width
            && self.card_height <= grid.height
            && self.header_height <= grid.height
    }
}

/// Fixed regions of the widget inside its border.
///
/// ```text
/// ╭──────────────╮
/// │ tabs         │
/// │ indicator    │
/// │ search       │
/// │ grid ...     │
/// │ footer       │
/// ╰──────────────╯
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetRegions {
    pub outer: Rect,
    pub tabs: Rect,
    pub indicator: Rect,
    pub search: Rect,
    pub grid: Rect,
    pub footer: Rect,
}

impl WidgetRegions {
    /// Split `area`, or `None` if it is smaller than [`MIN_WIDTH`] x
    /// [`MIN_HEIGHT`].
    #[must_use]
    pub fn compute(area: Rect) -> Option<Self> {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return None;
        }
        let inner = area.inset(1);
        let grid_height = inner.height - 4;
        Some(Self {
            outer: area,
            tabs: inner.row(0),
            indicator: inner.row(1),
            search: inner.row(2),
            grid: Rect::new(inner.x, inner.y + 3, inner.width, grid_height),
            footer: inner.row(inner.height - 1),
        })
    }

    /// Width of one tab slot; the tab bar holds `tab_count` of them.
    #[must_use]
    pub fn tab_slot_width(&self, tab_count: usize) -> u32 {
        match u32::try_from(tab_count) {
            Ok(n) if n > 0 => self.tabs.width / n,
            _ => self.tabs.width,
        }
    }

    /// Screen rect of tab `index`.
    #[must_use]
    pub fn tab_rect(&self, index: usize, tab_count: usize) -> Rect {
        let slot = self.tab_slot_width(tab_count);
        let x = self.tabs.x + slot * index as u32;
        Rect::new(x, self.tabs.y, slot, 1)
    }

    /// Which tab slot a screen column falls in.
    #[must_use]
    pub fn tab_at(&self, x: u32, y: u32, tab_count: usize) -> Option<usize> {
        if y != self.tabs.y || x < self.tabs.x {
            return None;
        }
        let slot = self.tab_slot_width(tab_count).max(1);
        let index = ((x - self.tabs.x) / slot) as usize;
        (index < tab_count).then_some(index)
    }
}

/// Where one section sits in content rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionPlacement {
    /// First row of the header.
    pub start: u32,
    /// First row of cards.
    pub cards_start: u32,
    /// One past the last row.
    pub end: u32,
    pub len: usize,
}

impl SectionPlacement {
    #[must_use]
    pub fn contains_row(&self, row: u32) -> bool {
        (self.start..self.end).contains(&row)
    }
}

/// A card hit by a content-space position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardSlot {
    pub section: usize,
    pub item: usize,
}

/// Row layout of all sections for a given grid width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    metrics: LayoutMetrics,
    columns: u32,
    pad_left: u32,
    sections: Vec<SectionPlacement>,
    total_rows: u32,
}

impl GridLayout {
    #[must_use]
    pub fn compute(sections: &[Section], grid_width: u32, metrics: LayoutMetrics) -> Self {
        let metrics = metrics.sanitized();
        let columns = (grid_width / metrics.card_width).max(1);
        let pad_left = grid_width.saturating_sub(columns.saturating_mul(metrics.card_width)) / 2;

        let mut row = 0u32;
        let placements = sections
            .iter()
            .map(|section| {
                let start = row;
                let cards_start = start.saturating_add(metrics.header_height);
                let card_rows = (section.len() as u32).div_ceil(columns);
                let end = cards_start.saturating_add(card_rows.saturating_mul(metrics.card_height));
                row = end;
                SectionPlacement {
                    start,
                    cards_start,
                    end,
                    len: section.len(),
                }
            })
            .collect();

        Self {
            metrics,
            columns,
            pad_left,
            sections: placements,
            total_rows: row,
        }
    }

    #[must_use]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    #[must_use]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Blank columns left of the first card, centering the grid.
    #[must_use]
    pub fn pad_left(&self) -> u32 {
        self.pad_left
    }

    #[must_use]
    pub fn total_rows(&self) -> u32 {
        self.total_rows
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionPlacement] {
        &self.sections
    }

    /// Scroll offset at which each section's header reaches the top.
    #[must_use]
    pub fn boundaries(&self) -> Vec<i32> {
        self.sections
            .iter()
            .map(|s| i32::try_from(s.start).unwrap_or(i32::MAX))
            .collect()
    }

    /// Largest useful scroll offset for a viewport of `viewport_rows`.
    #[must_use]
    pub fn max_scroll(&self, viewport_rows: u32) -> u32 {
        self.total_rows.saturating_sub(viewport_rows)
    }

    /// Section containing a content row.
    #[must_use]
    pub fn section_at(&self, row: u32) -> Option<usize> {
        self.sections.iter().position(|s| s.contains_row(row))
    }

    /// Content position (column offset inside the grid, row) of a card.
    #[must_use]
    pub fn card_origin(&self, section: usize, item: usize) -> Option<(u32, u32)> {
        let placement = self.sections.get(section)?;
        if item >= placement.len {
            return None;
        }
        let item = item as u32;
        let x = (item % self.columns)
            .saturating_mul(self.metrics.card_width)
            .saturating_add(self.pad_left);
        let y = (item / self.columns)
            .saturating_mul(self.metrics.card_height)
            .saturating_add(placement.cards_start);
        Some((x, y))
    }

    /// Card under a content position, where `x` is relative to the grid.
    #[must_use]
    pub fn card_at(&self, x: u32, row: u32) -> Option<CardSlot> {
        let section = self.section_at(row)?;
        let placement = self.sections[section];
        if row < placement.cards_start || x < self.pad_left {
            return None;
        }
        let column = (x - self.pad_left) / self.metrics.card_width;
        if column >= self.columns {
            return None;
        }
        let card_row = (row - placement.cards_start) / self.metrics.card_height;
        let item = (card_row * self.columns + column) as usize;
        (item < placement.len).then_some(CardSlot { section, item })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Category;

    fn section(len: usize) -> Section {
        Section {
            category: Some(Category::People),
            title: "People".to_string(),
            items: (0..len).collect(),
        }
    }

    // ============================================
    // Regions
    // ============================================

    #[test]
    fn test_regions() {
        let regions = WidgetRegions::compute(Rect::new(2, 1, 44, 24)).unwrap();
        assert_eq!(regions.tabs, Rect::new(3, 2, 42, 1));
        assert_eq!(regions.indicator.y, 3);
        assert_eq!(regions.search.y, 4);
        assert_eq!(regions.grid, Rect::new(3, 5, 42, 18));
        assert_eq!(regions.footer, Rect::new(3, 23, 42, 1));
    }

    #[test]
    fn test_regions_too_small() {
        assert!(WidgetRegions::compute(Rect::new(0, 0, MIN_WIDTH - 1, 20)).is_none());
        assert!(WidgetRegions::compute(Rect::new(0, 0, 40, MIN_HEIGHT - 1)).is_none());
        let tiny = WidgetRegions::compute(Rect::new(0, 0, MIN_WIDTH, MIN_HEIGHT)).unwrap();
        assert_eq!(tiny.grid.height, 1);
    }

    #[test]
    fn test_tab_slots() {
        let regions = WidgetRegions::compute(Rect::new(0, 0, 42, 20)).unwrap();
        assert_eq!(regions.tab_slot_width(8), 5);
        assert_eq!(regions.tab_rect(2, 8), Rect::new(11, 1, 5, 1));
        assert_eq!(regions.tab_at(11, 1, 8), Some(2));
        assert_eq!(regions.tab_at(15, 1, 8), Some(2));
        assert_eq!(regions.tab_at(16, 1, 8), Some(3));
        assert_eq!(regions.tab_at(40, 1, 8), Some(7));
        assert_eq!(regions.tab_at(41, 1, 8), None);
        assert_eq!(regions.tab_at(11, 2, 8), None);
    }

    // ============================================
    // Grid
    // ============================================

    #[test]
    fn test_section_rows_and_boundaries() {
        // 10 columns of 4 cells in a 42-wide grid.
        let sections = [section(25), section(0), section(10)];
        let layout = GridLayout::compute(&sections, 42, LayoutMetrics::default());
        assert_eq!(layout.columns(), 10);
        assert_eq!(layout.pad_left(), 1);
        // 1 header + 3 card rows, then an empty section (header only), then 1 + 1.
        assert_eq!(layout.boundaries(), vec![0, 4, 5]);
        assert_eq!(layout.total_rows(), 7);
        assert_eq!(layout.max_scroll(3), 4);
        assert_eq!(layout.max_scroll(30), 0);
    }

    #[test]
    fn test_taller_metrics() {
        let metrics = LayoutMetrics {
            card_width: 6,
            card_height: 2,
            header_height: 2,
        };
        let layout = GridLayout::compute(&[section(7), section(1)], 18, metrics);
        assert_eq!(layout.columns(), 3);
        // 2 header rows + 3 card rows * 2.
        assert_eq!(layout.boundaries(), vec![0, 8]);
        assert_eq!(layout.total_rows(), 12);
    }

    #[test]
    fn test_zero_metrics_are_sanitized() {
        let metrics = LayoutMetrics {
            card_width: 0,
            card_height: 0,
            header_height: 0,
        };
        let layout = GridLayout::compute(&[section(3)], 2, metrics);
        assert_eq!(
            layout.metrics(),
            LayoutMetrics {
                card_width: 1,
                card_height: 1,
                header_height: 1
            }
        );
        assert_eq!(layout.columns(), 2);
    }

    #[test]
    fn test_huge_metrics_saturate() {
        let metrics = LayoutMetrics {
            card_width: 1,
            card_height: u32::MAX / 2,
            header_height: u32::MAX / 2,
        };
        let layout = GridLayout::compute(&[section(3), section(3)], 1, metrics);
        assert_eq!(layout.total_rows(), u32::MAX);
        assert_eq!(layout.boundaries()[1], i32::MAX);
        assert_eq!(layout.card_origin(1, 2), Some((0, u32::MAX)));
    }

    #[test]
    fn test_metrics_fit_grid() {
        let grid = Rect::new(1, 4, 42, 18);
        assert!(LayoutMetrics::default().fits(grid));
        let tall = LayoutMetrics {
            card_height: 19,
            ..LayoutMetrics::default()
        };
        assert!(!tall.fits(grid));
        let wide = LayoutMetrics {
            card_width: 43,
            ..LayoutMetrics::default()
        };
        assert!(!wide.fits(grid));
    }

    #[test]
    fn test_card_origin_and_card_at_agree() {
        let sections = [section(25), section(10)];
        let layout = GridLayout::compute(&sections, 42, LayoutMetrics::default());
        for (s, len) in [(0usize, 25usize), (1, 10)] {
            for item in 0..len {
                let (x, y) = layout.card_origin(s, item).unwrap();
                assert_eq!(layout.card_at(x, y), Some(CardSlot { section: s, item }));
                assert_eq!(layout.card_at(x + 3, y), Some(CardSlot { section: s, item }));
            }
        }
        assert!(layout.card_origin(0, 25).is_none());
    }

    #[test]
    fn test_card_at_misses() {
        let layout = GridLayout::compute(&[section(25)], 42, LayoutMetrics::default());
        // Header row.
        assert_eq!(layout.card_at(5, 0), None);
        // Left padding.
        assert_eq!(layout.card_at(0, 1), None);
        // Past the last card on a partial row.
        assert_eq!(layout.card_at(1 + 4 * 5, 3), None);
        // Right of the last column.
        assert_eq!(layout.card_at(41, 1), None);
        // Below everything.
        assert_eq!(layout.card_at(5, 100), None);
    }

    #[test]
    fn test_section_at() {
        let sections = [section(5), section(5)];
        let layout = GridLayout::compute(&sections, 20, LayoutMetrics::default());
        assert_eq!(layout.section_at(0), Some(0));
        assert_eq!(layout.section_at(1), Some(0));
        assert_eq!(layout.section_at(2), Some(1));
        assert_eq!(layout.section_at(4), None);
    }

    #[test]
    fn test_metrics_serde_defaults() {
        let metrics: LayoutMetrics = serde_json::from_str(r#"{"card_width": 6}"#).unwrap();
        assert_eq!(metrics.card_width, 6);
        assert_eq!(metrics.card_height, 1);
    }
}

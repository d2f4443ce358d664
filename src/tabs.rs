//! Mapping between scroll offsets and category tabs.
//!
//! `boundaries[i]` is the scroll offset (in rows) at which section `i`
//! starts. The list is ascending and comes from
//! [`GridLayout`](crate::layout::GridLayout), so it always matches what is
//! actually drawn.
//!
//! ```
//! use emojipick::tabs::{active_tab_for_offset, offset_for_tab};
//!
//! let boundaries = [0, 10, 25, 40];
//! assert_eq!(active_tab_for_offset(0, &boundaries), 0);
//! assert_eq!(active_tab_for_offset(12, &boundaries), 1);
//! assert_eq!(active_tab_for_offset(25, &boundaries), 2);
//! assert_eq!(active_tab_for_offset(1000, &boundaries), 3);
//! assert_eq!(offset_for_tab(2, &boundaries), 25);
//! ```

/// Index of the last section whose boundary is at or before `offset`.
///
/// Offsets at or below zero, or before the first boundary, map to the
/// first tab. Offsets past the last boundary map to the last tab. An empty
/// boundary list maps everything to 0.
#[must_use]
pub fn active_tab_for_offset(offset: i32, boundaries: &[i32]) -> usize {
    if offset <= 0 {
        return 0;
    }
    boundaries
        .partition_point(|&start| start <= offset)
        .saturating_sub(1)
}

/// Scroll offset that brings the tab's section to the top.
///
/// Out-of-range indices clamp to the last tab.
#[must_use]
pub fn offset_for_tab(index: usize, boundaries: &[i32]) -> i32 {
    match boundaries.len() {
        0 => 0,
        len => boundaries[index.min(len - 1)],
    }
}

//! The emoji picker widget.
//!
//! [`EmojiPicker`] borrows a [`Dataset`] and owns everything else: the
//! query, the visible sections and their layout, scroll position, the
//! polled active tab and the hovered card. It is driven by three calls:
//!
//! - [`handle_event`](EmojiPicker::handle_event) for keys, paste and mouse
//! - [`tick`](EmojiPicker::tick) to sample the scroll offset for the tab bar
//! - [`render`](EmojiPicker::render) to draw into a frame buffer
//!
//! ```
//! use emojipick::dataset::Dataset;
//! use emojipick::input::{Event, KeyEvent};
//! use emojipick::picker::{EmojiPicker, PickerOptions, PickerOutcome};
//!
//! let mut picker = EmojiPicker::new(Dataset::builtin(), PickerOptions::default()).unwrap();
//! for c in "grin".chars() {
//!     picker.handle_event(&Event::Key(KeyEvent::char(c)));
//! }
//! assert!(picker.is_searching());
//! assert!(picker.results_len() > 0);
//!
//! let outcome = picker.handle_event(&Event::Key(KeyEvent::key(emojipick::input::KeyCode::Enter)));
//! assert!(matches!(outcome, PickerOutcome::Selected(_)));
//! ```

mod render;

use crate::buffer::Rect;
use crate::dataset::{Category, Dataset, EmojiRecord};
use crate::error::{Error, Result};
use crate::group::{Section, sections_for};
use crate::input::{Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use crate::layout::{GridLayout, LayoutMetrics, WidgetRegions};
use crate::search::FilteredView;
use crate::tabs::{active_tab_for_offset, offset_for_tab};
use crate::theme::{HoverVariants, Theme, ThemeMode};
use crate::unicode::pop_grapheme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

/// Rows scrolled per mouse wheel notch.
pub const WHEEL_ROWS: u32 = 3;

const TAB_COUNT: usize = Category::ALL.len();

/// Host-facing configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    pub theme: ThemeMode,
    /// Widget width in cells.
    pub width: u32,
    /// Widget height in cells.
    pub height: u32,
    pub metrics: LayoutMetrics,
    /// How often the scroll offset is sampled for tab highlighting.
    pub poll_interval_ms: u64,
    /// Seed for the per-card hover colors.
    pub hover_seed: u64,
    /// Footer text shown when nothing is hovered.
    pub brand: String,
    pub search_placeholder: String,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
            width: 44,
            height: 24,
            metrics: LayoutMetrics::default(),
            poll_interval_ms: 100,
            hover_seed: 0,
            brand: "Max Emoji™".to_string(),
            search_placeholder: "Search".to_string(),
        }
    }
}

impl PickerOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path.as_ref())?)
    }

    /// Reject sizes too small to lay out every region, and card or header
    /// sizes larger than the grid.
    pub fn validate(&self) -> Result<()> {
        let area = Rect::new(0, 0, self.width, self.height);
        let Some(regions) = WidgetRegions::compute(area) else {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        };
        if !self.metrics.fits(regions.grid) {
            return Err(Error::InvalidMetrics {
                card_width: self.metrics.card_width,
                card_height: self.metrics.card_height,
                header_height: self.metrics.header_height,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// What the host should do after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerOutcome {
    Continue,
    /// An emoji was chosen; holds the glyph.
    Selected(String),
    /// Escape with an empty query.
    Dismissed,
}

/// The card under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hover {
    /// Dataset index.
    pub record: usize,
    pub x: u32,
    pub y: u32,
}

/// What occupies a screen cell, as far as the picker is concerned.
///
/// Also encoded into [`HitGrid`](crate::renderer::HitGrid) ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerHit {
    /// Card for a dataset index.
    Card(usize),
    Tab(usize),
}

const HIT_KIND_MASK: u32 = 0xF000_0000;
const HIT_CARD: u32 = 0x1000_0000;
const HIT_TAB: u32 = 0x2000_0000;

impl PickerHit {
    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            Self::Card(record) => HIT_CARD | (record as u32 & !HIT_KIND_MASK),
            Self::Tab(index) => HIT_TAB | (index as u32 & !HIT_KIND_MASK),
        }
    }

    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        let index = (id & !HIT_KIND_MASK) as usize;
        match id & HIT_KIND_MASK {
            HIT_CARD => Some(Self::Card(index)),
            HIT_TAB => Some(Self::Tab(index)),
            _ => None,
        }
    }
}

type Callback<'a> = Box<dyn FnMut(&str) + 'a>;

/// Searchable, categorized emoji grid.
pub struct EmojiPicker<'a> {
    dataset: &'a Dataset,
    options: PickerOptions,
    theme: Theme,
    hover_variants: HoverVariants,

    view: FilteredView,
    sections: Vec<Section>,
    layout: GridLayout,
    boundaries: Vec<i32>,
    area: Rect,
    regions: Option<WidgetRegions>,

    scroll_offset: u32,
    polled_offset: u32,
    active_tab: usize,
    last_poll: Option<Instant>,
    hovered: Option<Hover>,

    on_select: Option<Callback<'a>>,
    on_hover: Option<Callback<'a>>,
}

impl<'a> EmojiPicker<'a> {
    /// Create a picker placed at the origin with the configured size.
    pub fn new(dataset: &'a Dataset, options: PickerOptions) -> Result<Self> {
        options.validate()?;
        let area = Rect::new(0, 0, options.width, options.height);
        let view = FilteredView::new(dataset.records());
        let sections = sections_for(&view, dataset.records());
        let regions = WidgetRegions::compute(area);
        let grid_width = regions.map_or(0, |r| r.grid.width);
        let layout = GridLayout::compute(&sections, grid_width, options.metrics);
        let boundaries = layout.boundaries();

        Ok(Self {
            dataset,
            theme: Theme::for_mode(options.theme),
            hover_variants: HoverVariants::seeded(options.hover_seed, dataset.len()),
            options,
            view,
            sections,
            layout,
            boundaries,
            area,
            regions,
            scroll_offset: 0,
            polled_offset: 0,
            active_tab: 0,
            last_poll: None,
            hovered: None,
            on_select: None,
            on_hover: None,
        })
    }

    /// Called with the glyph when an emoji is chosen.
    #[must_use]
    pub fn on_select(mut self, callback: impl FnMut(&str) + 'a) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    /// Called with the description when the hovered emoji changes.
    #[must_use]
    pub fn on_hover(mut self, callback: impl FnMut(&str) + 'a) -> Self {
        self.on_hover = Some(Box::new(callback));
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.options.theme = mode;
        self.theme = Theme::for_mode(mode);
    }

    #[must_use]
    pub fn query(&self) -> &str {
        self.view.query()
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.view.is_searching()
    }

    /// Number of records the current query selects.
    #[must_use]
    pub fn results_len(&self) -> usize {
        self.view.len()
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Scroll offsets at which each section starts.
    #[must_use]
    pub fn boundaries(&self) -> &[i32] {
        &self.boundaries
    }

    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    #[must_use]
    pub fn regions(&self) -> Option<&WidgetRegions> {
        self.regions.as_ref()
    }

    #[must_use]
    pub fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    /// Offset seen by the last poll.
    #[must_use]
    pub fn polled_offset(&self) -> u32 {
        self.polled_offset
    }

    #[must_use]
    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    #[must_use]
    pub fn hover(&self) -> Option<Hover> {
        self.hovered
    }

    #[must_use]
    pub fn hovered_record(&self) -> Option<&'a EmojiRecord> {
        self.hovered.and_then(|h| self.dataset.get(h.record))
    }

    /// Rows of grid visible at once.
    #[must_use]
    pub fn viewport_rows(&self) -> u32 {
        self.regions.map_or(0, |r| r.grid.height)
    }

    #[must_use]
    pub fn max_scroll(&self) -> u32 {
        self.layout.max_scroll(self.viewport_rows())
    }

    // ------------------------------------------------------------------
    // State changes
    // ------------------------------------------------------------------

    /// Move or resize the widget. Relayout happens only on width change.
    pub fn set_area(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        let width_changed = area.width != self.area.width;
        self.area = area;
        self.regions = WidgetRegions::compute(area);
        if width_changed {
            self.relayout();
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        self.sync_active_tab();
    }

    fn relayout(&mut self) {
        let grid_width = self.regions.map_or(0, |r| r.grid.width);
        self.layout = GridLayout::compute(&self.sections, grid_width, self.options.metrics);
        self.boundaries = self.layout.boundaries();
    }

    /// Replace the query, rebuilding sections and resetting scroll.
    pub fn set_query(&mut self, query: &str) {
        if !self.view.set_query(query, self.dataset.records()) {
            return;
        }
        self.sections = sections_for(&self.view, self.dataset.records());
        self.relayout();
        self.scroll_offset = 0;
        self.polled_offset = 0;
        self.active_tab = 0;
        self.hovered = None;
    }

    pub fn scroll_to(&mut self, offset: u32) {
        self.scroll_offset = offset.min(self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let target = i64::from(self.scroll_offset).saturating_add(delta).max(0);
        self.scroll_to(u32::try_from(target).unwrap_or(u32::MAX));
    }

    /// Scroll to a category and highlight the tab under the landed offset
    /// right away. Near the end the offset is clamped, so the highlighted
    /// tab can be an earlier one.
    ///
    /// An active search is cleared first so the category exists.
    pub fn jump_to_tab(&mut self, index: usize) {
        let index = index.min(TAB_COUNT - 1);
        if self.is_searching() {
            self.set_query("");
        }
        self.scroll_to(self.tab_offset(index));
        self.sync_active_tab();
        tracing::debug!(
            tab = index,
            offset = self.scroll_offset,
            active = self.active_tab,
            "jumped to category"
        );
    }

    /// Scroll offset a jump to `index` lands on, after clamping.
    fn tab_offset(&self, index: usize) -> u32 {
        let offset = offset_for_tab(index, &self.boundaries).max(0) as u32;
        offset.min(self.max_scroll())
    }

    /// Sample the scroll offset now and derive the highlighted tab from it.
    fn sync_active_tab(&mut self) {
        self.polled_offset = self.scroll_offset;
        if !self.is_searching() {
            let offset = i32::try_from(self.scroll_offset).unwrap_or(i32::MAX);
            self.active_tab = active_tab_for_offset(offset, &self.boundaries);
        }
    }

    /// Sample the scroll offset if the poll interval has elapsed.
    ///
    /// Returns `true` when the highlighted tab changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let interval = self.options.poll_interval();
        let due = self
            .last_poll
            .is_none_or(|last| now.duration_since(last) >= interval);
        if !due {
            return false;
        }
        self.last_poll = Some(now);
        if self.polled_offset == self.scroll_offset {
            return false;
        }
        let previous = self.active_tab;
        self.sync_active_tab();
        tracing::trace!(offset = self.polled_offset, "scroll offset polled");
        self.active_tab != previous
    }

    fn set_hover(&mut self, hover: Option<Hover>) {
        let previous = self.hovered.map(|h| h.record);
        self.hovered = hover;
        let Some(hover) = hover else { return };
        if previous == Some(hover.record) {
            return;
        }
        if let (Some(record), Some(callback)) =
            (self.dataset.get(hover.record), self.on_hover.as_mut())
        {
            callback(&record.description);
        }
    }

    fn select(&mut self, record: usize) -> PickerOutcome {
        let Some(record) = self.dataset.get(record) else {
            return PickerOutcome::Continue;
        };
        tracing::debug!(emoji = %record.emoji, alias = record.primary_alias(), "emoji selected");
        if let Some(callback) = self.on_select.as_mut() {
            callback(&record.emoji);
        }
        PickerOutcome::Selected(record.emoji.clone())
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Section whose header is pinned over the first grid row, if any.
    fn sticky_section(&self) -> Option<usize> {
        let section = self.layout.section_at(self.scroll_offset)?;
        let placement = self.layout.sections()[section];
        (placement.start < self.scroll_offset).then_some(section)
    }

    /// What is drawn at a screen cell, by geometry.
    #[must_use]
    pub fn hit_test(&self, x: u32, y: u32) -> Option<PickerHit> {
        let regions = self.regions?;
        if let Some(tab) = regions.tab_at(x, y, TAB_COUNT) {
            return Some(PickerHit::Tab(tab));
        }
        if !regions.grid.contains(x, y) {
            return None;
        }
        let view_row = y - regions.grid.y;
        if view_row == 0 && self.sticky_section().is_some() {
            return None;
        }
        let slot = self
            .layout
            .card_at(x - regions.grid.x, self.scroll_offset + view_row)?;
        let record = *self.sections.get(slot.section)?.items.get(slot.item)?;
        Some(PickerHit::Card(record))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn handle_event(&mut self, event: &Event) -> PickerOutcome {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Paste(text) => {
                let clean: String = text.chars().filter(|c| !c.is_control()).collect();
                if !clean.is_empty() {
                    let query = format!("{}{clean}", self.query());
                    self.set_query(&query);
                }
                PickerOutcome::Continue
            }
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Resize { .. } | Event::FocusGained | Event::FocusLost => {
                PickerOutcome::Continue
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome {
        if let Some(c) = key.typed_char() {
            let mut query = self.query().to_string();
            query.push(c);
            self.set_query(&query);
            return PickerOutcome::Continue;
        }
        if key.is_ctrl('u') {
            self.set_query("");
            return PickerOutcome::Continue;
        }

        let page = i64::from(self.viewport_rows().max(1));
        match key.code {
            KeyCode::Backspace => {
                let mut query = self.query().to_string();
                if pop_grapheme(&mut query) {
                    self.set_query(&query);
                }
            }
            KeyCode::Esc if self.is_searching() => self.set_query(""),
            KeyCode::Esc => return PickerOutcome::Dismissed,
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home => self.scroll_to(0),
            KeyCode::End => self.scroll_to(u32::MAX),
            KeyCode::Tab => {
                // Tab offsets never decrease, so the first one below the
                // view is the next category. None left wraps to the top.
                let next = if self.is_searching() {
                    0
                } else {
                    (0..TAB_COUNT)
                        .find(|&i| self.tab_offset(i) > self.scroll_offset)
                        .unwrap_or(0)
                };
                self.jump_to_tab(next);
            }
            KeyCode::BackTab => {
                let previous = if self.is_searching() {
                    TAB_COUNT - 1
                } else {
                    (0..TAB_COUNT)
                        .rev()
                        .find(|&i| self.tab_offset(i) < self.scroll_offset)
                        .unwrap_or(TAB_COUNT - 1)
                };
                self.jump_to_tab(previous);
            }
            KeyCode::Enter => {
                let first_result = || {
                    self.is_searching()
                        .then(|| self.view.indices().first().copied())
                        .flatten()
                };
                let target = self.hovered.map(|h| h.record).or_else(first_result);
                if let Some(record) = target {
                    return self.select(record);
                }
            }
            _ => {}
        }
        PickerOutcome::Continue
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> PickerOutcome {
        let inside = self.area.contains(mouse.x, mouse.y);
        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown if inside => {
                self.scroll_by(i64::from(mouse.wheel_delta()) * i64::from(WHEEL_ROWS));
            }
            MouseEventKind::Move => match self.hit_test(mouse.x, mouse.y) {
                Some(PickerHit::Card(record)) => self.set_hover(Some(Hover {
                    record,
                    x: mouse.x,
                    y: mouse.y,
                })),
                _ if !inside => self.set_hover(None),
                _ => {}
            },
            MouseEventKind::Press if mouse.is_left_press() => {
                match self.hit_test(mouse.x, mouse.y) {
                    Some(PickerHit::Card(record)) => return self.select(record),
                    Some(PickerHit::Tab(tab)) => self.jump_to_tab(tab),
                    None => {}
                }
            }
            _ => {}
        }
        PickerOutcome::Continue
    }
}

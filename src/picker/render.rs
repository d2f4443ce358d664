//! Drawing the picker into a frame buffer.

use super::{EmojiPicker, PickerHit, TAB_COUNT};
use crate::buffer::{BoxStyle, FrameBuffer, Rect};
use crate::dataset::Category;
use crate::glyph_pool::GlyphPool;
use crate::layout::WidgetRegions;
use crate::renderer::{Frame, HitGrid};
use crate::style::{Style, TextAttributes};
use crate::unicode::{display_width, truncate_to_width};

const SEARCH_ICON: &str = "🔍";
const NO_RESULTS: &str = "No emoji found";
const INDICATOR: char = '━';
const INDICATOR_TRACK: char = '─';

impl EmojiPicker<'_> {
    /// Draw into a renderer frame.
    pub fn draw(&mut self, frame: Frame<'_>, area: Rect) {
        self.render(frame.buffer, frame.pool, frame.hits, area);
    }

    /// Draw the whole widget into `area` and register its hit areas.
    ///
    /// Moving or resizing `area` between calls is allowed; the layout
    /// follows.
    pub fn render(
        &mut self,
        buffer: &mut FrameBuffer,
        pool: &mut GlyphPool,
        hits: &mut HitGrid,
        area: Rect,
    ) {
        self.set_area(area);
        buffer.push_scissor(area.to_clip());
        buffer.fill_rect(area, self.theme.background);

        if let Some(regions) = self.regions {
            let border = self.theme.border.blend_over(self.theme.background);
            buffer.draw_box(regions.outer, BoxStyle::rounded(Style::fg(border)));
            self.draw_tabs(buffer, pool, hits, &regions);
            self.draw_search(buffer, pool, &regions);
            self.draw_grid(buffer, pool, hits, &regions);
            self.draw_footer(buffer, pool, &regions);
        }

        buffer.pop_scissor();
    }

    fn draw_tabs(
        &self,
        buffer: &mut FrameBuffer,
        pool: &mut GlyphPool,
        hits: &mut HitGrid,
        regions: &WidgetRegions,
    ) {
        let searching = self.is_searching();
        let indicator_y = regions.indicator.y;
        buffer.draw_hline(
            regions.indicator.x,
            indicator_y,
            regions.indicator.width,
            INDICATOR_TRACK,
            Style::fg(self.theme.tab_disabled),
        );

        for (index, category) in Category::ALL.iter().enumerate() {
            let slot = regions.tab_rect(index, TAB_COUNT);
            let icon = category.icon();
            let width = display_width(icon) as u32;
            let x = slot.x + slot.width.saturating_sub(width) / 2;

            let active = !searching && index == self.active_tab;
            let style = if active {
                Style::fg(self.theme.tab_enabled)
            } else {
                Style::fg(self.theme.tab_disabled).with_attributes(TextAttributes::DIM)
            };
            if slot.width >= width {
                buffer.draw_text(pool, x, slot.y, icon, style);
            }
            if active {
                buffer.draw_hline(
                    slot.x,
                    indicator_y,
                    slot.width,
                    INDICATOR,
                    Style::fg(self.theme.tab_enabled),
                );
            }
            hits.register(slot, PickerHit::Tab(index).id());
        }
    }

    fn draw_search(&self, buffer: &mut FrameBuffer, pool: &mut GlyphPool, regions: &WidgetRegions) {
        let row = regions.search;
        let mut x = row.x + 1;
        x += buffer.draw_text(pool, x, row.y, SEARCH_ICON, Style::fg(self.theme.search_icon));
        x += 1;

        let available = row.right().saturating_sub(x) as usize;
        let (text, style) = if self.is_searching() {
            (self.query(), Style::fg(self.theme.query_fg))
        } else {
            (
                self.options.search_placeholder.as_str(),
                Style::fg(self.theme.search_icon).with_italic(),
            )
        };
        buffer.draw_text(pool, x, row.y, truncate_to_width(text, available), style);
    }

    fn draw_grid(
        &self,
        buffer: &mut FrameBuffer,
        pool: &mut GlyphPool,
        hits: &mut HitGrid,
        regions: &WidgetRegions,
    ) {
        let grid = regions.grid;
        let metrics = self.layout.metrics();
        let top = self.scroll_offset;
        let bottom = top + grid.height;
        let sticky = self.sticky_section();
        let title_style = Style::fg(self.theme.header_fg).with_bold();
        let hovered = self.hovered.map(|h| h.record);

        buffer.push_scissor(grid.to_clip());

        for (index, placement) in self.layout.sections().iter().enumerate() {
            if placement.end <= top || placement.start >= bottom {
                continue;
            }
            let Some(section) = self.sections.get(index) else {
                continue;
            };

            if placement.start >= top {
                let y = grid.y + placement.start - top;
                let height = metrics.header_height.min(bottom - placement.start);
                buffer.fill_rect(Rect::new(grid.x, y, grid.width, height), self.theme.header_bg);
                buffer.draw_text(pool, grid.x + 1, y, &section.title, title_style);
            }

            for (item, &record_index) in section.items.iter().enumerate() {
                let Some((cx, cy)) = self.layout.card_origin(index, item) else {
                    continue;
                };
                let y0 = cy.max(top);
                let y1 = cy.saturating_add(metrics.card_height).min(bottom);
                if y0 >= y1 {
                    continue;
                }
                let Some(record) = self.dataset.get(record_index) else {
                    continue;
                };
                let card = Rect::new(
                    grid.x.saturating_add(cx),
                    grid.y + y0 - top,
                    metrics.card_width,
                    y1 - y0,
                );

                if hovered == Some(record_index) {
                    let variant = self.hover_variants.get(record_index);
                    buffer.fill_rect(card, self.theme.hover_color(variant));
                }

                let glyph_row = cy.saturating_add((metrics.card_height - 1) / 2);
                if (top..bottom).contains(&glyph_row) {
                    let width = display_width(&record.emoji) as u32;
                    let x = card.x + metrics.card_width.saturating_sub(width) / 2;
                    buffer.draw_text(pool, x, grid.y + glyph_row - top, &record.emoji, Style::NONE);
                }

                let hit_area = if sticky.is_some() && card.y == grid.y {
                    Rect::new(card.x, card.y + 1, card.width, card.height - 1)
                } else {
                    card
                };
                if !hit_area.is_empty() {
                    hits.register(hit_area, PickerHit::Card(record_index).id());
                }
            }
        }

        if let Some(section) = sticky.and_then(|s| self.sections.get(s)) {
            buffer.fill_rect(grid.row(0), self.theme.sticky_header_bg());
            buffer.draw_text(pool, grid.x + 1, grid.y, &section.title, title_style);
        }

        if self.is_searching() && self.view.is_empty() && grid.height > metrics.header_height {
            let width = display_width(NO_RESULTS) as u32;
            let x = grid.x + grid.width.saturating_sub(width) / 2;
            buffer.draw_text(
                pool,
                x,
                grid.y + metrics.header_height,
                NO_RESULTS,
                Style::fg(self.theme.tab_disabled),
            );
        }

        buffer.pop_scissor();
    }

    fn draw_footer(&self, buffer: &mut FrameBuffer, pool: &mut GlyphPool, regions: &WidgetRegions) {
        let row = regions.footer;
        buffer.fill_rect(row, self.theme.footer_bg);
        let mut x = row.x + 1;

        let Some(record) = self.hovered_record() else {
            let available = row.right().saturating_sub(x) as usize;
            buffer.draw_text(
                pool,
                x,
                row.y,
                truncate_to_width(&self.options.brand, available),
                Style::fg(self.theme.brand_fg),
            );
            return;
        };

        x += buffer.draw_text(pool, x, row.y, &record.emoji, Style::NONE);
        x += 1;
        let available = row.right().saturating_sub(x) as usize;
        let label = format!("{} :{}:", record.description, record.primary_alias());
        buffer.draw_text(
            pool,
            x,
            row.y,
            truncate_to_width(&label, available),
            Style::fg(self.theme.description_fg),
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::picker::tests_support::{dataset, options};
    use super::*;
    use crate::cell::CellContent;
    use crate::color::Rgba;
    use crate::input::{Event, KeyEvent, MouseEvent};

    struct Canvas {
        buffer: FrameBuffer,
        pool: GlyphPool,
        hits: HitGrid,
    }

    impl Canvas {
        fn new() -> Self {
            let mut buffer = FrameBuffer::new(24, 12);
            buffer.clear(Rgba::BLACK);
            Self {
                buffer,
                pool: GlyphPool::new(),
                hits: HitGrid::new(24, 12),
            }
        }

        fn draw(&mut self, picker: &mut EmojiPicker<'_>) {
            self.hits.clear();
            picker.render(&mut self.buffer, &mut self.pool, &mut self.hits, Rect::new(0, 0, 24, 12));
        }

        fn row(&self, y: u32) -> String {
            self.buffer.row_text(&self.pool, y)
        }
    }

    // ============================================
    // Chrome
    // ============================================

    #[test]
    fn test_border_and_brand() {
        let data = dataset();
        let mut picker = EmojiPicker::new(&data, options()).unwrap();
        let mut canvas = Canvas::new();
        canvas.draw(&mut picker);

        assert!(canvas.row(0).starts_with('╭'));
        assert!(canvas.row(11).starts_with('╰'));
        assert!(canvas.row(3).contains("Search"));
        assert!(canvas.row(10).contains("Max Emoji™"));
        assert!(canvas.row(4).contains("People"));
    }

    #[test]
    fn test_tabs_and_indicator() {
        let data = dataset();
        let mut picker = EmojiPicker::new(&data, options()).unwrap();
        let mut canvas = Canvas::new();
        canvas.draw(&mut picker);

        assert_eq!(canvas.hits.test(1, 1), Some(PickerHit::Tab(0).id()));
        assert_eq!(canvas.hits.test(16, 1), Some(PickerHit::Tab(7).id()));
        let row = canvas.row(1);
        for category in Category::ALL {
            assert!(row.contains(category.icon()), "missing {category}");
        }

        let active = canvas.buffer.get(1, 2).copied().unwrap_or_default();
        assert_eq!(active.content, CellContent::Char(INDICATOR));
        let idle = canvas.buffer.get(3, 2).copied().unwrap_or_default();
        assert_eq!(idle.content, CellContent::Char(INDICATOR_TRACK));

        let first = canvas.buffer.get(1, 1).copied().unwrap_or_default();
        let second = canvas.buffer.get(3, 1).copied().unwrap_or_default();
        assert!(!first.attributes.contains(TextAttributes::DIM));
        assert!(second.attributes.contains(TextAttributes::DIM));
    }

    #[test]
    fn test_tabs_disabled_while_searching() {
        let data = dataset();
        let mut picker = EmojiPicker::new(&data, options()).unwrap();
        picker.handle_event(&Event::Key(KeyEvent::char('t')));
        let mut canvas = Canvas::new();
        canvas.draw(&mut picker);

        let first = canvas.buffer.get(1, 1).copied().unwrap_or_default();
        assert!(first.attributes.contains(TextAttributes::DIM));
        assert!(!canvas.row(2).contains(INDICATOR));
        assert!(canvas.row(3).contains('t'));
        assert!(canvas.row(4).contains("Search Results"));
    }

    // ============================================
    // Grid
    // ============================================

    #[test]
    fn test_cards_and_hits() {
        let data = dataset();
        let mut picker = EmojiPicker::new(&data, options()).unwrap();
        let mut canvas = Canvas::new();
        canvas.draw(&mut picker);

        assert!(canvas.row(5).contains(data.records()[0].emoji.as_str()));
        assert!(canvas.row(8).contains(data.records()[6].emoji.as_str()));
        for (x, y) in [(2, 5), (5, 5), (6, 5), (2, 8)] {
            let geometric = picker.hit_test(x, y).map(PickerHit::id);
            assert_eq!(canvas.hits.test(x, y), geometric, "at ({x}, {y})");
        }
        assert_eq!(canvas.hits.test(2, 4), None);
    }

    #[test]
    fn test_sticky_header_covers_first_row() {
        let data = dataset();
        let mut picker = EmojiPicker::new(&data, options()).unwrap();
        picker.scroll_to(1);
        let mut canvas = Canvas::new();
        canvas.draw(&mut picker);

        assert!(canvas.row(4).contains("People"));
        assert!(!canvas.row(4).contains(data.records()[0].emoji.as_str()));
        assert_eq!(canvas.hits.test(3, 4), None);
        assert_eq!(canvas.hits.test(3, 5), Some(PickerHit::Card(5).id()));
        let header = canvas.buffer.get(20, 4).copied().unwrap_or_default();
        assert!(header.bg.is_opaque());
    }

    #[test]
    fn test_empty_search_message() {
        let data = dataset();
        let mut picker = EmojiPicker::new(&data, options()).unwrap();
        picker.handle_event(&Event::Paste("zzz".to_string()));
        let mut canvas = Canvas::new();
        canvas.draw(&mut picker);
        assert!(canvas.row(5).contains(NO_RESULTS));
    }

    // ============================================
    // Hover
    // ============================================

    #[test]
    fn test_hover_tints_card_and_fills_footer() {
        let data = dataset();
        let mut picker = EmojiPicker::new(&data, options()).unwrap();
        let mut canvas = Canvas::new();
        canvas.draw(&mut picker);
        let before = canvas.buffer.get(2, 5).copied().unwrap_or_default();

        picker.handle_event(&Event::Mouse(MouseEvent::move_to(3, 5)));
        canvas.draw(&mut picker);
        let after = canvas.buffer.get(2, 5).copied().unwrap_or_default();
        assert_ne!(before.bg, after.bg);

        let footer = canvas.row(10);
        assert!(footer.contains("people thing 0"));
        assert!(!footer.contains("Max Emoji"));
    }

    #[test]
    fn test_light_theme_background() {
        let data = dataset();
        let mut picker = EmojiPicker::new(&data, options()).unwrap();
        picker.set_theme(crate::theme::ThemeMode::Light);
        let mut canvas = Canvas::new();
        canvas.draw(&mut picker);
        let cell = canvas.buffer.get(12, 6).copied().unwrap_or_default();
        assert_eq!(cell.bg.to_rgb_u8(), (255, 255, 255));
    }
}

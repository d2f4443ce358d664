//! Double-buffered terminal renderer with diff detection.
//!
//! [`Renderer`] keeps two frames:
//! - **Back buffer**: where the widget draws (via [`Renderer::frame`])
//! - **Front buffer**: the frame currently on screen
//!
//! [`present`](Renderer::present) diffs the two and writes ANSI output only
//! for the cells that changed, then swaps them. Hit areas follow the same
//! scheme: ids registered while drawing become testable after `present`.
//!
//! ```
//! use emojipick::buffer::Rect;
//! use emojipick::renderer::{Renderer, RendererOptions};
//! use emojipick::{Rgba, Style};
//!
//! let mut renderer =
//!     Renderer::new_with_options(Vec::new(), 20, 2, RendererOptions::headless()).unwrap();
//! let frame = renderer.frame();
//! frame.buffer.draw_text(frame.pool, 0, 0, "😀 hi", Style::fg(Rgba::WHITE));
//! frame.hits.register(Rect::new(0, 0, 2, 1), 42);
//! renderer.present().unwrap();
//!
//! assert_eq!(renderer.hit_test(1, 0), Some(42));
//! assert!(String::from_utf8_lossy(renderer.output()).contains("😀"));
//! ```

mod diff;
mod hitgrid;

pub use diff::{BufferDiff, DirtySpan};
pub use hitgrid::HitGrid;

use crate::ansi::{AnsiWriter, ColorMode, sequences};
use crate::buffer::FrameBuffer;
use crate::color::Rgba;
use crate::glyph_pool::GlyphPool;
use crate::terminal::Terminal;
use std::io::{self, Stdout, Write};

/// Terminal setup performed when a [`Renderer`] is created.
#[derive(Clone, Copy, Debug)]
pub struct RendererOptions {
    pub use_alt_screen: bool,
    pub hide_cursor: bool,
    pub enable_mouse: bool,
    pub bracketed_paste: bool,
    /// Put stdin into raw mode.
    pub raw_mode: bool,
    /// Wrap each frame in DEC 2026 synchronized output.
    pub sync_output: bool,
    pub color_mode: ColorMode,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            use_alt_screen: true,
            hide_cursor: true,
            enable_mouse: true,
            bracketed_paste: true,
            raw_mode: true,
            sync_output: true,
            color_mode: ColorMode::TrueColor,
        }
    }
}

impl RendererOptions {
    /// No terminal mode changes at all, for off-screen rendering.
    #[must_use]
    pub fn headless() -> Self {
        Self {
            use_alt_screen: false,
            hide_cursor: false,
            enable_mouse: false,
            bracketed_paste: false,
            raw_mode: false,
            sync_output: false,
            color_mode: ColorMode::TrueColor,
        }
    }
}

/// Per-renderer counters.
#[derive(Clone, Debug, Default)]
pub struct RenderStats {
    pub frames: u64,
    pub full_redraws: u64,
    pub last_frame_cells: usize,
    pub last_frame_bytes: usize,
}

/// Mutable views of everything a widget draws into.
pub struct Frame<'a> {
    pub buffer: &'a mut FrameBuffer,
    pub pool: &'a mut GlyphPool,
    pub hits: &'a mut HitGrid,
}

/// Double-buffered renderer writing to any [`Write`].
///
/// Terminal modes are restored when the renderer is dropped.
pub struct Renderer<W: Write> {
    width: u32,
    height: u32,

    front_buffer: FrameBuffer,
    back_buffer: FrameBuffer,
    front_hit_grid: HitGrid,
    back_hit_grid: HitGrid,
    pool: GlyphPool,

    terminal: Terminal<W>,
    scratch: Vec<u8>,
    color_mode: ColorMode,
    sync_output: bool,

    background: Rgba,
    force_redraw: bool,
    stats: RenderStats,
}

impl Renderer<Stdout> {
    /// Renderer on stdout.
    pub fn stdout(width: u32, height: u32, options: RendererOptions) -> io::Result<Self> {
        Self::new_with_options(io::stdout(), width, height, options)
    }
}

impl<W: Write> Renderer<W> {
    pub fn new_with_options(
        writer: W,
        width: u32,
        height: u32,
        options: RendererOptions,
    ) -> io::Result<Self> {
        let mut terminal = Terminal::new(writer);
        if options.raw_mode {
            terminal.enter_raw_mode()?;
        }
        terminal.set_alt_screen(options.use_alt_screen)?;
        terminal.set_cursor_hidden(options.hide_cursor)?;
        terminal.set_mouse(options.enable_mouse)?;
        terminal.set_bracketed_paste(options.bracketed_paste)?;
        terminal.flush()?;

        let width = width.max(1);
        let height = height.max(1);
        let background = Rgba::BLACK;
        let mut back_buffer = FrameBuffer::new(width, height);
        back_buffer.clear(background);
        Ok(Self {
            width,
            height,
            front_buffer: FrameBuffer::new(width, height),
            back_buffer,
            front_hit_grid: HitGrid::new(width, height),
            back_hit_grid: HitGrid::new(width, height),
            pool: GlyphPool::new(),
            terminal,
            scratch: Vec::with_capacity((width as usize) * (height as usize) * 16),
            color_mode: options.color_mode,
            sync_output: options.sync_output,
            background,
            force_redraw: true,
            stats: RenderStats::default(),
        })
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Background the back buffer is cleared to after each present.
    pub fn set_background(&mut self, color: Rgba) {
        self.background = color;
        self.back_buffer.clear(color);
    }

    /// The back buffer, pool and hit grid for drawing the next frame.
    pub fn frame(&mut self) -> Frame<'_> {
        Frame {
            buffer: &mut self.back_buffer,
            pool: &mut self.pool,
            hits: &mut self.back_hit_grid,
        }
    }

    /// The frame currently on screen.
    #[must_use]
    pub fn front_buffer(&self) -> &FrameBuffer {
        &self.front_buffer
    }

    #[must_use]
    pub fn pool(&self) -> &GlyphPool {
        &self.pool
    }

    #[must_use]
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Write the back buffer to the terminal and swap.
    pub fn present(&mut self) -> io::Result<()> {
        let total_cells = (self.width as usize) * (self.height as usize);
        let diff = BufferDiff::compute(&self.front_buffer, &self.back_buffer);
        let full = self.force_redraw || diff.should_full_redraw(total_cells);

        self.scratch.clear();
        if full || !diff.is_empty() {
            let mut writer = AnsiWriter::with_color_mode(&mut self.scratch, self.color_mode);
            writer.write_str(sequences::CURSOR_HOME);

            if full {
                for y in 0..self.height {
                    for x in 0..self.width {
                        if let Some(cell) = self.back_buffer.get(x, y) {
                            writer.write_cell_at(y, x, cell, &self.pool);
                        }
                    }
                }
            } else {
                for span in &diff.spans {
                    for x in span.x..span.x + span.width {
                        if let Some(cell) = self.back_buffer.get(x, span.y) {
                            if !cell.is_continuation() {
                                writer.write_cell_at(span.y, x, cell, &self.pool);
                            }
                        }
                    }
                }
            }

            writer.reset();
            writer.flush()?;
        }

        if !self.scratch.is_empty() {
            if self.sync_output {
                self.terminal.begin_sync()?;
            }
            self.terminal.write_all(&self.scratch)?;
            if self.sync_output {
                self.terminal.end_sync()?;
            }
            self.terminal.flush()?;
        }

        self.stats.frames += 1;
        self.stats.last_frame_bytes = self.scratch.len();
        self.stats.last_frame_cells = if full { total_cells } else { diff.change_count };
        if full {
            self.stats.full_redraws += 1;
        }
        tracing::trace!(
            full,
            cells = self.stats.last_frame_cells,
            bytes = self.stats.last_frame_bytes,
            "frame presented"
        );
        self.force_redraw = false;

        std::mem::swap(&mut self.front_buffer, &mut self.back_buffer);
        std::mem::swap(&mut self.front_hit_grid, &mut self.back_hit_grid);
        self.back_buffer.clear(self.background);
        self.back_hit_grid.clear();
        Ok(())
    }

    /// Resize both frames; the next present redraws everything.
    pub fn resize(&mut self, width: u32, height: u32) -> io::Result<()> {
        let width = width.max(1);
        let height = height.max(1);
        tracing::debug!(width, height, "renderer resized");
        self.width = width;
        self.height = height;
        self.front_buffer.resize(width, height);
        self.back_buffer.resize(width, height);
        self.back_buffer.clear(self.background);
        self.front_hit_grid.resize(width, height);
        self.back_hit_grid.resize(width, height);
        self.force_redraw = true;
        self.terminal.clear()
    }

    /// Id registered at a position in the last presented frame.
    #[must_use]
    pub fn hit_test(&self, x: u32, y: u32) -> Option<u32> {
        self.front_hit_grid.test(x, y)
    }

    /// Restore terminal modes now rather than on drop.
    pub fn cleanup(&mut self) -> io::Result<()> {
        self.terminal.cleanup()
    }

    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> &W {
        self.terminal.writer()
    }
}

#![forbid(unsafe_code)]

//! Fire cellular automaton.
//!
//! Two byte grids ping-pong every generation. A generation is four passes:
//!
//! 1. **Diffuse + cool**: each interior cell becomes the floor average of its eight
//!    neighbours in `previous`. When the neighbour sum is a multiple of four the
//!    average drops by one; in the bottom four rows that decrement may wrap 0 to
//!    255, which is what throws the sparks.
//! 2. **Scroll**: `previous` receives `current` shifted up one row. Its last row is
//!    never written, so it stays at zero and acts as the cold floor.
//! 3. **Brighten embers**: in the bottom rows, near-black cells `v < 15` become
//!    `22 - v`, keeping a dim glow at the base.
//! 4. **Map**: visible cells go through the palette into the framebuffer, with the
//!    same one-row upward shift as the scroll.
//!
//! Interior cells are addressed by flat index, not by (row, column), so a cell at
//! the right edge averages in the left edge of the next row and vice versa. The
//! wrap is part of the look and is kept.
//!
//! # Determinism
//!
//! There is no random source; the "randomness" comes from the low bits of the
//! neighbour sums. Identical sessions produce identical frames.
//!
//! # No Per-Frame Allocations
//!
//! All state lives in the session arena, allocated once.

use crate::arena::{Arena, ArenaLayout, FramebufferMut};
use crate::color::Rgb24;
use crate::config::{KernelConfig, ReconfigurePolicy};
use crate::error::KernelError;
use crate::line;
use crate::palette::color_of;

/// Rows at the bottom of the grid where cooling may wrap into a spark.
pub const SPARK_ROWS: usize = 4;

/// Rows at the bottom of the grid swept by the ember pass.
pub const EMBER_ROWS: usize = 7;

/// Intensities below this are lifted by the ember pass.
pub const EMBER_THRESHOLD: u8 = 15;

/// Ember values are reflected around this pivot: `v -> EMBER_PIVOT - v`.
pub const EMBER_PIVOT: u8 = 22;

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

/// Pass 1: neighbour average with stochastic cooling.
///
/// Writes `current[i]` for `i` in `width + 1 .. (height - 1) * width - 1`.
pub fn diffuse_and_cool(previous: &[u8], current: &mut [u8], width: usize, height: usize) {
    if height < 2 {
        return;
    }
    let start = width + 1;
    let end = ((height - 1) * width).saturating_sub(1);
    let spark_floor = height.saturating_sub(SPARK_ROWS) * width;

    for i in start..end {
        let sum = u32::from(previous[i - width - 1])
            + u32::from(previous[i - width])
            + u32::from(previous[i - width + 1])
            + u32::from(previous[i - 1])
            + u32::from(previous[i + 1])
            + u32::from(previous[i + width - 1])
            + u32::from(previous[i + width])
            + u32::from(previous[i + width + 1]);
        let mut avg = (sum / 8) as u8;
        if sum & 3 == 0 && (avg > 0 || i >= spark_floor) {
            avg = avg.wrapping_sub(1);
        }
        current[i] = avg;
    }
}

/// Pass 2: `previous[i] = current[i + width]` for every row but the last.
pub fn scroll_up(current: &[u8], previous: &mut [u8], width: usize, height: usize) {
    let len = height.saturating_sub(2) * width;
    previous[..len].copy_from_slice(&current[width..width + len]);
}

/// Pass 3: lift near-black cells of the bottom rows (last row excluded).
///
/// Grids shorter than [`EMBER_ROWS`] are swept from their first cell.
pub fn brighten_embers(current: &mut [u8], width: usize, height: usize) {
    let start = height.saturating_sub(EMBER_ROWS) * width;
    let end = height.saturating_sub(1) * width;
    for cell in &mut current[start..end] {
        *cell = brighten(*cell);
    }
}

/// The ember transform for one value.
#[inline]
pub const fn brighten(v: u8) -> u8 {
    if v < EMBER_THRESHOLD { EMBER_PIVOT - v } else { v }
}

/// Pass 4: palette-map every visible cell, shifted up one row.
pub fn map_to_colors(
    current: &[u8],
    framebuffer: &mut FramebufferMut<'_>,
    width: usize,
    height: usize,
) {
    let len = height.saturating_sub(2) * width;
    for (i, &heat) in current[width..width + len].iter().enumerate() {
        framebuffer.set(i, color_of(heat));
    }
}

// ---------------------------------------------------------------------------
// FireSession
// ---------------------------------------------------------------------------

/// A configured fire: dimensions plus the arena holding both grids and the
/// framebuffer.
///
/// Replaces process-wide state; several sessions can run side by side.
///
/// # Lifecycle
///
/// `configure` once (again on resize), then per frame: `advance` once and
/// `encode_row` for each visible row.
#[derive(Debug, Clone)]
pub struct FireSession {
    config: KernelConfig,
    arena: Arena,
    layout: Option<ArenaLayout>,
    generation: u64,
}

impl FireSession {
    /// Session with default config.
    pub fn new() -> Self {
        Self::with_config(KernelConfig::default())
    }

    /// Session with an explicit config. Allocates the (zeroed) arena now.
    pub fn with_config(config: KernelConfig) -> Self {
        Self {
            config,
            arena: Arena::new(config.arena_capacity),
            layout: None,
            generation: 0,
        }
    }

    /// Active config.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Set the visible area to `width x height` dots.
    ///
    /// The arena is not cleared unless the config says
    /// [`ReconfigurePolicy::ZeroFill`]; leftovers from a previous size show
    /// through until enough generations overwrite them. On error the previous
    /// configuration stays active.
    pub fn configure(&mut self, width: u16, height: u16) -> Result<(), KernelError> {
        let layout = ArenaLayout::new(width, height);
        if let Err(err) = self.arena.check(&layout) {
            #[cfg(feature = "tracing")]
            tracing::warn!(width, height, %err, "fire configure rejected");
            return Err(err);
        }

        let reconfigure = self.layout.is_some();
        if reconfigure && self.config.reconfigure == ReconfigurePolicy::ZeroFill {
            self.arena.zero_prefix(layout.required_bytes());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            width,
            height,
            required = layout.required_bytes(),
            capacity = self.arena.capacity(),
            reconfigure,
            policy = ?self.config.reconfigure,
            "fire configured"
        );

        self.layout = Some(layout);
        self.generation = 0;
        Ok(())
    }

    /// True once `configure` has succeeded.
    #[inline]
    pub fn is_configured(&self) -> bool {
        self.layout.is_some()
    }

    fn layout(&self) -> Result<ArenaLayout, KernelError> {
        self.layout.ok_or(KernelError::NotConfigured)
    }

    /// Visible width in dots.
    pub fn width(&self) -> Option<u16> {
        self.layout.map(|l| l.width() as u16)
    }

    /// Visible height in dots.
    pub fn height(&self) -> Option<u16> {
        self.layout.map(|l| l.visible_rows() as u16)
    }

    /// Generations advanced since the last configure.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run one generation.
    pub fn advance(&mut self) -> Result<(), KernelError> {
        let layout = self.layout()?;
        let (w, h) = (layout.width(), layout.height());

        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "fire_advance",
            width = w,
            height = h,
            generation = self.generation
        );
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        let mut views = self.arena.views(&layout);
        diffuse_and_cool(views.previous, views.current, w, h);
        scroll_up(views.current, views.previous, w, h);
        brighten_embers(views.current, w, h);
        map_to_colors(views.current, &mut views.framebuffer, w, h);

        self.generation += 1;
        Ok(())
    }

    /// Write visible row `row` into `line` at `offset`.
    ///
    /// Only digit bytes are written. Reads nothing but the framebuffer, so calling
    /// it repeatedly for the same row yields the same bytes.
    pub fn encode_row(&self, line: &mut [u8], offset: u8, row: u16) -> Result<(), KernelError> {
        let layout = self.layout()?;
        let rows = layout.visible_rows();
        if row as usize >= rows {
            #[cfg(feature = "tracing")]
            tracing::trace!(row, rows, "fire encode_row out of range");
            return Err(KernelError::RowOutOfRange { row, rows });
        }
        line::check_line(line, offset, layout.width())?;

        let framebuffer = self.arena.framebuffer(&layout);
        let base = row as usize * layout.width();
        line::encode_dots(
            line,
            offset,
            (base..base + layout.width()).map(|i| framebuffer.get(i)),
        );
        Ok(())
    }

    /// Colors of visible row `row`, or `None` if unconfigured or out of range.
    pub fn framebuffer_row(&self, row: u16) -> Option<Vec<Rgb24>> {
        let layout = self.layout?;
        if row as usize >= layout.visible_rows() {
            return None;
        }
        let framebuffer = self.arena.framebuffer(&layout);
        let base = row as usize * layout.width();
        Some((base..base + layout.width()).map(|i| framebuffer.get(i)).collect())
    }

    /// The grid written by the last diffuse pass (hidden rows included).
    pub fn current_grid(&self) -> Option<&[u8]> {
        self.layout.map(|l| self.arena.current(&l))
    }

    /// The grid the next diffuse pass reads from.
    pub fn previous_grid(&self) -> Option<&[u8]> {
        self.layout.map(|l| self.arena.previous(&l))
    }
}

impl Default for FireSession {
    fn default() -> Self {
        Self::new()
    }
}

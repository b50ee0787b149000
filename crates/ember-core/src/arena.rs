#![forbid(unsafe_code)]

//! Single-block arena holding both fire grids and the color framebuffer.
//!
//! One zeroed allocation is carved into three regions by offset arithmetic:
//!
//! ```text
//! 0            cells          2*cells                2*cells + 4*visible
//! | current    | previous     | framebuffer (u32 LE) |  ... unused ...
//! ```
//!
//! where `cells = width * height` and `visible = width * (height - 2)`. There is
//! no per-region free; a new layout simply re-slices the same bytes, so content
//! from an earlier layout survives unless the caller asks for a zero fill.

use std::ops::Range;

use crate::color::Rgb24;
use crate::error::KernelError;

/// Rows at the top of the grid that are never displayed.
pub const HIDDEN_ROWS: usize = 2;

/// Bytes per framebuffer entry.
pub const FRAMEBUFFER_ENTRY_BYTES: usize = 4;

/// Bytes needed to host a `width x height` visible area.
///
/// Equals `2*w*(h+2) + 4*w*h`. Saturates instead of wrapping.
#[inline]
pub fn required_bytes(width: u16, height: u16) -> usize {
    ArenaLayout::new(width, height).required_bytes()
}

/// Offsets of the three regions for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaLayout {
    width: usize,
    height: usize,
}

impl ArenaLayout {
    /// Layout for a visible area of `width x height` dots.
    ///
    /// The grid is two rows taller than what is displayed.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as usize,
            height: height as usize + HIDDEN_ROWS,
        }
    }

    /// Grid width in cells.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells, hidden rows included.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of displayed rows.
    #[inline]
    pub const fn visible_rows(&self) -> usize {
        self.height - HIDDEN_ROWS
    }

    /// Cells per grid.
    #[inline]
    pub fn cells(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Framebuffer entries (one per displayed dot).
    #[inline]
    pub fn visible_cells(&self) -> usize {
        self.width.saturating_mul(self.visible_rows())
    }

    /// Bytes this layout occupies from the start of the arena.
    pub fn required_bytes(&self) -> usize {
        self.cells()
            .saturating_mul(2)
            .saturating_add(self.visible_cells().saturating_mul(FRAMEBUFFER_ENTRY_BYTES))
    }

    /// Byte range of the current grid.
    pub fn current_range(&self) -> Range<usize> {
        0..self.cells()
    }

    /// Byte range of the previous grid.
    pub fn previous_range(&self) -> Range<usize> {
        self.cells()..self.cells() * 2
    }

    /// Byte range of the framebuffer.
    pub fn framebuffer_range(&self) -> Range<usize> {
        self.cells() * 2..self.required_bytes()
    }
}

/// Mutable views over one layout.
#[derive(Debug)]
pub struct ArenaViews<'a> {
    pub current: &'a mut [u8],
    pub previous: &'a mut [u8],
    pub framebuffer: FramebufferMut<'a>,
}

/// Fixed-capacity zeroed byte block.
#[derive(Debug, Clone)]
pub struct Arena {
    bytes: Box<[u8]>,
}

impl Arena {
    /// Allocate a zeroed arena.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity].into_boxed_slice(),
        }
    }

    /// Total size in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Check that `layout` fits.
    pub fn check(&self, layout: &ArenaLayout) -> Result<(), KernelError> {
        let required = layout.required_bytes();
        if required > self.capacity() {
            return Err(KernelError::ArenaTooSmall {
                required,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// Zero the first `len` bytes (clamped to capacity).
    pub fn zero_prefix(&mut self, len: usize) {
        let len = len.min(self.bytes.len());
        self.bytes[..len].fill(0);
    }

    /// Split into the three regions of `layout`.
    ///
    /// # Panics
    ///
    /// Panics if the layout does not fit; call [`Arena::check`] first.
    pub fn views(&mut self, layout: &ArenaLayout) -> ArenaViews<'_> {
        let cells = layout.cells();
        let used = &mut self.bytes[..layout.required_bytes()];
        let (grids, framebuffer) = used.split_at_mut(cells * 2);
        let (current, previous) = grids.split_at_mut(cells);
        ArenaViews {
            current,
            previous,
            framebuffer: FramebufferMut(framebuffer),
        }
    }

    /// Read-only current grid.
    pub fn current(&self, layout: &ArenaLayout) -> &[u8] {
        &self.bytes[layout.current_range()]
    }

    /// Read-only previous grid.
    pub fn previous(&self, layout: &ArenaLayout) -> &[u8] {
        &self.bytes[layout.previous_range()]
    }

    /// Read-only framebuffer.
    pub fn framebuffer(&self, layout: &ArenaLayout) -> Framebuffer<'_> {
        Framebuffer(&self.bytes[layout.framebuffer_range()])
    }
}

#[inline]
fn load(bytes: &[u8], index: usize) -> Rgb24 {
    let at = index * FRAMEBUFFER_ENTRY_BYTES;
    Rgb24(u32::from_le_bytes([
        bytes[at],
        bytes[at + 1],
        bytes[at + 2],
        bytes[at + 3],
    ]))
}

/// Read-only framebuffer region.
#[derive(Debug, Clone, Copy)]
pub struct Framebuffer<'a>(&'a [u8]);

impl Framebuffer<'_> {
    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len() / FRAMEBUFFER_ENTRY_BYTES
    }

    /// True when the framebuffer holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color of entry `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Rgb24 {
        load(self.0, index)
    }
}

/// Mutable framebuffer region.
#[derive(Debug)]
pub struct FramebufferMut<'a>(&'a mut [u8]);

impl FramebufferMut<'_> {
    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len() / FRAMEBUFFER_ENTRY_BYTES
    }

    /// True when the framebuffer holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store `color` at entry `index`.
    #[inline]
    pub fn set(&mut self, index: usize, color: Rgb24) {
        let at = index * FRAMEBUFFER_ENTRY_BYTES;
        self.0[at..at + FRAMEBUFFER_ENTRY_BYTES].copy_from_slice(&color.0.to_le_bytes());
    }

    /// Color of entry `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Rgb24 {
        load(self.0, index)
    }
}

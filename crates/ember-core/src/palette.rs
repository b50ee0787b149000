#![forbid(unsafe_code)]

//! Fire palette: 8-bit intensity to truecolor.
//!
//! Jare's classic FirePal. Indices `0..64` run black -> dark teal -> red -> orange
//! -> yellow, and every index from 64 up is "white heat". Channels are stored as
//! 6-bit VGA DAC values and widened by a left shift of two.

use crate::color::Rgb24;

/// Number of hand-tuned gradient entries before white heat begins.
pub const GRADIENT_LEN: usize = 64;

/// Number of palette entries (one per 8-bit intensity).
pub const PALETTE_LEN: usize = 256;

// ---------------------------------------------------------------------------
// FirePal gradient (6-bit channels)
// ---------------------------------------------------------------------------

const GRADIENT: [(u8, u8, u8); GRADIENT_LEN] = [
    (0, 0, 0), // 0: black
    (0, 1, 1),
    (0, 4, 5),
    (0, 7, 9),
    (0, 8, 11),
    (0, 9, 12),
    (15, 6, 8),
    (25, 4, 4),
    (33, 3, 3),
    (40, 2, 2),
    (48, 2, 2),
    (55, 1, 1),
    (63, 0, 0), // 12: full red
    (63, 0, 0),
    (63, 3, 0),
    (63, 7, 0),
    (63, 10, 0),
    (63, 13, 0),
    (63, 16, 0),
    (63, 20, 0),
    (63, 23, 0),
    (63, 26, 0),
    (63, 29, 0),
    (63, 33, 0),
    (63, 36, 0),
    (63, 39, 0),
    (63, 39, 0),
    (63, 40, 0),
    (63, 40, 0),
    (63, 41, 0),
    (63, 42, 0),
    (63, 42, 0),
    (63, 43, 0),
    (63, 44, 0),
    (63, 44, 0),
    (63, 45, 0),
    (63, 45, 0),
    (63, 46, 0),
    (63, 47, 0),
    (63, 47, 0),
    (63, 48, 0),
    (63, 49, 0),
    (63, 49, 0),
    (63, 50, 0),
    (63, 51, 0),
    (63, 51, 0),
    (63, 52, 0),
    (63, 53, 0),
    (63, 53, 0),
    (63, 54, 0),
    (63, 55, 0),
    (63, 55, 0),
    (63, 56, 0),
    (63, 57, 0),
    (63, 57, 0),
    (63, 58, 0),
    (63, 58, 0),
    (63, 59, 0),
    (63, 60, 0),
    (63, 60, 0),
    (63, 61, 0),
    (63, 62, 0),
    (63, 62, 0),
    (63, 63, 0), // 63: yellow
];

const fn build_palette() -> [Rgb24; PALETTE_LEN] {
    let mut table = [Rgb24::WHITE_HEAT; PALETTE_LEN];
    let mut i = 0;
    while i < GRADIENT_LEN {
        let (r, g, b) = GRADIENT[i];
        table[i] = Rgb24::from_6bit(r, g, b);
        i += 1;
    }
    table
}

/// The full 256-entry fire palette.
pub static FIRE_PALETTE: [Rgb24; PALETTE_LEN] = build_palette();

/// Look up the color for an intensity.
#[inline]
pub fn color_of(intensity: u8) -> Rgb24 {
    FIRE_PALETTE[intensity as usize]
}

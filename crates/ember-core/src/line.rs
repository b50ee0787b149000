#![forbid(unsafe_code)]

//! In-place truecolor line encoder.
//!
//! The host fills each output line once with a prefix followed by one
//! [`DOT_TEMPLATE`] per dot. Every frame the encoder rewrites only the nine
//! ASCII digits of each template; the other 18 bytes of the 27-byte stride are
//! never touched. Terminals accept leading zeros in SGR parameters, so a fixed
//! three-digit field holds any channel value and the line never changes length.
//!
//! # Dot layout
//!
//! | Bytes | Content |
//! |-------|---------|
//! | 0..=7 | `ESC [ 4 8 : 2 : :` (truecolor background, empty colorspace id) |
//! | 8..=10 | red, zero-padded decimal |
//! | 11 | `:` |
//! | 12..=14 | green |
//! | 15 | `:` |
//! | 16..=18 | blue |
//! | 19 | `m` |
//! | 20..=21 | two spaces (one square dot) |
//! | 22..=26 | `ESC [ 4 9 m` (default background) |

use crate::color::Rgb24;
use crate::error::KernelError;

/// Bytes per encoded dot.
pub const DOT_STRIDE: usize = 27;

/// A black dot, as the host lays it out before the first frame.
pub const DOT_TEMPLATE: &[u8; DOT_STRIDE] = b"\x1b[48:2::000:000:000m  \x1b[49m";

/// Offset of the red digits within a dot.
pub const RED_DIGITS: usize = 8;
/// Offset of the green digits within a dot.
pub const GREEN_DIGITS: usize = 12;
/// Offset of the blue digits within a dot.
pub const BLUE_DIGITS: usize = 16;

/// Every byte offset within a dot that the encoder writes.
pub const DIGIT_POSITIONS: [usize; 9] = [8, 9, 10, 12, 13, 14, 16, 17, 18];

/// Pack the decimal digits of `v` into nibbles: hundreds in bits 11..8, tens in
/// 7..4, ones in 3..0.
#[inline]
pub const fn packed_decimal(v: u8) -> u16 {
    let v = v as u16;
    ((v / 100) << 8) | (((v / 10) % 10) << 4) | (v % 10)
}

/// Write `value` as three ASCII digits at `dot[at..at + 3]`.
#[inline]
pub fn write_channel(dot: &mut [u8], at: usize, value: u8) {
    let digits = packed_decimal(value);
    dot[at] = ((digits >> 8) & 0xf) as u8 | b'0';
    dot[at + 1] = ((digits >> 4) & 0xf) as u8 | b'0';
    dot[at + 2] = (digits & 0xf) as u8 | b'0';
}

/// Write all three channels of `color` into one dot.
#[inline]
pub fn write_dot(dot: &mut [u8], color: Rgb24) {
    write_channel(dot, RED_DIGITS, color.r());
    write_channel(dot, GREEN_DIGITS, color.g());
    write_channel(dot, BLUE_DIGITS, color.b());
}

/// Bytes a line must hold for `width` dots after `offset`.
#[inline]
pub fn required_len(offset: u8, width: usize) -> usize {
    (offset as usize).saturating_add(width.saturating_mul(DOT_STRIDE))
}

/// Check that `line` is long enough for `width` dots after `offset`.
pub fn check_line(line: &[u8], offset: u8, width: usize) -> Result<(), KernelError> {
    let required = required_len(offset, width);
    if line.len() < required {
        return Err(KernelError::BufferTooShort {
            required,
            len: line.len(),
        });
    }
    Ok(())
}

/// Encode `colors` into consecutive dots starting at `offset`.
///
/// The caller guarantees room for every color (see [`check_line`]).
pub fn encode_dots<I>(line: &mut [u8], offset: u8, colors: I)
where
    I: IntoIterator<Item = Rgb24>,
{
    let dots = line[offset as usize..].chunks_exact_mut(DOT_STRIDE);
    for (dot, color) in dots.zip(colors) {
        write_dot(dot, color);
    }
}

/// Lay out `width` black dot templates starting at `offset`.
pub fn fill_skeleton(line: &mut [u8], offset: usize, width: usize) {
    for dot in line[offset..offset + width * DOT_STRIDE].chunks_exact_mut(DOT_STRIDE) {
        dot.copy_from_slice(DOT_TEMPLATE);
    }
}

/// Build a fresh line: `prefix`, `width` dot templates, then `suffix`.
pub fn skeleton_line(prefix: &[u8], width: usize, suffix: &[u8]) -> Vec<u8> {
    let mut line = Vec::with_capacity(prefix.len() + width * DOT_STRIDE + suffix.len());
    line.extend_from_slice(prefix);
    for _ in 0..width {
        line.extend_from_slice(DOT_TEMPLATE);
    }
    line.extend_from_slice(suffix);
    line
}

fn parse_channel(digits: &[u8]) -> Option<u8> {
    let mut value: u16 = 0;
    for &d in digits {
        if !d.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u16::from(d - b'0');
    }
    u8::try_from(value).ok()
}

/// Read a color back out of an encoded dot.
///
/// Returns `None` if any digit field is not a valid 0..=255 decimal.
pub fn decode_dot(dot: &[u8]) -> Option<Rgb24> {
    if dot.len() < DOT_STRIDE {
        return None;
    }
    let r = parse_channel(&dot[RED_DIGITS..RED_DIGITS + 3])?;
    let g = parse_channel(&dot[GREEN_DIGITS..GREEN_DIGITS + 3])?;
    let b = parse_channel(&dot[BLUE_DIGITS..BLUE_DIGITS + 3])?;
    Some(Rgb24::rgb(r, g, b))
}

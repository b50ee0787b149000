#![forbid(unsafe_code)]

//! Packed 24-bit truecolor values.

/// A compact 24-bit color.
///
/// - **Size:** 4 bytes.
/// - **Layout:** `0x00RRGGBB` (R in bits 23..16, B in bits 7..0). The top byte is
///   always zero for colors built through the constructors here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Rgb24(pub u32);

impl Rgb24 {
    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Brightest color a 6-bit-per-channel palette can express: `(252, 252, 252)`.
    pub const WHITE_HEAT: Self = Self::from_6bit(63, 63, 63);

    /// Create a color from 8-bit channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Create a color from 6-bit channels (`0..=63`), each shifted left by two.
    ///
    /// Inputs above 63 are masked to six bits.
    #[inline]
    pub const fn from_6bit(r: u8, g: u8, b: u8) -> Self {
        Self::rgb((r & 0x3f) << 2, (g & 0x3f) << 2, (b & 0x3f) << 2)
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Channels in wire order.
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }
}

impl From<(u8, u8, u8)> for Rgb24 {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

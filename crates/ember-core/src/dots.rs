#![forbid(unsafe_code)]

//! Random dots: a stateless-grid effect driven by a seeded PRNG.
//!
//! Every encoded dot draws a fresh 64-bit value, so each frame is new noise.
//! There is no grid and `advance` does nothing.

use crate::color::Rgb24;
use crate::error::KernelError;
use crate::line;

const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// Two-word xor/rotate generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotRng {
    state: [u64; 2],
}

impl DotRng {
    /// Expand `seed` into two state words with a 64-bit LCG.
    pub fn from_seed(seed: u64) -> Self {
        let mut seed = seed;
        let mut state = [0u64; 2];
        for word in &mut state {
            seed = seed.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
            *word = seed;
        }
        Self { state }
    }

    /// Raw state words.
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    /// Next 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1] = self.state;
        let result = s0
            .wrapping_add(s1)
            .wrapping_mul(9)
            .rotate_left(29)
            .wrapping_add(s0);
        self.state = [s0 ^ s1.rotate_left(29), s0 ^ (s1 << 9)];
        result
    }
}

/// Color for one generator output: red from bits 0..8, green from 12..20, blue
/// from 24..32.
#[inline]
pub const fn dot_color(value: u64) -> Rgb24 {
    Rgb24::rgb(value as u8, (value >> 12) as u8, (value >> 24) as u8)
}

/// Random dots effect.
#[derive(Debug, Clone)]
pub struct DotsEffect {
    rng: DotRng,
    size: Option<(u16, u16)>,
}

impl DotsEffect {
    /// Unconfigured effect.
    pub fn new() -> Self {
        Self {
            rng: DotRng::from_seed(0),
            size: None,
        }
    }

    /// Reseed and set the visible area.
    pub fn configure(&mut self, seed: u64, width: u16, height: u16) -> Result<(), KernelError> {
        self.rng = DotRng::from_seed(seed);
        self.size = Some((width, height));
        #[cfg(feature = "tracing")]
        tracing::debug!(seed, width, height, "dots configured");
        Ok(())
    }

    /// Visible area, once configured.
    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    /// Nothing to simulate; only checks that the effect is configured.
    pub fn advance(&mut self) -> Result<(), KernelError> {
        self.size.map(|_| ()).ok_or(KernelError::NotConfigured)
    }

    /// Fill row `row` with fresh random colors.
    ///
    /// `row` does not influence the colors but is range-checked. The generator
    /// advances once per dot.
    pub fn encode_row(&mut self, line: &mut [u8], offset: u8, row: u16) -> Result<(), KernelError> {
        let (width, height) = self.size.ok_or(KernelError::NotConfigured)?;
        if row >= height {
            return Err(KernelError::RowOutOfRange {
                row,
                rows: height as usize,
            });
        }
        line::check_line(line, offset, width as usize)?;

        let rng = &mut self.rng;
        line::encode_dots(
            line,
            offset,
            (0..width).map(|_| dot_color(rng.next_u64())),
        );
        Ok(())
    }
}

impl Default for DotsEffect {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::{DOT_STRIDE, decode_dot, skeleton_line};

    #[test]
    fn seeding_runs_lcg_twice() {
        let rng = DotRng::from_seed(0);
        let first = LCG_INCREMENT;
        let second = first.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
        assert_eq!(rng.state(), [first, second]);
    }

    #[test]
    fn generator_is_deterministic() {
        let mut a = DotRng::from_seed(123);
        let mut b = DotRng::from_seed(123);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let mut c = DotRng::from_seed(124);
        assert_ne!(DotRng::from_seed(123).next_u64(), c.next_u64());
    }

    #[test]
    fn dot_color_picks_spread_bytes() {
        let c = dot_color(0x00AB_C0DE_F012);
        assert_eq!(c.r(), 0x12);
        assert_eq!(c.g(), 0xEF);
        assert_eq!(c.b(), 0xC0);
    }

    #[test]
    fn encode_row_consumes_one_value_per_dot() {
        let mut fx = DotsEffect::new();
        fx.configure(7, 4, 2).unwrap();
        let mut line = skeleton_line(b"", 4, b"");
        fx.encode_row(&mut line, 0, 0).unwrap();

        let mut rng = DotRng::from_seed(7);
        for dot in line.chunks_exact(DOT_STRIDE) {
            assert_eq!(decode_dot(dot), Some(dot_color(rng.next_u64())));
        }
    }

    #[test]
    fn rows_differ_between_calls() {
        let mut fx = DotsEffect::new();
        fx.configure(1, 8, 1).unwrap();
        let mut a = skeleton_line(b"", 8, b"");
        let mut b = a.clone();
        fx.encode_row(&mut a, 0, 0).unwrap();
        fx.encode_row(&mut b, 0, 0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unconfigured_and_out_of_range() {
        let mut fx = DotsEffect::new();
        assert_eq!(fx.advance(), Err(KernelError::NotConfigured));
        let mut line = skeleton_line(b"", 2, b"");
        assert_eq!(fx.encode_row(&mut line, 0, 0), Err(KernelError::NotConfigured));
        fx.configure(0, 2, 3).unwrap();
        assert!(fx.advance().is_ok());
        assert_eq!(
            fx.encode_row(&mut line, 0, 3),
            Err(KernelError::RowOutOfRange { row: 3, rows: 3 })
        );
    }
}

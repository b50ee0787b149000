//! Property-based invariant tests for the kernel.
//!
//! 1. Decimal digits written for a channel read back as the same value.
//! 2. Encoding a row never touches bytes outside the nine digit positions.
//! 3. Arena footprint is `2*w*(h+2) + 4*w*h` and configure agrees with it.
//! 4. Palette lookup is pure across calls and generations.
//! 5. The ember transform is one-directional.
//! 6. Identical sessions stay identical (no hidden randomness).
//! 7. The floor row of the previous grid stays zero.

use ember_core::arena::required_bytes;
use ember_core::config::KernelConfig;
use ember_core::fire::{EMBER_THRESHOLD, FireSession, brighten};
use ember_core::line::{
    DIGIT_POSITIONS, DOT_STRIDE, DOT_TEMPLATE, packed_decimal, skeleton_line, write_channel,
};
use ember_core::palette::{FIRE_PALETTE, color_of};
use ember_core::{KernelError, Rgb24};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn small_dims() -> impl Strategy<Value = (u16, u16)> {
    (1u16..=24, 1u16..=16)
}

fn session(width: u16, height: u16) -> FireSession {
    let config = KernelConfig::default().with_arena_capacity(required_bytes(width, height));
    let mut fire = FireSession::with_config(config);
    fire.configure(width, height).unwrap();
    fire
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Decimal round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn channel_digits_round_trip(v in any::<u8>()) {
        let mut dot = *DOT_TEMPLATE;
        write_channel(&mut dot, 8, v);
        let digits = &dot[8..11];
        prop_assert!(digits.iter().all(u8::is_ascii_digit));
        let parsed: u32 = std::str::from_utf8(digits).unwrap().parse().unwrap();
        prop_assert_eq!(parsed, u32::from(v));

        let packed = packed_decimal(v);
        prop_assert!(packed & 0xf <= 9 && (packed >> 4) & 0xf <= 9 && packed >> 8 <= 2);
    }
}

#[test]
fn channel_digit_extremes() {
    let mut dot = *DOT_TEMPLATE;
    write_channel(&mut dot, 12, 255);
    assert_eq!(&dot[12..15], b"255");
    write_channel(&mut dot, 12, 0);
    assert_eq!(&dot[12..15], b"000");
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Stride isolation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn encode_touches_only_digits(
        (width, height) in small_dims(),
        generations in 0usize..20,
        prefix in proptest::collection::vec(any::<u8>(), 0..16),
        filler in any::<u8>(),
    ) {
        let mut fire = session(width, height);
        for _ in 0..generations {
            fire.advance().unwrap();
        }

        // Pre-fill every non-digit byte with an arbitrary marker so any stray
        // write is visible.
        let mut line = skeleton_line(&prefix, width as usize, b"\x1b[0m");
        for dot in line[prefix.len()..prefix.len() + width as usize * DOT_STRIDE]
            .chunks_exact_mut(DOT_STRIDE)
        {
            for (i, byte) in dot.iter_mut().enumerate() {
                if !DIGIT_POSITIONS.contains(&i) {
                    *byte = filler;
                }
            }
        }
        let before = line.clone();

        for row in 0..height {
            fire.encode_row(&mut line, prefix.len() as u8, row).unwrap();
            for (i, (a, b)) in before.iter().zip(&line).enumerate() {
                let in_dots = i >= prefix.len() && i < prefix.len() + width as usize * DOT_STRIDE;
                let is_digit = in_dots && DIGIT_POSITIONS.contains(&((i - prefix.len()) % DOT_STRIDE));
                if !is_digit {
                    prop_assert_eq!(a, b, "byte {} changed", i);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Arena footprint
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn footprint_formula(width in 0u16..=2048, height in 0u16..=2048) {
        let (w, h) = (width as usize, height as usize);
        prop_assert_eq!(required_bytes(width, height), 2 * w * (h + 2) + 4 * w * h);
    }

    #[test]
    fn configure_respects_capacity((width, height) in small_dims()) {
        let need = required_bytes(width, height);

        let mut exact = FireSession::with_config(KernelConfig::default().with_arena_capacity(need));
        prop_assert!(exact.configure(width, height).is_ok());

        let mut short = FireSession::with_config(KernelConfig::default().with_arena_capacity(need - 1));
        prop_assert_eq!(
            short.configure(width, height),
            Err(KernelError::ArenaTooSmall { required: need, capacity: need - 1 })
        );
        prop_assert!(!short.is_configured());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Palette purity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn palette_is_pure(v in any::<u8>(), generations in 0usize..8) {
        let before = color_of(v);
        let mut fire = session(8, 8);
        for _ in 0..generations {
            fire.advance().unwrap();
        }
        prop_assert_eq!(color_of(v), before);
        prop_assert_eq!(before, FIRE_PALETTE[v as usize]);
        prop_assert_eq!(before.0 >> 24, 0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Ember transform
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ember_lift_is_one_directional(v in any::<u8>()) {
        let once = brighten(v);
        if v < EMBER_THRESHOLD {
            prop_assert!(once >= 8);
            prop_assert_eq!(once, 22 - v);
        } else {
            prop_assert_eq!(once, v);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Determinism / 7. Cold floor
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn identical_sessions_agree((width, height) in small_dims(), generations in 1usize..30) {
        let mut a = session(width, height);
        let mut b = session(width, height);
        for _ in 0..generations {
            a.advance().unwrap();
            b.advance().unwrap();
        }
        prop_assert_eq!(a.current_grid(), b.current_grid());
        for row in 0..height {
            let colors: Vec<Rgb24> = a.framebuffer_row(row).unwrap();
            prop_assert_eq!(Some(colors), b.framebuffer_row(row));
        }
    }

    #[test]
    fn previous_floor_stays_zero((width, height) in small_dims(), generations in 1usize..30) {
        let mut fire = session(width, height);
        for _ in 0..generations {
            fire.advance().unwrap();
        }
        let previous = fire.previous_grid().unwrap();
        let floor = &previous[previous.len() - width as usize..];
        prop_assert!(floor.iter().all(|&v| v == 0));
    }
}

#![forbid(unsafe_code)]

//! The plugin contract a host drives every frame.
//!
//! ```text
//! configure(seed, w, h)          once, and again on resize
//! loop {
//!     advance()                  one generation
//!     encode_row(line, offs, n)  for n in 0..h
//! }
//! ```
//!
//! Calls must be serialized by the host; nothing here locks.

use std::str::FromStr;

use crate::config::KernelConfig;
use crate::dots::DotsEffect;
use crate::error::KernelError;
use crate::fire::FireSession;

/// A pixel effect behind the three-call host contract.
pub trait PixelEffect {
    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Set up for a `width x height` visible area. `seed` feeds effects that
    /// have a random source; others ignore it.
    fn configure(&mut self, seed: u64, width: u16, height: u16) -> Result<(), KernelError>;

    /// Advance one frame.
    fn advance(&mut self) -> Result<(), KernelError>;

    /// Overwrite the digit bytes of visible row `row` in `line`, whose first dot
    /// template starts at `offset`.
    fn encode_row(&mut self, line: &mut [u8], offset: u8, row: u16) -> Result<(), KernelError>;

    /// Visible `(width, height)` once configured.
    fn size(&self) -> Option<(u16, u16)>;
}

impl PixelEffect for FireSession {
    fn name(&self) -> &'static str {
        "Fire"
    }

    fn configure(&mut self, _seed: u64, width: u16, height: u16) -> Result<(), KernelError> {
        FireSession::configure(self, width, height)
    }

    fn advance(&mut self) -> Result<(), KernelError> {
        FireSession::advance(self)
    }

    fn encode_row(&mut self, line: &mut [u8], offset: u8, row: u16) -> Result<(), KernelError> {
        FireSession::encode_row(self, line, offset, row)
    }

    fn size(&self) -> Option<(u16, u16)> {
        self.width().zip(self.height())
    }
}

impl PixelEffect for DotsEffect {
    fn name(&self) -> &'static str {
        "Random Dots"
    }

    fn configure(&mut self, seed: u64, width: u16, height: u16) -> Result<(), KernelError> {
        DotsEffect::configure(self, seed, width, height)
    }

    fn advance(&mut self) -> Result<(), KernelError> {
        DotsEffect::advance(self)
    }

    fn encode_row(&mut self, line: &mut [u8], offset: u8, row: u16) -> Result<(), KernelError> {
        DotsEffect::encode_row(self, line, offset, row)
    }

    fn size(&self) -> Option<(u16, u16)> {
        DotsEffect::size(self)
    }
}

/// The effects this crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EffectKind {
    /// [`FireSession`].
    #[default]
    Fire,
    /// [`DotsEffect`].
    Dots,
}

impl EffectKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 2] = [Self::Fire, Self::Dots];

    /// Stable identifier, accepted by `FromStr`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Dots => "rnd_dots",
        }
    }

    /// Instantiate an unconfigured effect.
    pub fn build(self, config: KernelConfig) -> Box<dyn PixelEffect> {
        match self {
            Self::Fire => Box::new(FireSession::with_config(config)),
            Self::Dots => Box::new(DotsEffect::new()),
        }
    }
}

/// Unrecognized effect name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEffect(pub String);

impl std::fmt::Display for UnknownEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown effect: {}", self.0)
    }
}

impl std::error::Error for UnknownEffect {}

impl FromStr for EffectKind {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire" => Ok(Self::Fire),
            "rnd_dots" | "dots" => Ok(Self::Dots),
            other => Err(UnknownEffect(other.to_string())),
        }
    }
}

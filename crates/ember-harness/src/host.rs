#![forbid(unsafe_code)]

//! A terminal host without the terminal.

use ember_core::line::{DOT_STRIDE, decode_dot, skeleton_line};
use ember_core::{EffectKind, KernelConfig, KernelError, PixelEffect, Rgb24};

/// Erase-line prefix written before the first dot of every line.
pub const DEFAULT_PREFIX: &[u8] = b"\x1b[2K";

/// Line terminator after the last dot.
pub const DEFAULT_SUFFIX: &[u8] = b"\r\n";

/// Host errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The effect rejected a call.
    Kernel(KernelError),
    /// Dot offsets are a single byte, so the prefix must fit in 255 bytes.
    PrefixTooLong(usize),
    /// `frame` was called before `configure`.
    NotConfigured,
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kernel(err) => write!(f, "kernel error: {err}"),
            Self::PrefixTooLong(len) => write!(f, "line prefix too long: {len} bytes (max 255)"),
            Self::NotConfigured => write!(f, "host not configured"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Kernel(err) => Some(err),
            _ => None,
        }
    }
}

impl From<KernelError> for HostError {
    fn from(err: KernelError) -> Self {
        Self::Kernel(err)
    }
}

/// Host options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOptions {
    /// Bytes before the first dot of each line.
    pub prefix: Vec<u8>,
    /// Bytes after the last dot of each line.
    pub suffix: Vec<u8>,
    /// Kernel config handed to effects that use one.
    pub kernel: KernelConfig,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_vec(),
            suffix: DEFAULT_SUFFIX.to_vec(),
            kernel: KernelConfig::default(),
        }
    }
}

/// Drives one effect through the configure/advance/encode cycle.
pub struct HeadlessHost {
    effect: Box<dyn PixelEffect>,
    options: HostOptions,
    offset: u8,
    lines: Vec<Vec<u8>>,
    frames: u64,
}

impl std::fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("effect", &self.effect.name())
            .field("size", &self.effect.size())
            .field("offset", &self.offset)
            .field("frames", &self.frames)
            .finish()
    }
}

impl HeadlessHost {
    /// Host for a built-in effect.
    pub fn new(kind: EffectKind, options: HostOptions) -> Result<Self, HostError> {
        let effect = kind.build(options.kernel);
        Self::with_effect(effect, options)
    }

    /// Host for any effect.
    pub fn with_effect(
        effect: Box<dyn PixelEffect>,
        options: HostOptions,
    ) -> Result<Self, HostError> {
        let offset = u8::try_from(options.prefix.len())
            .map_err(|_| HostError::PrefixTooLong(options.prefix.len()))?;
        Ok(Self {
            effect,
            options,
            offset,
            lines: Vec::new(),
            frames: 0,
        })
    }

    /// Configure the effect and lay out fresh skeleton lines.
    ///
    /// On error the old lines and configuration stay in place.
    pub fn configure(&mut self, seed: u64, width: u16, height: u16) -> Result<(), HostError> {
        self.effect.configure(seed, width, height)?;
        self.lines = (0..height)
            .map(|_| skeleton_line(&self.options.prefix, width as usize, &self.options.suffix))
            .collect();
        self.frames = 0;
        Ok(())
    }

    /// Advance once and re-encode every row.
    pub fn frame(&mut self) -> Result<(), HostError> {
        if self.effect.size().is_none() {
            return Err(HostError::NotConfigured);
        }
        self.effect.advance()?;
        for (row, line) in self.lines.iter_mut().enumerate() {
            self.effect.encode_row(line, self.offset, row as u16)?;
        }
        self.frames += 1;
        Ok(())
    }

    /// Run `count` frames.
    pub fn run(&mut self, count: usize) -> Result<(), HostError> {
        for _ in 0..count {
            self.frame()?;
        }
        Ok(())
    }

    /// Frames since the last configure.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Name of the hosted effect.
    pub fn effect_name(&self) -> &'static str {
        self.effect.name()
    }

    /// Current output lines.
    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    /// All lines concatenated, as they would be written to the terminal.
    pub fn frame_bytes(&self) -> Vec<u8> {
        self.lines.concat()
    }

    /// Dot offset within each line.
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Decode every line back into colors.
    pub fn decode(&self) -> Vec<Vec<Rgb24>> {
        let width = self.effect.size().map_or(0, |(w, _)| w as usize);
        let start = self.offset as usize;
        self.lines
            .iter()
            .map(|line| {
                line[start..start + width * DOT_STRIDE]
                    .chunks_exact(DOT_STRIDE)
                    .map(|dot| decode_dot(dot).unwrap_or(Rgb24::BLACK))
                    .collect()
            })
            .collect()
    }
}

#![forbid(unsafe_code)]

//! Real-time pixel effects for a terminal host.
//!
//! # Role
//! `ember-core` is the simulation and encoding kernel. A host owns the terminal,
//! the line buffers, frame pacing and resizes; it calls into an effect once per
//! frame to advance and once per row to refresh the digits of a pre-built
//! truecolor line.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`arena`] | One zeroed byte block split into grids and framebuffer |
//! | [`palette`] | 256-entry fire palette |
//! | [`fire`] | The fire automaton and its session |
//! | [`line`] | In-place digit encoder for 27-byte truecolor dots |
//! | [`plugin`] | The configure/advance/encode contract |
//! | [`dots`] | Seeded random-dots effect |
//! | [`config`] | Arena size and reconfigure policy |
//!
//! # Example
//!
//! ```
//! use ember_core::fire::FireSession;
//! use ember_core::line::skeleton_line;
//!
//! let mut fire = FireSession::new();
//! fire.configure(40, 12).unwrap();
//! let mut lines: Vec<Vec<u8>> = (0..12).map(|_| skeleton_line(b"", 40, b"\n")).collect();
//!
//! fire.advance().unwrap();
//! for (row, line) in lines.iter_mut().enumerate() {
//!     fire.encode_row(line, 0, row as u16).unwrap();
//! }
//! ```
//!
//! # Feature Flags
//!
//! - `tracing`: configure/reject events and a `fire_advance` span per generation.

pub mod arena;
pub mod color;
pub mod config;
pub mod dots;
pub mod error;
pub mod fire;
pub mod line;
pub mod palette;
pub mod plugin;

pub use color::Rgb24;
pub use config::{KernelConfig, ReconfigurePolicy};
pub use dots::DotsEffect;
pub use error::KernelError;
pub use fire::FireSession;
pub use plugin::{EffectKind, PixelEffect};

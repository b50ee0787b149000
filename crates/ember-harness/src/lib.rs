#![forbid(unsafe_code)]

//! Headless host and golden-frame tooling for ember effects.
//!
//! - **Host**: [`HeadlessHost`] does what a terminal host would (build the
//!   skeleton lines once, configure, then advance + encode every row per frame)
//!   without touching a terminal.
//! - **Golden**: [`golden`] hashes frames into stable checksums and records runs
//!   as JSONL for diffing.
//!
//! # Quick Start
//!
//! ```
//! use ember_core::EffectKind;
//! use ember_harness::{HeadlessHost, HostOptions};
//!
//! let mut host = HeadlessHost::new(EffectKind::Fire, HostOptions::default()).unwrap();
//! host.configure(0, 16, 8).unwrap();
//! host.frame().unwrap();
//! assert_eq!(host.lines().len(), 8);
//! ```

pub mod golden;
pub mod host;
#[cfg(feature = "tracing")]
pub mod logging;

pub use golden::{GoldenRun, frame_checksum};
pub use host::{HeadlessHost, HostError, HostOptions};

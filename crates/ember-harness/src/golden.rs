#![forbid(unsafe_code)]

//! Golden frame checksums and JSONL run logs.
//!
//! # JSONL Schema
//!
//! ```json
//! {"event":"start","effect":"Fire","seed":0,"width":16,"height":8}
//! {"event":"frame","frame_id":0,"checksum":"fnv1a64:..."}
//! {"event":"resize","from":"16x8","to":"24x10"}
//! {"event":"complete","frames":2,"checksums":["fnv1a64:...","fnv1a64:..."]}
//! ```
//!
//! Checksums are FNV-1a over the raw line bytes, so they are stable across
//! platforms and toolchains and can be pinned in tests.

use serde_json::{Value, json};

use crate::host::{HeadlessHost, HostError};

/// Prefix identifying the checksum algorithm in logs.
const CHECKSUM_PREFIX: &str = "fnv1a64:";

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64 over a byte stream.
pub fn fnv1a64<'a, I>(chunks: I) -> u64
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut hash = FNV_OFFSET;
    for chunk in chunks {
        for &byte in chunk {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash
}

/// Checksum of a frame's lines, e.g. `fnv1a64:00ab...`.
pub fn frame_checksum(lines: &[Vec<u8>]) -> String {
    let hash = fnv1a64(lines.iter().map(Vec::as_slice));
    format!("{CHECKSUM_PREFIX}{hash:016x}")
}

/// A recorded run: one checksum per frame plus a JSONL event log.
#[derive(Debug, Clone, Default)]
pub struct GoldenRun {
    events: Vec<Value>,
    checksums: Vec<String>,
    size: (u16, u16),
}

impl GoldenRun {
    /// Configure `host` and start recording.
    pub fn start(
        host: &mut HeadlessHost,
        seed: u64,
        width: u16,
        height: u16,
    ) -> Result<Self, HostError> {
        host.configure(seed, width, height)?;
        let mut run = Self {
            size: (width, height),
            ..Self::default()
        };
        run.events.push(json!({
            "event": "start",
            "effect": host.effect_name(),
            "seed": seed,
            "width": width,
            "height": height,
        }));
        Ok(run)
    }

    /// Render `count` frames, recording each checksum.
    pub fn frames(&mut self, host: &mut HeadlessHost, count: usize) -> Result<(), HostError> {
        for _ in 0..count {
            host.frame()?;
            let checksum = frame_checksum(host.lines());
            self.events.push(json!({
                "event": "frame",
                "frame_id": self.checksums.len(),
                "checksum": checksum,
            }));
            self.checksums.push(checksum);
        }
        Ok(())
    }

    /// Reconfigure `host` mid-run.
    pub fn resize(
        &mut self,
        host: &mut HeadlessHost,
        seed: u64,
        width: u16,
        height: u16,
    ) -> Result<(), HostError> {
        host.configure(seed, width, height)?;
        let (from_w, from_h) = self.size;
        self.events.push(json!({
            "event": "resize",
            "from": format!("{from_w}x{from_h}"),
            "to": format!("{width}x{height}"),
        }));
        self.size = (width, height);
        Ok(())
    }

    /// Checksums recorded so far.
    pub fn checksums(&self) -> &[String] {
        &self.checksums
    }

    /// Close the run and render the log as JSONL.
    pub fn finish(mut self) -> String {
        self.events.push(json!({
            "event": "complete",
            "frames": self.checksums.len(),
            "checksums": self.checksums,
        }));
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&event.to_string());
            out.push('\n');
        }
        out
    }
}

#![forbid(unsafe_code)]

//! Kernel configuration.
//!
//! # Environment
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `EMBER_ARENA_CAPACITY` | Arena size in bytes (decimal or `0x` hex) | `0x1f0000` |
//! | `EMBER_ZERO_ON_RECONFIGURE` | `1`/`true` clears the arena on every configure | off |

/// Default arena size in bytes.
///
/// Holds a fire session of roughly 640x400 dots.
pub const DEFAULT_ARENA_CAPACITY: usize = 0x1f_0000;

/// Environment variable overriding [`KernelConfig::arena_capacity`].
pub const ENV_ARENA_CAPACITY: &str = "EMBER_ARENA_CAPACITY";

/// Environment variable selecting [`ReconfigurePolicy::ZeroFill`].
pub const ENV_ZERO_ON_RECONFIGURE: &str = "EMBER_ZERO_ON_RECONFIGURE";

/// What happens to arena contents when a session is configured again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReconfigurePolicy {
    /// Keep whatever bytes the previous layout left behind. Stale heat stays
    /// visible until enough generations overwrite it.
    #[default]
    KeepStale,
    /// Zero the used part of the arena before the new layout takes effect.
    ZeroFill,
}

/// Kernel configuration.
///
/// # Example
///
/// ```
/// use ember_core::config::{KernelConfig, ReconfigurePolicy};
///
/// let config = KernelConfig::default()
///     .with_arena_capacity(64 * 1024)
///     .with_reconfigure(ReconfigurePolicy::ZeroFill);
/// assert_eq!(config.arena_capacity, 64 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Arena size in bytes. Allocated zeroed once per session.
    pub arena_capacity: usize,
    /// Arena treatment on reconfigure.
    pub reconfigure: ReconfigurePolicy,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            reconfigure: ReconfigurePolicy::KeepStale,
        }
    }
}

impl KernelConfig {
    /// Set the arena capacity in bytes.
    #[must_use]
    pub fn with_arena_capacity(mut self, capacity: usize) -> Self {
        self.arena_capacity = capacity;
        self
    }

    /// Set the reconfigure policy.
    #[must_use]
    pub fn with_reconfigure(mut self, policy: ReconfigurePolicy) -> Self {
        self.reconfigure = policy;
        self
    }

    /// Build a config from the process environment.
    ///
    /// Unset or unparsable variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(capacity) = lookup(ENV_ARENA_CAPACITY).and_then(|v| parse_capacity(&v)) {
            config.arena_capacity = capacity;
        }
        if lookup(ENV_ZERO_ON_RECONFIGURE)
            .is_some_and(|v| v.trim() == "1" || v.trim().eq_ignore_ascii_case("true"))
        {
            config.reconfigure = ReconfigurePolicy::ZeroFill;
        }
        config
    }
}

fn parse_capacity(value: &str) -> Option<usize> {
    let value = value.trim();
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

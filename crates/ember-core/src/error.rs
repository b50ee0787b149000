#![forbid(unsafe_code)]

//! Errors reported at the host/kernel boundary.

/// Kernel errors.
///
/// Every variant is a violated caller precondition. A rejected call leaves the
/// session exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// The configured dimensions need more bytes than the arena holds.
    ArenaTooSmall { required: usize, capacity: usize },
    /// `advance` or `encode_row` was called before `configure`.
    NotConfigured,
    /// `encode_row` was asked for a row outside the visible area.
    RowOutOfRange { row: u16, rows: usize },
    /// The host buffer cannot hold `offset + width` dot templates.
    BufferTooShort { required: usize, len: usize },
}

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArenaTooSmall { required, capacity } => {
                write!(f, "arena too small: need {required} bytes, have {capacity}")
            }
            Self::NotConfigured => write!(f, "effect used before configure"),
            Self::RowOutOfRange { row, rows } => {
                write!(f, "row {row} out of range (visible rows: {rows})")
            }
            Self::BufferTooShort { required, len } => {
                write!(f, "line buffer too short: need {required} bytes, got {len}")
            }
        }
    }
}

impl std::error::Error for KernelError {}

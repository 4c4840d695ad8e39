//! Store error types for stk-store.

use stk_core::errors::CoreError;
use thiserror::Error;

/// Errors from catalog operations and trail persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A schema or record rule was violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing the trail file failed.
    #[error("Trail I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A trail payload could not be encoded or decoded.
    #[error("Trail serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A trail line could not be applied during rebuild.
    #[error("Replay failed at trail line {line}: {reason}")]
    Replay { line: usize, reason: String },
}

impl StoreError {
    /// The wrapped core error, if this is a rule violation rather than a
    /// storage failure.
    #[must_use]
    pub const fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(err) => Some(err),
            _ => None,
        }
    }

    /// Stable machine-readable name of the error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Core(err) => err.kind(),
            Self::Io(_) | Self::Serialization(_) => "storage_error",
            Self::Replay { .. } => "replay_error",
        }
    }
}

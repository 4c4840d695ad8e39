//! Transport error types.

use stk_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    /// Boundary schemas failed to compile.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for the registry.

use thiserror::Error;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur during registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("The election {0} already exists")]
    AlreadyExists(String),

    #[error("The election {0} does not exist")]
    NotFound(String),

    #[error("The election {id} is corrupt: {reason}")]
    CorruptRecord { id: String, reason: String },

    /// Failure reported by the underlying ledger. Passed through untouched.
    #[error("Store failure: {0}")]
    Store(#[from] std::io::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Operation {operation} expects {expected} argument(s), got {got}")]
    InvalidArguments {
        operation: &'static str,
        expected: usize,
        got: usize,
    },
}

//! Server error types.

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that are fatal to the server process.
///
/// Per-request failures are not here: they collapse into the wire denial
/// sentinel (see [`crate::handler::DenialReason`]) or abort only their own
/// connection.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("key material could not be loaded: {0}")]
    KeyLoad(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

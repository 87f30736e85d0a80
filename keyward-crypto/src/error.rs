//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("ciphertext length or padding is invalid")]
    Padding,

    #[error("key wrap failed: {0}")]
    Wrap(String),

    #[error("key unwrap failed: {0}")]
    Unwrap(String),

    #[error("signing failed: {0}")]
    Sign(String),

    #[error("key material could not be loaded: {0}")]
    KeyLoad(String),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}

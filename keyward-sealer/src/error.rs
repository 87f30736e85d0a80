//! Sealer error types.

use keyward_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while sealing a payload.
#[derive(Debug, Error)]
pub enum SealerError {
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

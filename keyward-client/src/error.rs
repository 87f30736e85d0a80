//! Client error types.

use keyward_crypto::CryptoError;
use keyward_proto::ProtoError;
use thiserror::Error;

/// Errors a recovery attempt can hit.
///
/// Distinct kinds exist for logging and tests only. User-facing surfaces
/// must collapse all of them into one uniform denial; see the binary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("recovery denied by server")]
    Denied,

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("protocol error: {0}")]
    Proto(#[from] ProtoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Asymmetric key wrapping for escrow transport.
//!
//! Content keys travel wrapped under the master RSA public key using
//! PKCS#1 v1.5 encryption padding. The padding predates OAEP and is kept
//! only because the wrapped-key blob format requires it; the padding bytes
//! are random per call, so wrapping the same key twice yields different
//! blobs that unwrap to the identical key.

use crate::error::{CryptoError, CryptoResult};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

/// Wraps raw key bytes under an RSA public key.
///
/// The output length equals the modulus size of `public` (256 bytes for a
/// 2048-bit key).
pub fn wrap_key(public: &RsaPublicKey, key_bytes: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut rng = rand::thread_rng();
    public
        .encrypt(&mut rng, Pkcs1v15Encrypt, key_bytes)
        .map_err(|e| CryptoError::Wrap(e.to_string()))
}

/// Unwraps a wrapped-key blob with the matching RSA private key.
///
/// Fails with [`CryptoError::Unwrap`] on any padding or format mismatch,
/// most commonly a blob wrapped under a different key pair.
pub fn unwrap_key(private: &RsaPrivateKey, wrapped: &[u8]) -> CryptoResult<Vec<u8>> {
    private
        .decrypt(Pkcs1v15Encrypt, wrapped)
        .map_err(|e| CryptoError::Unwrap(e.to_string()))
}

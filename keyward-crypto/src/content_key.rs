//! Per-payload symmetric content keys.

use crate::error::{CryptoError, CryptoResult};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a content key in bytes (256 bits).
pub const CONTENT_KEY_SIZE: usize = 32;

/// A 256-bit symmetric key protecting one sealed payload.
///
/// Generated fresh per payload and held only transiently: the sealer drops
/// it right after wrapping, the server right after answering, the client
/// right after decrypting. The key bytes are zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ContentKey([u8; CONTENT_KEY_SIZE]);

impl ContentKey {
    /// Generates a fresh random content key from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; CONTENT_KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Reconstructs a content key from raw bytes, e.g. after an unwrap.
    ///
    /// Fails if the blob is not exactly [`CONTENT_KEY_SIZE`] bytes; an
    /// unwrap that yields any other length did not produce a content key.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != CONTENT_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: CONTENT_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut key = [0u8; CONTENT_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; CONTENT_KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for ContentKey {
    // Key material must never end up in logs via {:?}.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ContentKey(..)")
    }
}

//! Symmetric payload encryption.
//!
//! AES-256-CBC with PKCS#7 padding and a **fixed all-zero IV**. Encryption
//! is therefore deterministic for a given (key, plaintext) pair: repeated
//! payloads under the same key produce identical ciphertext. This is a known
//! weakness of the escrow file format, preserved exactly so ciphertext
//! written by any sealer decrypts on any client. It is not a scheme to reuse
//! in new designs; content keys are single-use, which bounds the damage.

use crate::content_key::ContentKey;
use crate::error::{CryptoError, CryptoResult};
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

/// AES block size in bytes. Valid ciphertext is a non-zero multiple of this.
pub const BLOCK_SIZE: usize = 16;

const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encrypts a payload under a content key.
///
/// The output length is the plaintext length rounded up to the next block
/// boundary; an exact multiple (including empty input) gains a full padding
/// block.
pub fn encrypt(key: &ContentKey, plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.as_bytes().into(), &ZERO_IV.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypts a payload encrypted with [`encrypt`].
///
/// Fails with [`CryptoError::Padding`] when the ciphertext length is not a
/// non-zero multiple of [`BLOCK_SIZE`] or the final block's PKCS#7 padding
/// is malformed (wrong key, truncation, corruption).
pub fn decrypt(key: &ContentKey, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::Padding);
    }
    Aes256CbcDec::new(key.as_bytes().into(), &ZERO_IV.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Padding)
}

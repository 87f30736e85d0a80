//! Escrow encryptor ("sealer").
//!
//! Seals a payload: generate a fresh content key, encrypt the payload with
//! it, wrap the key under the master public key, and discard the plaintext
//! key. The sealed outputs are all anyone (including this process, a
//! moment later) has; only the escrow server can get the content key
//! back.

pub mod error;
pub mod master;

pub use error::SealerError;
pub use master::{embedded_master_key, master_key_from, EMBEDDED_MASTER_KEY_B64};

use keyward_crypto::{ContentKey, RsaPublicKey};
use std::path::{Path, PathBuf};
use tracing::info;

/// Output of one seal operation.
#[derive(Clone, Debug)]
pub struct SealedPayload {
    /// Payload encrypted under the (now discarded) content key.
    pub ciphertext: Vec<u8>,
    /// Content key wrapped under the master public key.
    pub wrapped_key: Vec<u8>,
}

/// Seals a payload under a fresh content key.
///
/// The content key exists only inside this function and is zeroized when
/// it returns; from here on the wrapped blob is the sole handle to it.
pub fn seal(payload: &[u8], master_public: &RsaPublicKey) -> Result<SealedPayload, SealerError> {
    let key = ContentKey::generate();
    let ciphertext = keyward_crypto::encrypt(&key, payload);
    let wrapped_key = keyward_crypto::wrap_key(master_public, key.as_bytes())?;

    Ok(SealedPayload {
        ciphertext,
        wrapped_key,
    })
}

/// Paths written by [`seal_file`].
#[derive(Clone, Debug)]
pub struct SealedFiles {
    pub ciphertext_path: PathBuf,
    pub wrapped_key_path: PathBuf,
}

/// Seals a file on disk, writing `<path>.enc` and `<path>.wk` beside it.
///
/// The original payload file is left untouched.
pub async fn seal_file(
    path: &Path,
    master_public: &RsaPublicKey,
) -> Result<SealedFiles, SealerError> {
    let payload = tokio::fs::read(path).await?;
    let sealed = seal(&payload, master_public)?;

    let ciphertext_path = with_added_extension(path, "enc");
    let wrapped_key_path = with_added_extension(path, "wk");
    tokio::fs::write(&ciphertext_path, &sealed.ciphertext).await?;
    tokio::fs::write(&wrapped_key_path, &sealed.wrapped_key).await?;

    info!(
        payload = %path.display(),
        ciphertext = %ciphertext_path.display(),
        wrapped_key = %wrapped_key_path.display(),
        "payload sealed"
    );
    Ok(SealedFiles {
        ciphertext_path,
        wrapped_key_path,
    })
}

fn with_added_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

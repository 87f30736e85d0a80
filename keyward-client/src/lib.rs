//! Recovery client.
//!
//! Given an identity, its private key, and a wrapped-key blob, proves
//! control of the identity to the escrow server, receives the unwrapped
//! content key, and decrypts the sealed payload locally.
//!
//! The library keeps failure kinds distinct ([`ClientError`]) so callers
//! and tests can observe what went wrong. The binary deliberately does
//! not: every failure (signing, connection, denial, decryption) is
//! presented to the user as the same denial. An attacker watching the
//! client must learn nothing about *why* recovery failed.

pub mod error;

pub use error::ClientError;

use keyward_crypto::{ContentKey, RsaPrivateKey};
use keyward_proto::{signed_payload, RecoveryRequest, RecoveryResponse};
use std::path::Path;
use tokio::net::TcpStream;
use tracing::{debug, info};

/// Connection parameters for one recovery attempt.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Server address, e.g. `"198.51.100.7:4050"`.
    pub server_addr: String,
    /// Registered identity name to claim.
    pub identity: String,
}

/// Recovers the content key inside `wrapped_key` from the escrow server.
///
/// Signs the canonical payload (identity + raw wrapped-key bytes) with
/// `identity_key`, performs the framed exchange, and checks the returned
/// blob is an exact content key.
pub async fn recover(
    config: &ClientConfig,
    identity_key: &RsaPrivateKey,
    wrapped_key: &[u8],
) -> Result<ContentKey, ClientError> {
    let payload = signed_payload(&config.identity, wrapped_key);
    let signature = keyward_crypto::sign(identity_key, &payload)?;

    debug!(addr = %config.server_addr, identity = %config.identity, "requesting key recovery");
    let mut stream = TcpStream::connect(&config.server_addr).await?;

    let request = RecoveryRequest {
        identity: config.identity.clone(),
        wrapped_key: wrapped_key.to_vec(),
        signature,
    };
    request.write_to(&mut stream).await?;

    match RecoveryResponse::read_from(&mut stream).await? {
        RecoveryResponse::Denied => Err(ClientError::Denied),
        RecoveryResponse::Key(bytes) => Ok(ContentKey::from_bytes(&bytes)?),
    }
}

/// Recovers a sealed file end to end.
///
/// Reads the wrapped-key blob and ciphertext from disk, runs [`recover`],
/// decrypts, and writes the plaintext to `output`. The content key is
/// dropped (zeroized) before this returns.
pub async fn recover_file(
    config: &ClientConfig,
    identity_key: &RsaPrivateKey,
    ciphertext_path: &Path,
    wrapped_key_path: &Path,
    output: &Path,
) -> Result<(), ClientError> {
    let wrapped_key = tokio::fs::read(wrapped_key_path).await?;
    let key = recover(config, identity_key, &wrapped_key).await?;

    let ciphertext = tokio::fs::read(ciphertext_path).await?;
    let plaintext = keyward_crypto::decrypt(&key, &ciphertext)?;
    tokio::fs::write(output, &plaintext).await?;

    info!(
        ciphertext = %ciphertext_path.display(),
        output = %output.display(),
        bytes = plaintext.len(),
        "payload recovered"
    );
    Ok(())
}

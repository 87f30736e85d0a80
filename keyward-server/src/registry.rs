//! Identity public key registry.
//!
//! Registered identities live as `<identity>.pub` files (SPKI) in one
//! directory. Resolution happens per request with no caching, so a key
//! dropped into the directory is live immediately and a removed one stops
//! authenticating on the next request.

use keyward_crypto::{CryptoError, CryptoResult, RsaPublicKey};
use std::path::PathBuf;
use tracing::debug;

/// Longest identity name the registry will look up.
const MAX_IDENTITY_LEN: usize = 128;

/// Resolves identity names to registered public keys, failing closed.
#[derive(Clone, Debug)]
pub struct IdentityRegistry {
    dir: PathBuf,
}

impl IdentityRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves an identity name to exactly one public key.
    ///
    /// Fails closed on anything else: unknown identity, unreadable or
    /// malformed key file, or an identity name that is not a plain file
    /// stem (path separators and `..` would escape the registry
    /// directory).
    pub fn resolve(&self, identity: &str) -> CryptoResult<RsaPublicKey> {
        if !is_valid_identity(identity) {
            return Err(CryptoError::KeyLoad(format!(
                "identity name rejected: {identity:?}"
            )));
        }
        let path = self.dir.join(format!("{identity}.pub"));
        debug!(identity, path = %path.display(), "resolving identity key");
        keyward_crypto::public_key_from_file(&path)
    }
}

fn is_valid_identity(identity: &str) -> bool {
    !identity.is_empty()
        && identity.len() <= MAX_IDENTITY_LEN
        && identity != "."
        && identity != ".."
        && identity
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

//! The master escrow public key.
//!
//! Release builds carry the deployment's master public key compiled in, so
//! a sealer needs no key files at all; `--master-key` overrides it for
//! other deployments and for tests, which pair it with their own private
//! half.

use keyward_crypto::{CryptoResult, RsaPublicKey};
use std::path::Path;

/// Base64-encoded SPKI DER of the distribution master public key.
pub const EMBEDDED_MASTER_KEY_B64: &str = concat!(
    "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAqW9Skh563WZyyNnXOz3kK8QZpuZZ3rIw",
    "nFpPqoymMIiHlLBfvDKlHzw1xWFTqISBLkgjOCrDnFDy/LZo8hTFWdXoxoSHvZo/tzNkVNObjuln",
    "eQTy8TXdtcdPxHDa5EKjXUTjseljPB8rgstU/ciFPb/sFTRWR0BPb0Sj0PDPE/zHW+mjVfK/3gDT",
    "+RNAdZpQr6w16YiQqtuRrQOQLqwqtt1Ak/Oz49QXaK74mO+6QGtyfIC28ZpIXv5vxYZ6fcnb1qbm",
    "aouf6RxvVLAHoX1eWi/s2Ykur2A0jho41GGXt0HVxEQouCxho46PERCUQT1LE1dZetfJ4WT3L7Z6",
    "Q6BYuQIDAQAB",
);

/// Parses the embedded master public key.
pub fn embedded_master_key() -> CryptoResult<RsaPublicKey> {
    keyward_crypto::public_key_from_b64(EMBEDDED_MASTER_KEY_B64)
}

/// Returns the master public key to seal under: the file at `path` when
/// given, the embedded key otherwise.
pub fn master_key_from(path: Option<&Path>) -> CryptoResult<RsaPublicKey> {
    match path {
        Some(path) => keyward_crypto::public_key_from_file(path),
        None => embedded_master_key(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_key_parses_and_wraps() {
        let key = embedded_master_key().unwrap();
        let wrapped = keyward_crypto::wrap_key(&key, &[0u8; 32]).unwrap();
        assert_eq!(wrapped.len(), 256, "distribution master key is RSA-2048");
    }

    #[test]
    fn override_path_wins_over_embedded() {
        let (_, public) = keyward_crypto::generate_keypair(1024).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master.pub");
        std::fs::write(&path, keyward_crypto::public_key_to_der(&public).unwrap()).unwrap();

        let loaded = master_key_from(Some(&path)).unwrap();
        assert_eq!(
            keyward_crypto::public_key_to_der(&loaded).unwrap(),
            keyward_crypto::public_key_to_der(&public).unwrap()
        );
    }
}

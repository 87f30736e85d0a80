//! Identity signatures over recovery requests.
//!
//! SHA-256 digest signed with the identity's RSA private key using PKCS#1
//! v1.5 signature padding. The payload being signed is the canonical byte
//! sequence both protocol sides construct independently; this module only
//! sees opaque bytes.

use crate::error::{CryptoError, CryptoResult};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Signs a payload with an identity private key.
pub fn sign(private: &RsaPrivateKey, payload: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut rng = rand::thread_rng();
    let digest = Sha256::digest(payload);
    private
        .sign_with_rng(&mut rng, Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| CryptoError::Sign(e.to_string()))
}

/// Verifies a signature over a payload.
///
/// Returns `false` for any signature that does not verify: bad signature
/// bytes, altered payload, or a key that never signed it. Never errs on
/// signature content; a structurally unusable public key is caught when the
/// key is loaded, before it reaches this function.
pub fn verify(public: &RsaPublicKey, payload: &[u8], signature: &[u8]) -> bool {
    let digest = Sha256::digest(payload);
    public
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}

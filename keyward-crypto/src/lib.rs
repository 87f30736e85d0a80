//! Cryptographic primitives for Keyward.
//!
//! Provides the stateless operations the escrow protocol is built on:
//! - AES-256-CBC symmetric encryption for payload content
//! - RSA PKCS#1 v1.5 key wrapping for escrowing content keys
//! - SHA-256 + RSA PKCS#1 v1.5 signatures for identity proof
//! - Key material loading (PKCS#8 / SPKI, DER, PEM, base64-wrapped DER)
//!
//! # Architecture
//!
//! The protocol uses a two-tier key system:
//!
//! 1. **Content Key**: a fresh random 256-bit key generated per sealed
//!    payload. It encrypts the payload, is immediately wrapped under the
//!    master public key, and is then dropped; it never exists at rest in
//!    the clear.
//!
//! 2. **Master Key Pair**: a long-lived RSA pair. The public half is
//!    distributed to sealers; the private half is held only by the recovery
//!    server, which unwraps content keys for authenticated identities.
//!
//! Two primitives here are deliberately legacy: the symmetric cipher runs
//! CBC with a fixed all-zero IV (deterministic ciphertext), and the wrap
//! uses PKCS#1 v1.5 encryption padding rather than OAEP. Both are fixed by
//! the wire/file format this crate must stay compatible with and are
//! documented at their definition sites. Do not reuse them elsewhere.

pub mod content_key;
pub mod error;
pub mod keys;
pub mod signature;
pub mod symmetric;
pub mod wrap;

pub use content_key::{ContentKey, CONTENT_KEY_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use keys::{
    generate_keypair, private_key_from_der, private_key_from_file, private_key_from_pem,
    private_key_to_b64, private_key_to_der, public_key_from_b64, public_key_from_der,
    public_key_from_file, public_key_from_pem, public_key_to_der,
};
pub use signature::{sign, verify};
pub use symmetric::{decrypt, encrypt, BLOCK_SIZE};
pub use wrap::{unwrap_key, wrap_key};

// Key types appear throughout the downstream crates' APIs; re-export them so
// only this crate depends on the `rsa` version in use.
pub use rsa::{RsaPrivateKey, RsaPublicKey};

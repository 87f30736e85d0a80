//! Key material loading and encoding.
//!
//! Private keys are PKCS#8, public keys are SPKI. Three on-disk encodings
//! appear in deployments: raw DER, PEM, and base64-wrapped DER (a single
//! base64 text blob with no PEM armor, the format master key files use).
//! The `*_from_file` loaders sniff the encoding so callers never care.

use crate::error::{CryptoError, CryptoResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::path::Path;

/// Generates a fresh RSA key pair.
///
/// Provisioning of real master and identity keys happens outside this
/// system; this exists for test fixtures and local experiments.
pub fn generate_keypair(bits: usize) -> CryptoResult<(RsaPrivateKey, RsaPublicKey)> {
    let mut rng = rand::thread_rng();
    let private =
        RsaPrivateKey::new(&mut rng, bits).map_err(|e| CryptoError::KeyLoad(e.to_string()))?;
    let public = RsaPublicKey::from(&private);
    Ok((private, public))
}

/// Parses a private key from PKCS#8 DER bytes.
pub fn private_key_from_der(der: &[u8]) -> CryptoResult<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_der(der).map_err(|e| CryptoError::KeyLoad(e.to_string()))
}

/// Parses a private key from PKCS#8 PEM text.
pub fn private_key_from_pem(pem: &str) -> CryptoResult<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem).map_err(|e| CryptoError::KeyLoad(e.to_string()))
}

/// Parses a public key from SPKI DER bytes.
pub fn public_key_from_der(der: &[u8]) -> CryptoResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der).map_err(|e| CryptoError::KeyLoad(e.to_string()))
}

/// Parses a public key from SPKI PEM text.
pub fn public_key_from_pem(pem: &str) -> CryptoResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem).map_err(|e| CryptoError::KeyLoad(e.to_string()))
}

/// Parses a public key from base64-wrapped SPKI DER (whitespace tolerated).
pub fn public_key_from_b64(text: &str) -> CryptoResult<RsaPublicKey> {
    public_key_from_der(&decode_b64(text)?)
}

/// Encodes a private key as PKCS#8 DER.
pub fn private_key_to_der(key: &RsaPrivateKey) -> CryptoResult<Vec<u8>> {
    Ok(key
        .to_pkcs8_der()
        .map_err(|e| CryptoError::KeyLoad(e.to_string()))?
        .as_bytes()
        .to_vec())
}

/// Encodes a private key as base64-wrapped PKCS#8 DER (master key file format).
pub fn private_key_to_b64(key: &RsaPrivateKey) -> CryptoResult<String> {
    Ok(BASE64.encode(private_key_to_der(key)?))
}

/// Encodes a public key as SPKI DER.
pub fn public_key_to_der(key: &RsaPublicKey) -> CryptoResult<Vec<u8>> {
    Ok(key
        .to_public_key_der()
        .map_err(|e| CryptoError::KeyLoad(e.to_string()))?
        .as_bytes()
        .to_vec())
}

/// Loads a private key from a file, sniffing PEM, base64 DER, or raw DER.
pub fn private_key_from_file(path: &Path) -> CryptoResult<RsaPrivateKey> {
    let bytes = read_key_file(path)?;
    if let Some(pem) = as_pem(&bytes) {
        return private_key_from_pem(pem).map_err(|e| at_path(path, e));
    }
    if let Some(der) = as_b64_der(&bytes) {
        return private_key_from_der(&der).map_err(|e| at_path(path, e));
    }
    private_key_from_der(&bytes).map_err(|e| at_path(path, e))
}

/// Loads a public key from a file, sniffing PEM, base64 DER, or raw DER.
pub fn public_key_from_file(path: &Path) -> CryptoResult<RsaPublicKey> {
    let bytes = read_key_file(path)?;
    if let Some(pem) = as_pem(&bytes) {
        return public_key_from_pem(pem).map_err(|e| at_path(path, e));
    }
    if let Some(der) = as_b64_der(&bytes) {
        return public_key_from_der(&der).map_err(|e| at_path(path, e));
    }
    public_key_from_der(&bytes).map_err(|e| at_path(path, e))
}

fn read_key_file(path: &Path) -> CryptoResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| CryptoError::KeyLoad(format!("{}: {e}", path.display())))
}

fn at_path(path: &Path, err: CryptoError) -> CryptoError {
    CryptoError::KeyLoad(format!("{}: {err}", path.display()))
}

fn as_pem(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    text.trim_start().starts_with("-----BEGIN").then_some(text)
}

fn as_b64_der(bytes: &[u8]) -> Option<Vec<u8>> {
    let text = std::str::from_utf8(bytes).ok()?;
    decode_b64(text).ok()
}

fn decode_b64(text: &str) -> CryptoResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(compact)
        .map_err(|e| CryptoError::KeyLoad(format!("invalid base64 key encoding: {e}")))
}

//! Canonical signed payload construction.

/// Builds the exact byte sequence an identity signs to authorize a recovery.
///
/// Layout: the identity as a u16 big-endian length prefix plus UTF-8 bytes,
/// followed by the raw wrapped-key bytes (the blob itself, not a digest).
/// The client signs this and the server rebuilds it independently from the
/// request fields; the two sequences must be byte-identical or verification
/// fails. Keep this the single definition both sides call.
pub fn signed_payload(identity: &str, wrapped_key: &[u8]) -> Vec<u8> {
    let ident = identity.as_bytes();
    debug_assert!(ident.len() <= u16::MAX as usize, "identity exceeds frame limit");

    let mut payload = Vec::with_capacity(2 + ident.len() + wrapped_key.len());
    payload.extend_from_slice(&(ident.len() as u16).to_be_bytes());
    payload.extend_from_slice(ident);
    payload.extend_from_slice(wrapped_key);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_length_prefix_identity_then_raw_blob() {
        let payload = signed_payload("alice", &[0xDE, 0xAD]);
        assert_eq!(payload, [0x00, 0x05, b'a', b'l', b'i', b'c', b'e', 0xDE, 0xAD]);
    }

    #[test]
    fn identity_length_is_big_endian() {
        let identity = "x".repeat(0x1_02);
        let payload = signed_payload(&identity, &[]);
        assert_eq!(&payload[..2], &[0x01, 0x02]);
    }

    #[test]
    fn different_identities_never_collide() {
        // The length prefix keeps ("ab", [b'c']) distinct from ("a", [b'b', b'c']).
        let first = signed_payload("ab", b"c");
        let second = signed_payload("a", b"bc");
        assert_ne!(first, second);
    }
}

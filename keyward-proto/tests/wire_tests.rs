//! Wire-level tests for the recovery protocol framing.
//!
//! Everything here runs over an in-process duplex pipe; the byte layout
//! assertions pin the exact frame format that deployed clients and servers
//! already speak.

use keyward_proto::{
    signed_payload, ProtoError, RecoveryRequest, RecoveryResponse, DENIAL_SENTINEL,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn sample_request() -> RecoveryRequest {
    RecoveryRequest {
        identity: "alice".to_string(),
        wrapped_key: vec![0xAA; 128],
        signature: vec![0xBB; 128],
    }
}

// ── Request Framing ──

#[tokio::test]
async fn request_round_trip() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = sample_request();

    request.write_to(&mut client).await.unwrap();
    let received = RecoveryRequest::read_from(&mut server).await.unwrap();

    assert_eq!(received, request);
}

#[tokio::test]
async fn request_bytes_match_fixed_layout() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    let request = RecoveryRequest {
        identity: "bob".to_string(),
        wrapped_key: vec![0x01, 0x02],
        signature: vec![0x03],
    };
    request.write_to(&mut client).await.unwrap();
    drop(client);

    let mut raw = Vec::new();
    server.read_to_end(&mut raw).await.unwrap();
    assert_eq!(
        raw,
        [
            0x00, 0x03, b'b', b'o', b'b', // identity
            0x00, 0x00, 0x00, 0x02, 0x01, 0x02, // wrapped key
            0x00, 0x00, 0x00, 0x01, 0x03, // signature
        ]
    );
}

#[tokio::test]
async fn truncated_request_is_an_error() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    client.write_u16(5).await.unwrap();
    client.write_all(b"alice").await.unwrap();
    client.write_i32(64).await.unwrap();
    client.write_all(&[0u8; 10]).await.unwrap();
    drop(client);

    assert!(matches!(
        RecoveryRequest::read_from(&mut server).await,
        Err(ProtoError::Io(_))
    ));
}

#[tokio::test]
async fn negative_wrapped_key_length_is_an_error() {
    let (mut client, mut server) = tokio::io::duplex(4096);
    client.write_u16(5).await.unwrap();
    client.write_all(b"alice").await.unwrap();
    client.write_i32(-32).await.unwrap();
    drop(client);

    assert!(matches!(
        RecoveryRequest::read_from(&mut server).await,
        Err(ProtoError::Frame(_))
    ));
}

// ── Response Framing ──

#[tokio::test]
async fn key_response_round_trip() {
    let (mut server, mut client) = tokio::io::duplex(4096);
    let response = RecoveryResponse::Key(vec![0x11; 32]);

    response.write_to(&mut server).await.unwrap();
    let received = RecoveryResponse::read_from(&mut client).await.unwrap();

    assert_eq!(received, response);
}

#[tokio::test]
async fn denial_is_a_bare_negative_length() {
    let (mut server, mut client) = tokio::io::duplex(64);
    RecoveryResponse::Denied.write_to(&mut server).await.unwrap();
    drop(server);

    let mut raw = Vec::new();
    client.read_to_end(&mut raw).await.unwrap();
    assert_eq!(raw, DENIAL_SENTINEL.to_be_bytes());
}

#[tokio::test]
async fn any_negative_response_length_reads_as_denial() {
    for len in [-1i32, -2, i32::MIN] {
        let (mut server, mut client) = tokio::io::duplex(64);
        server.write_i32(len).await.unwrap();
        let response = RecoveryResponse::read_from(&mut client).await.unwrap();
        assert_eq!(response, RecoveryResponse::Denied, "length {len} must deny");
    }
}

// ── Canonical Payload ──

#[tokio::test]
async fn request_payload_matches_standalone_builder() {
    let request = sample_request();
    assert_eq!(
        request.signed_payload(),
        signed_payload(&request.identity, &request.wrapped_key)
    );
}

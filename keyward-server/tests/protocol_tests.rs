//! Protocol tests against a live server on an ephemeral port.
//!
//! These drive the real accept loop over TCP: authentication soundness,
//! the denial sentinel, resilience against malformed frames, and the
//! strictly sequential connection handling.

use keyward_crypto::{
    generate_keypair, public_key_to_der, sign, wrap_key, ContentKey, RsaPrivateKey, RsaPublicKey,
};
use keyward_proto::{signed_payload, RecoveryRequest, RecoveryResponse};
use keyward_server::{EscrowServer, IdentityRegistry, ServerConfig, ServerContext};
use std::net::SocketAddr;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const TEST_KEY_BITS: usize = 1024;

struct TestEscrow {
    addr: SocketAddr,
    master_public: RsaPublicKey,
    identity_private: RsaPrivateKey,
    _registry_dir: TempDir,
}

/// Boots a server with one registered identity ("alice") on port 0.
async fn start_escrow() -> TestEscrow {
    let (master_private, master_public) = generate_keypair(TEST_KEY_BITS).unwrap();
    let (identity_private, identity_public) = generate_keypair(TEST_KEY_BITS).unwrap();

    let registry_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        registry_dir.path().join("alice.pub"),
        public_key_to_der(&identity_public).unwrap(),
    )
    .unwrap();

    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        ..ServerConfig::default()
    };
    let ctx = ServerContext {
        master_key: master_private,
        registry: IdentityRegistry::new(registry_dir.path()),
    };

    let server = EscrowServer::bind(&config, ctx).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.serve());

    TestEscrow {
        addr,
        master_public,
        identity_private,
        _registry_dir: registry_dir,
    }
}

fn valid_request(escrow: &TestEscrow, key: &ContentKey) -> RecoveryRequest {
    let wrapped = wrap_key(&escrow.master_public, key.as_bytes()).unwrap();
    let payload = signed_payload("alice", &wrapped);
    RecoveryRequest {
        identity: "alice".to_string(),
        wrapped_key: wrapped,
        signature: sign(&escrow.identity_private, &payload).unwrap(),
    }
}

async fn exchange(addr: SocketAddr, request: &RecoveryRequest) -> RecoveryResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    request.write_to(&mut stream).await.unwrap();
    RecoveryResponse::read_from(&mut stream).await.unwrap()
}

// ── Happy Path ──

#[tokio::test]
async fn valid_request_recovers_the_content_key() {
    let escrow = start_escrow().await;
    let key = ContentKey::generate();

    let response = exchange(escrow.addr, &valid_request(&escrow, &key)).await;

    assert_eq!(response, RecoveryResponse::Key(key.as_bytes().to_vec()));
}

// ── Authentication Soundness ──

#[tokio::test]
async fn flipped_wrapped_key_bit_is_denied() {
    let escrow = start_escrow().await;
    let mut request = valid_request(&escrow, &ContentKey::generate());
    request.wrapped_key[7] ^= 0x01;

    assert_eq!(exchange(escrow.addr, &request).await, RecoveryResponse::Denied);
}

#[tokio::test]
async fn flipped_identity_is_denied() {
    let escrow = start_escrow().await;
    let mut request = valid_request(&escrow, &ContentKey::generate());
    request.identity = "alicf".to_string();

    assert_eq!(exchange(escrow.addr, &request).await, RecoveryResponse::Denied);
}

#[tokio::test]
async fn flipped_signature_is_denied() {
    let escrow = start_escrow().await;
    let mut request = valid_request(&escrow, &ContentKey::generate());
    let last = request.signature.len() - 1;
    request.signature[last] ^= 0x80;

    assert_eq!(exchange(escrow.addr, &request).await, RecoveryResponse::Denied);
}

#[tokio::test]
async fn cross_identity_signature_is_denied() {
    let escrow = start_escrow().await;
    let (_, bob_public) = generate_keypair(TEST_KEY_BITS).unwrap();
    std::fs::write(
        escrow._registry_dir.path().join("bob.pub"),
        public_key_to_der(&bob_public).unwrap(),
    )
    .unwrap();

    // Signed with Alice's key, presented as Bob.
    let wrapped = wrap_key(&escrow.master_public, ContentKey::generate().as_bytes()).unwrap();
    let payload = signed_payload("bob", &wrapped);
    let request = RecoveryRequest {
        identity: "bob".to_string(),
        wrapped_key: wrapped,
        signature: sign(&escrow.identity_private, &payload).unwrap(),
    };

    assert_eq!(exchange(escrow.addr, &request).await, RecoveryResponse::Denied);
}

#[tokio::test]
async fn unregistered_identity_is_denied() {
    let escrow = start_escrow().await;
    let mut request = valid_request(&escrow, &ContentKey::generate());
    request.identity = "ghost".to_string();

    assert_eq!(exchange(escrow.addr, &request).await, RecoveryResponse::Denied);
}

#[tokio::test]
async fn denial_sentinel_is_minus_one_with_no_trailing_bytes() {
    let escrow = start_escrow().await;
    let mut request = valid_request(&escrow, &ContentKey::generate());
    request.signature[0] ^= 0xFF;

    let mut stream = TcpStream::connect(escrow.addr).await.unwrap();
    request.write_to(&mut stream).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    assert_eq!(raw, (-1i32).to_be_bytes());
}

// ── Resilience ──

#[tokio::test]
async fn garbage_connection_does_not_kill_the_server() {
    let escrow = start_escrow().await;

    let mut stream = TcpStream::connect(escrow.addr).await.unwrap();
    stream.write_all(&[0xFF; 9]).await.unwrap();
    drop(stream);

    let key = ContentKey::generate();
    let response = exchange(escrow.addr, &valid_request(&escrow, &key)).await;
    assert_eq!(response, RecoveryResponse::Key(key.as_bytes().to_vec()));
}

#[tokio::test]
async fn truncated_request_aborts_only_its_connection() {
    let escrow = start_escrow().await;

    let mut stream = TcpStream::connect(escrow.addr).await.unwrap();
    stream.write_u16(5).await.unwrap();
    stream.write_all(b"alice").await.unwrap();
    stream.write_i32(128).await.unwrap();
    stream.write_all(&[0u8; 12]).await.unwrap();
    drop(stream);

    let key = ContentKey::generate();
    let response = exchange(escrow.addr, &valid_request(&escrow, &key)).await;
    assert_eq!(response, RecoveryResponse::Key(key.as_bytes().to_vec()));
}

#[tokio::test]
async fn hostile_blob_length_aborts_only_its_connection() {
    let escrow = start_escrow().await;

    let mut stream = TcpStream::connect(escrow.addr).await.unwrap();
    stream.write_u16(5).await.unwrap();
    stream.write_all(b"alice").await.unwrap();
    stream.write_i32(i32::MAX).await.unwrap();

    // Server drops the connection without a response.
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    assert!(buf.is_empty());

    let key = ContentKey::generate();
    let response = exchange(escrow.addr, &valid_request(&escrow, &key)).await;
    assert_eq!(response, RecoveryResponse::Key(key.as_bytes().to_vec()));
}

// ── Startup Key Loading ──

#[tokio::test]
async fn context_loads_master_key_from_b64_file() {
    let (master_private, master_public) = generate_keypair(TEST_KEY_BITS).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let master_path = dir.path().join("master.prv");
    std::fs::write(
        &master_path,
        keyward_crypto::private_key_to_b64(&master_private).unwrap(),
    )
    .unwrap();

    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        master_key_path: master_path,
        registry_dir: dir.path().to_path_buf(),
    };
    let ctx = ServerContext::load(&config).unwrap();

    // The loaded key must actually unwrap blobs wrapped to its public half.
    let key = ContentKey::generate();
    let wrapped = wrap_key(&master_public, key.as_bytes()).unwrap();
    let unwrapped = keyward_crypto::unwrap_key(&ctx.master_key, &wrapped).unwrap();
    assert_eq!(unwrapped.as_slice(), key.as_bytes());
}

#[tokio::test]
async fn missing_master_key_is_fatal_before_binding() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        master_key_path: dir.path().join("absent.prv"),
        registry_dir: dir.path().to_path_buf(),
    };

    assert!(matches!(
        ServerContext::load(&config),
        Err(keyward_server::ServerError::KeyLoad(_))
    ));
}

// ── Sequential Handling ──

#[tokio::test]
async fn idle_connection_blocks_later_clients_until_it_closes() {
    let escrow = start_escrow().await;

    // First connection sends nothing; the server sits in its read.
    let idle = TcpStream::connect(escrow.addr).await.unwrap();

    // Second client's request is buffered but cannot be answered yet.
    let key = ContentKey::generate();
    let request = valid_request(&escrow, &key);
    let mut second = TcpStream::connect(escrow.addr).await.unwrap();
    request.write_to(&mut second).await.unwrap();

    let starved = tokio::time::timeout(
        Duration::from_millis(300),
        RecoveryResponse::read_from(&mut second),
    )
    .await;
    assert!(starved.is_err(), "second client must be starved while the first holds the server");

    // Closing the idle connection frees the loop; the buffered request is
    // then served.
    drop(idle);
    let response = tokio::time::timeout(
        Duration::from_secs(5),
        RecoveryResponse::read_from(&mut second),
    )
    .await
    .expect("server must resume after the idle connection closes")
    .unwrap();
    assert_eq!(response, RecoveryResponse::Key(key.as_bytes().to_vec()));
}

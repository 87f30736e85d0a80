//! Per-connection request handling.

use crate::server::ServerContext;
use keyward_crypto::CryptoError;
use keyward_proto::{ProtoResult, RecoveryRequest, RecoveryResponse};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{info, warn};

/// Why a request was denied.
///
/// Collapsed to the bare denial sentinel on the wire; a probing client
/// must not be able to tell these apart. Kept distinct for logs and tests.
#[derive(Debug, Error)]
pub enum DenialReason {
    #[error("identity could not be resolved")]
    UnknownIdentity(#[source] CryptoError),

    #[error("signature does not verify")]
    BadSignature,

    #[error("content key unwrap failed")]
    UnwrapFailed(#[source] CryptoError),
}

/// Handles one accepted connection: read a request, answer it, done.
///
/// Authentication and unwrap failures are answered with the denial
/// sentinel; only frame and I/O errors propagate, and the caller contains
/// those to this connection.
pub async fn handle_connection<S>(ctx: &ServerContext, stream: &mut S) -> ProtoResult<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = RecoveryRequest::read_from(stream).await?;

    match authorize(ctx, &request) {
        Ok(key) => {
            info!(identity = %request.identity, "signature verified, content key released");
            RecoveryResponse::Key(key).write_to(stream).await
        }
        Err(reason) => {
            warn!(identity = %request.identity, %reason, "recovery denied");
            RecoveryResponse::Denied.write_to(stream).await
        }
    }
}

/// Decides whether a request gets its content key back.
///
/// The canonical payload is rebuilt here from the request fields; the
/// wrapped key is touched by the master key only after the signature
/// verifies.
pub fn authorize(ctx: &ServerContext, request: &RecoveryRequest) -> Result<Vec<u8>, DenialReason> {
    let identity_key = ctx
        .registry
        .resolve(&request.identity)
        .map_err(DenialReason::UnknownIdentity)?;

    let payload = request.signed_payload();
    if !keyward_crypto::verify(&identity_key, &payload, &request.signature) {
        return Err(DenialReason::BadSignature);
    }

    keyward_crypto::unwrap_key(&ctx.master_key, &request.wrapped_key)
        .map_err(DenialReason::UnwrapFailed)
}

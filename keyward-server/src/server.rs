//! The accept loop and its context.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler;
use crate::registry::IdentityRegistry;
use keyward_crypto::RsaPrivateKey;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Everything a request handler needs, built once at startup.
///
/// Immutable for the process lifetime; the master private key never leaves
/// this struct.
pub struct ServerContext {
    pub master_key: RsaPrivateKey,
    pub registry: IdentityRegistry,
}

impl ServerContext {
    /// Loads key material per the config.
    ///
    /// A missing or malformed master key is fatal here, before any socket
    /// is bound; the server must never listen without being able to
    /// unwrap.
    pub fn load(config: &ServerConfig) -> ServerResult<Self> {
        let master_key = keyward_crypto::private_key_from_file(&config.master_key_path)
            .map_err(|e| ServerError::KeyLoad(e.to_string()))?;
        info!(path = %config.master_key_path.display(), "master private key loaded");

        Ok(Self {
            master_key,
            registry: IdentityRegistry::new(&config.registry_dir),
        })
    }
}

/// A bound escrow server.
pub struct EscrowServer {
    listener: TcpListener,
    ctx: ServerContext,
}

impl EscrowServer {
    /// Binds the listener. Call [`EscrowServer::serve`] to start answering.
    pub async fn bind(config: &ServerConfig, ctx: ServerContext) -> ServerResult<Self> {
        let listener = TcpListener::bind(&config.bind_addr).await?;
        info!(addr = %listener.local_addr()?, "escrow server listening");
        Ok(Self { listener, ctx })
    }

    /// The address the listener actually bound (resolves port 0).
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves connections forever, strictly one at a time.
    ///
    /// Each accepted connection's full request/response cycle completes
    /// before the next accept. There is no per-connection timeout, so a
    /// client that connects and sends nothing blocks every other client
    /// (head-of-line blocking). Both properties are part of the protocol's
    /// observable behavior and are preserved deliberately; see DESIGN.md.
    ///
    /// Per-connection failures are logged and swallowed; only listener
    /// errors end the loop.
    pub async fn serve(self) -> ServerResult<()> {
        loop {
            let (mut stream, peer) = self.listener.accept().await?;
            debug!(%peer, "connection accepted");

            if let Err(err) = handler::handle_connection(&self.ctx, &mut stream).await {
                warn!(%peer, error = %err, "connection aborted");
            }
        }
    }
}

//! Server configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the escrow server.
///
/// Passed explicitly into [`crate::ServerContext::load`] and
/// [`crate::EscrowServer::bind`]; there is no process-global state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on. Port 0 binds an ephemeral port (the
    /// bound address is queryable, which tests rely on).
    pub bind_addr: String,

    /// Path to the master private key (base64-wrapped PKCS#8, PEM or DER).
    pub master_key_path: PathBuf,

    /// Directory holding registered identity public keys as
    /// `<identity>.pub` files.
    pub registry_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:4050".to_string(),
            master_key_path: PathBuf::from("master.prv"),
            registry_dir: PathBuf::from("."),
        }
    }
}

use anyhow::Context;
use clap::Parser;
use keyward_server::{EscrowServer, ServerConfig, ServerContext};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Escrow recovery server.
#[derive(Debug, Parser)]
#[command(name = "keyward-server", version)]
struct Args {
    /// Port to listen on.
    #[arg(short, long)]
    port: u16,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Master private key file (base64 PKCS#8, PEM, or DER).
    #[arg(long, default_value = "master.prv")]
    master_key: PathBuf,

    /// Directory of registered identity public keys (`<identity>.pub`).
    #[arg(long, default_value = ".")]
    registry: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig {
        bind_addr: format!("{}:{}", args.bind, args.port),
        master_key_path: args.master_key,
        registry_dir: args.registry,
    };

    let ctx = ServerContext::load(&config).context("cannot start without master key")?;
    let server = EscrowServer::bind(&config, ctx)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    server.serve().await?;
    Ok(())
}

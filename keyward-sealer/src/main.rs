use anyhow::Context;
use clap::Parser;
use keyward_sealer::{master_key_from, seal_file};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Seals a payload under escrow.
#[derive(Debug, Parser)]
#[command(name = "keyward-sealer", version)]
struct Args {
    /// Payload file to seal.
    payload: PathBuf,

    /// Master public key file (default: the embedded distribution key).
    #[arg(long)]
    master_key: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let master_public =
        master_key_from(args.master_key.as_deref()).context("failed to load master public key")?;

    let files = seal_file(&args.payload, &master_public)
        .await
        .with_context(|| format!("failed to seal {}", args.payload.display()))?;

    println!(
        "Sealed {} -> {} (key blob: {})",
        args.payload.display(),
        files.ciphertext_path.display(),
        files.wrapped_key_path.display()
    );
    Ok(())
}

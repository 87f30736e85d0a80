use clap::Parser;
use keyward_client::{recover_file, ClientConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Recovery client for sealed payloads.
#[derive(Debug, Parser)]
#[command(name = "keyward-client", version)]
struct Args {
    /// Escrow server hostname or address.
    host: String,

    /// Escrow server port.
    port: u16,

    /// Registered identity name.
    identity: String,

    /// Sealed ciphertext file to recover.
    ciphertext: PathBuf,

    /// Wrapped-key blob (default: ciphertext path with `.wk` in place of `.enc`).
    #[arg(long)]
    wrapped_key: Option<PathBuf>,

    /// Identity private key file (default: `<identity>.prv`).
    #[arg(long)]
    key: Option<PathBuf>,

    /// Where to write the recovered plaintext (default: ciphertext path
    /// without its `.enc` suffix).
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Swaps a `.enc` suffix for another, or appends when there is none.
fn sibling(ciphertext: &Path, replacement: &str) -> PathBuf {
    let name = ciphertext.to_string_lossy();
    match name.strip_suffix(".enc") {
        Some(stem) => PathBuf::from(format!("{stem}{replacement}")),
        None => PathBuf::from(format!("{name}{replacement}")),
    }
}

async fn run(args: Args) -> Result<(), keyward_client::ClientError> {
    let config = ClientConfig {
        server_addr: format!("{}:{}", args.host, args.port),
        identity: args.identity.clone(),
    };

    let key_path = args
        .key
        .unwrap_or_else(|| PathBuf::from(format!("{}.prv", args.identity)));
    let identity_key = keyward_crypto::private_key_from_file(&key_path)?;

    let wrapped_key = args
        .wrapped_key
        .unwrap_or_else(|| sibling(&args.ciphertext, ".wk"));
    let output = args.output.unwrap_or_else(|| sibling(&args.ciphertext, ""));

    recover_file(&config, &identity_key, &args.ciphertext, &wrapped_key, &output).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => {
            println!("Recovery complete. The payload has been restored.");
        }
        Err(err) => {
            // One uniform message for every failure kind; the reason goes
            // to logs only. Distinguishing denials from crypto or transport
            // faults here would hand probing clients an oracle.
            tracing::debug!(error = %err, "recovery failed");
            eprintln!("Recovery was not possible.");
            eprintln!("Check that your identity name and signature key are in place, then try again.");
            std::process::exit(1);
        }
    }
}

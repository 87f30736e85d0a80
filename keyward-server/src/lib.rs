//! Escrow recovery server.
//!
//! Holds the master private key and a registry of identity public keys.
//! For each connection it reads one framed recovery request, verifies the
//! identity's signature over the canonical payload, and either unwraps the
//! content key or answers the denial sentinel. Nothing a client sends can
//! take the process down: every post-accept failure is contained to its
//! connection.
//!
//! The wire never explains a denial. Unknown identity, bad signature, and
//! unwrap failure all produce the identical sentinel so a probing client
//! learns nothing about why it was refused; the distinctions exist only in
//! logs and in [`DenialReason`] for tests.

pub mod config;
pub mod error;
pub mod handler;
pub mod registry;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::DenialReason;
pub use registry::IdentityRegistry;
pub use server::{EscrowServer, ServerContext};

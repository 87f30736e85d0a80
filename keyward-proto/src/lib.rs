//! Wire protocol for Keyward recovery exchanges.
//!
//! The protocol is a fixed big-endian framing over one TCP connection per
//! request. A client sends its identity, the wrapped-key blob it wants
//! unwrapped, and a signature proving it controls the identity; the server
//! answers either the recovered content key or a bare denial sentinel.
//!
//! Frame layout (request, in order, no outer envelope):
//!
//! 1. identity: `u16` big-endian length, then that many UTF-8 bytes
//! 2. wrapped-key blob: `i32` big-endian length, then that many bytes
//! 3. signature blob: `i32` big-endian length, then that many bytes
//!
//! Response: one `i32` big-endian length. Negative (canonically `-1`) is
//! the denial sentinel and nothing follows; non-negative `n` is followed by
//! exactly `n` bytes of recovered key.
//!
//! The byte sequence that gets signed is NOT the raw frame; it is the
//! canonical payload of [`signed_payload`], which both sides must build
//! byte-identically.

pub mod error;
pub mod frame;
pub mod messages;
pub mod payload;

pub use error::{ProtoError, ProtoResult};
pub use frame::{DENIAL_SENTINEL, MAX_BLOB_LEN};
pub use messages::{RecoveryRequest, RecoveryResponse};
pub use payload::signed_payload;

//! Card subsystem.
//!
//! # Data Flow
//! ```text
//! Reveal action
//!     → auth.rs    (sign ownership message → bearer token)
//!     → session.rs (fresh session key, encrypted for transport)
//!     → api        (POST sessionId, receive encrypted PAN/CVC)
//!     → session.rs (decrypt fields under the session key)
//!     → secrets.rs (normalize digits, hand plaintext to the caller)
//! ```
//!
//! # Security Constraints
//! - One handshake per reveal; the session key is zeroized on drop
//! - Decrypted PAN/CVC live only in the returned value; nothing is cached
//!   or persisted
//! - Card fields and key material are never logged

pub mod auth;
pub mod secrets;
pub mod session;

pub use secrets::{CardSecrets, CardSecretsClient};
pub use session::{SessionHandshake, TransportKey};

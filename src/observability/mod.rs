//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; filter from RUST_LOG with a config
//!   fallback
//! - Never log key material, decrypted card fields, or auth-message
//!   signatures

pub mod logging;

pub use logging::init_logging;

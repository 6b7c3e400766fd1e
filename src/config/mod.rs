//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file → loader.rs (parse)
//!           → validation.rs (semantic checks, all errors reported)
//!           → schema.rs types (immutable for the process lifetime)
//!
//! Secrets (transport key, wallet key) come ONLY from environment variables.
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_config;
pub use schema::ClientConfig;

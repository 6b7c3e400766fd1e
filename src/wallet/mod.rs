//! Signing subsystem.
//!
//! # Data Flow
//! ```text
//! Embedded-wallet capability (external)
//!     → provider.rs (capability contract: success / rejected / unavailable)
//!     → gateway.rs  (maps outcomes onto the crate error taxonomy)
//!     → local.rs    (env-loaded keypair provider for CLI and tests)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or signed auth messages

pub mod gateway;
pub mod local;
pub mod message;
pub mod provider;

pub use gateway::SigningGateway;
pub use local::LocalWallet;
pub use provider::{ProviderError, WalletProvider};

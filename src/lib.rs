//! Client SDK for a crypto-lending/card product.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                  CARD CLIENT                      │
//!                    │                                                   │
//!   UI action        │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!   ─────────────────┼─▶│   tx    │──▶│  wallet  │──▶│     api      │───┼──▶ Protocol
//!   (deposit, …)     │  │pipeline │   │ gateway  │   │ (reqwest)    │   │    backend
//!                    │  └────┬────┘   └──────────┘   └──────┬───────┘   │
//!                    │       │ status side channel          │           │
//!   Reveal action    │  ┌────▼────┐   ┌──────────┐          │           │
//!   ─────────────────┼─▶│  card   │──▶│ session  │──────────┼───────────┼──▶ Internal
//!                    │  │ secrets │   │  crypto  │          │           │    card API
//!                    │  └─────────┘   └──────────┘          │           │
//!                    │                                      │           │
//!                    │  ┌────────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns             │  │
//!                    │  │  ┌────────┐ ┌────────────┐ ┌─────────────┐ │  │
//!                    │  │  │ config │ │ resilience │ │observability│ │  │
//!                    │  │  └────────┘ └────────────┘ └─────────────┘ │  │
//!                    │  └────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! The backend builds transactions server-side; this client decodes them,
//! obtains a signature from an embedded-wallet capability, submits the
//! signed envelope and interprets the result. Card secrets travel through
//! a single-use AEAD session channel.

// Core subsystems
pub mod api;
pub mod card;
pub mod tx;
pub mod wallet;

// Cross-cutting concerns
pub mod config;
pub mod error;
pub mod observability;
pub mod resilience;
pub mod state;

pub use api::client::ApiClient;
pub use config::schema::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use tx::pipeline::{SubmissionOutcome, SubmissionPipeline};
pub use wallet::gateway::SigningGateway;

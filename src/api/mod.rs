//! Backend API subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline / card flows
//!     → client.rs (reqwest wrapper, endpoint construction)
//!     → types.rs (wire shapes)
//!
//! Display-data GETs go through resilience::with_retry here; the
//! transaction fetch is retried by the pipeline instead, and the
//! submission POST never is.
//! ```

pub mod client;
pub mod types;

pub use client::{build_endpoint_url, ApiClient, CardApi, ProgramApi};

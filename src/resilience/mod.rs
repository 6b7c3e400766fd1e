//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → retries.rs (bounded retry for retryable failures)
//!     → backoff.rs (exponential delay between attempts)
//! ```
//!
//! # Design Decisions
//! - Retries only for idempotent calls (transaction fetch, data queries);
//!   the submission POST is never retried
//! - Attempts are strictly sequential, never concurrent
//! - The final failure is surfaced unchanged

pub mod backoff;
pub mod retries;

pub use retries::with_retry;

//! Transaction subsystem.
//!
//! # Data Flow
//! ```text
//! UI action (deposit / withdraw / spend-limit)
//!     → actions.rs (endpoint + query parameters)
//!     → pipeline.rs (fetch → decode → sign → submit → interpret)
//!     → codec.rs (base64 ⇄ VersionedTransaction)
//!     → status.rs (side-channel reporting to the caller)
//! ```
//!
//! # Security Constraints
//! - The server builds transactions; this client only decodes, signs and
//!   re-encodes them
//! - Signing may block on a user prompt indefinitely and is the only
//!   cancellable step

pub mod actions;
pub mod codec;
pub mod pipeline;
pub mod status;

pub use actions::TxAction;
pub use pipeline::{SubmissionOutcome, SubmissionPipeline};
pub use status::{StatusSink, TxStatus, TxStatusUpdate};

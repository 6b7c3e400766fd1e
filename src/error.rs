//! Crate-wide error taxonomy.
//!
//! # Design Decisions
//! - `SignRejected` and `BlockhashExpired` are distinct caller-visible
//!   outcomes; they are never retried and never folded into generic errors
//! - `Network` is the only class the retry layer absorbs before surfacing
//! - `Submission` carries the backend error body verbatim for reporting

use thiserror::Error;

/// Errors surfaced by the client SDK.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Card transport key missing or invalid.
    #[error("crypto configuration error: {0}")]
    CryptoConfig(String),

    /// Decrypted card field failed authentication or digit validation.
    #[error("malformed card secret: {0}")]
    MalformedSecret(String),

    /// Transaction envelope is not valid base64 or not a valid transaction.
    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),

    /// Signing capability could not be obtained or failed internally.
    #[error("signing provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// User rejected the signing prompt.
    #[error("signing rejected by user")]
    SignRejected,

    /// Transaction blockhash no longer valid; recoverable by fetching a
    /// fresh transaction.
    #[error("transaction blockhash expired")]
    BlockhashExpired,

    /// Backend rejected the signed transaction for any other reason.
    #[error("transaction submission failed: {detail}")]
    Submission { detail: String },

    /// Transport-level failure (DNS, connect, body read).
    #[error("network error: {0}")]
    Network(String),

    /// Non-ok HTTP response that is not a submission outcome.
    #[error("API error (status {status}): {detail}")]
    Api { status: u16, detail: String },

    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the retry layer may absorb this failure.
    ///
    /// Only transport errors and backend 5xx responses are transient.
    /// `SignRejected` and `BlockhashExpired` require a fresh user action or
    /// a fresh transaction and must reach the caller unchanged.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

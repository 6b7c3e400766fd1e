//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! The backend base URLs are process-wide immutable state set at startup.

use serde::{Deserialize, Serialize};

/// Environment variable holding the 32-byte hex card transport key.
pub const TRANSPORT_KEY_ENV_VAR: &str = "CARD_CLIENT_TRANSPORT_KEY";

/// Environment variable holding the base58 local wallet keypair.
pub const WALLET_KEY_ENV_VAR: &str = "CARD_CLIENT_WALLET_KEY";

/// Root configuration for the card client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend API endpoints and timeouts.
    pub api: ApiConfig,

    /// Retry policy for idempotent network calls.
    pub retries: RetryConfig,

    /// Transaction submission settings.
    pub submission: SubmissionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the protocol backend (transaction building, balances).
    pub base_url: String,

    /// Base URL of the internal card API (auth, card secrets).
    pub internal_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            internal_url: "http://localhost:3001".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Retry policy settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Additional attempts after the initial call.
    pub max_attempts: u32,

    /// Base delay before the first retry.
    pub base_delay_ms: u64,

    /// Cap on the backoff delay.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 200,
            max_delay_ms: 5_000,
        }
    }
}

/// Transaction submission settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Ask the backend to skip preflight simulation.
    pub skip_preflight: bool,

    /// Fire a best-effort confirmation poll after a successful send.
    pub confirm_poll: bool,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            skip_preflight: false,
            confirm_poll: true,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter when RUST_LOG is not set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "card_client=info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.retries.max_attempts, 3);
        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.submission.confirm_poll);
        assert!(!config.submission.skip_preflight);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.retries.base_delay_ms, 200);
    }
}

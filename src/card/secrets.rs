//! Card secret retrieval and normalization.
//!
//! # Responsibilities
//! - Run the reveal flow: handshake → fetch → decrypt → normalize
//! - Enforce the fixed PAN/CVC digit lengths
//!
//! # Design Decisions
//! - A fresh handshake per reveal; the session key never outlives the call
//! - The caller owns the returned plaintext and must not persist it

use std::sync::Arc;

use crate::api::client::CardApi;
use crate::card::session::{self, TransportKey};
use crate::config::schema::RetryConfig;
use crate::error::{ClientError, ClientResult};
use crate::resilience::with_retry;

/// PAN is always presented as exactly 16 digits.
pub const PAN_DIGITS: usize = 16;

/// CVC is always presented as exactly 3 digits.
pub const CVC_DIGITS: usize = 3;

/// Decrypted card secrets for a single user-initiated reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSecrets {
    pub pan: String,
    pub cvc: String,
}

/// Keep only digits, requiring at least `required` and truncating to it.
fn normalize_digits(raw: &str, required: usize, label: &str) -> ClientResult<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < required {
        return Err(ClientError::MalformedSecret(format!(
            "{} has {} digits, expected {}",
            label,
            digits.len(),
            required
        )));
    }
    Ok(digits[..required].to_string())
}

/// Normalize a decrypted PAN to exactly 16 digits.
pub fn normalize_pan(raw: &str) -> ClientResult<String> {
    normalize_digits(raw, PAN_DIGITS, "PAN")
}

/// Normalize a decrypted CVC to exactly 3 digits.
pub fn normalize_cvc(raw: &str) -> ClientResult<String> {
    normalize_digits(raw, CVC_DIGITS, "CVC")
}

/// Card-secret retrieval flow over the internal card API.
pub struct CardSecretsClient {
    api: Arc<dyn CardApi>,
    transport_key: TransportKey,
    retries: RetryConfig,
}

impl CardSecretsClient {
    pub fn new(api: Arc<dyn CardApi>, transport_key: TransportKey, retries: RetryConfig) -> Self {
        Self {
            api,
            transport_key,
            retries,
        }
    }

    /// Reveal the PAN and CVC for one card.
    ///
    /// Establishes a fresh session channel, fetches the encrypted fields
    /// and decrypts them in memory. The handshake (and its session key)
    /// is dropped before returning.
    pub async fn reveal(&self, card_id: &str, bearer: &str) -> ClientResult<CardSecrets> {
        let handshake = session::create_handshake(&self.transport_key)?;

        let response = with_retry(
            || self.api.fetch_secrets(card_id, &handshake.session_id, bearer),
            self.retries.max_attempts,
            &self.retries,
        )
        .await?;

        let pan_raw = session::decrypt_field(&response.encrypted_pan, handshake.secret_key())?;
        let cvc_raw = session::decrypt_field(&response.encrypted_cvc, handshake.secret_key())?;

        let secrets = CardSecrets {
            pan: normalize_pan(&pan_raw)?,
            cvc: normalize_cvc(&cvc_raw)?,
        };

        tracing::debug!(card_id = card_id, "Card secrets revealed");
        Ok(secrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_normalization() {
        assert_eq!(
            normalize_pan("4242-4242-4242-4242 ").unwrap(),
            "4242424242424242"
        );
        assert_eq!(
            normalize_pan("4242424242424242").unwrap(),
            "4242424242424242"
        );
    }

    #[test]
    fn test_pan_truncated_to_fixed_length() {
        assert_eq!(
            normalize_pan("42424242424242429999").unwrap(),
            "4242424242424242"
        );
    }

    #[test]
    fn test_cvc_normalization() {
        assert_eq!(normalize_cvc("12a3").unwrap(), "123");
        assert_eq!(normalize_cvc(" 987 ").unwrap(), "987");
    }

    #[test]
    fn test_too_few_digits_rejected() {
        assert!(matches!(
            normalize_pan("4242-4242"),
            Err(ClientError::MalformedSecret(_))
        ));
        assert!(matches!(
            normalize_cvc("12"),
            Err(ClientError::MalformedSecret(_))
        ));
    }
}

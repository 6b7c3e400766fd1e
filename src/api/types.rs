//! Wire types for the protocol backend and the internal card API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response from `GET /program/build-tx/{action}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildTransactionResponse {
    /// Base64-encoded unsigned transaction envelope.
    pub transaction: String,
}

/// Body for `POST /program/tx/send`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionRequest {
    /// Base64-encoded signed transaction.
    pub transaction: String,
    pub skip_preflight: bool,
}

/// Success body from `POST /program/tx/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendTransactionResponse {
    pub signature: String,
}

/// Error body from `POST /program/tx/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendTransactionError {
    #[serde(default)]
    pub error: String,
}

/// One sensitive field as returned by the internal card API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedField {
    /// Base64 ciphertext with the authentication tag appended.
    pub data: String,
    /// Base64 12-byte nonce.
    pub iv: String,
}

/// Body for `POST /card/issuing/secrets`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSecretsRequest {
    pub session_id: String,
}

/// Response from `POST /card/issuing/secrets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSecretsResponse {
    pub encrypted_pan: EncryptedField,
    pub encrypted_cvc: EncryptedField,
}

/// Body for `POST /auth/user`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub public_key: String,
    pub signature: String,
    pub message: String,
    /// Card-product user id, when the wallet is already registered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Card-product user record from `GET /auth/user-info`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUserInfo {
    pub id: String,
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Lending rates for one market.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub deposit_rate: f64,
    pub borrow_rate: f64,
}

/// Per-market numeric lookup (prices, balances, limits), keyed by market
/// index.
pub type MarketMap<T> = BTreeMap<u16, T>;

/// Response from the spend-limit query.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendLimitsResponse {
    pub spend_limit_transaction_base_units: u64,
    pub spend_limit_timeframe_base_units: u64,
    pub spend_limit_timeframe_remaining_base_units: u64,
    pub timeframe: u64,
}

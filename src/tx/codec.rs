//! Transaction envelope codec.
//!
//! Pure format conversion between the backend's base64 wire form and a
//! structured transaction. Deterministic and idempotent for valid input;
//! no business logic.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use solana_sdk::hash::Hash;
use solana_sdk::transaction::VersionedTransaction;

use crate::error::{ClientError, ClientResult};

/// Decode a base64 transaction envelope into a structured transaction.
pub fn decode(envelope: &str) -> ClientResult<VersionedTransaction> {
    let bytes = BASE64_STANDARD
        .decode(envelope.trim())
        .map_err(|e| ClientError::MalformedTransaction(format!("invalid base64: {}", e)))?;
    bincode::deserialize(&bytes)
        .map_err(|e| ClientError::MalformedTransaction(format!("invalid payload: {}", e)))
}

/// Serialize a transaction back to base64 for submission.
pub fn encode(transaction: &VersionedTransaction) -> ClientResult<String> {
    let bytes = bincode::serialize(transaction)
        .map_err(|e| ClientError::MalformedTransaction(format!("serialize: {}", e)))?;
    Ok(BASE64_STANDARD.encode(bytes))
}

/// The freshness token the envelope was built against.
pub fn recent_blockhash(transaction: &VersionedTransaction) -> Hash {
    *transaction.message.recent_blockhash()
}

/// Replace the freshness token, e.g. when the server refreshes a fetched
/// envelope before a retry.
pub fn set_recent_blockhash(transaction: &mut VersionedTransaction, blockhash: Hash) {
    transaction.message.set_recent_blockhash(blockhash);
}

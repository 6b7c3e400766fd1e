//! External signing capability contract.
//!
//! The embedded-wallet provider manages private keys and shows the user a
//! signing prompt. A request resolves to success, explicit rejection, or
//! provider-unavailable; it is never unified with network errors. The call
//! may suspend indefinitely while the user decides, and dismissing the
//! prompt surfaces as `Rejected`, never as a timeout.

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;
use thiserror::Error;

use crate::error::ClientError;

/// Outcomes of a signing request that did not produce a signature.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// User dismissed the approval prompt.
    #[error("signing request rejected by user")]
    Rejected,

    /// Capability could not be obtained or failed internally.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl From<ProviderError> for ClientError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Rejected => ClientError::SignRejected,
            ProviderError::Unavailable(detail) => ClientError::ProviderUnavailable(detail),
        }
    }
}

/// An externally supplied signing capability.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The wallet's public key.
    fn address(&self) -> Pubkey;

    /// Attach this wallet's signature to the transaction.
    async fn sign_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<VersionedTransaction, ProviderError>;

    /// Sign an arbitrary message, returning the base58 signature.
    async fn sign_message(&self, message: &str) -> Result<String, ProviderError>;
}

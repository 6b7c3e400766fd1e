//! Bridge between the pipeline and the signing capability.
//!
//! # Responsibilities
//! - Obtain the capability (absence is `ProviderUnavailable`)
//! - Map provider outcomes onto the crate error taxonomy so that user
//!   rejection stays distinct from every other failure

use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;

use crate::error::{ClientError, ClientResult};
use crate::wallet::provider::WalletProvider;

/// Signing gateway over an externally supplied capability.
#[derive(Clone)]
pub struct SigningGateway {
    provider: Arc<dyn WalletProvider>,
}

impl SigningGateway {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self { provider }
    }

    /// Build a gateway from an optional capability, failing when the
    /// embedded wallet cannot supply one.
    pub fn from_provider(provider: Option<Arc<dyn WalletProvider>>) -> ClientResult<Self> {
        provider.map(Self::new).ok_or_else(|| {
            ClientError::ProviderUnavailable("wallet provider is not available".to_string())
        })
    }

    /// The wallet address the capability signs for.
    pub fn address(&self) -> Pubkey {
        self.provider.address()
    }

    /// Request a transaction signature. May suspend indefinitely awaiting
    /// the user; rejection surfaces as `SignRejected`.
    pub async fn sign_transaction(
        &self,
        unsigned: &VersionedTransaction,
    ) -> ClientResult<VersionedTransaction> {
        self.provider
            .sign_transaction(unsigned)
            .await
            .map_err(Into::into)
    }

    /// Request a message signature (used for authentication handshakes).
    pub async fn sign_message(&self, message: &str) -> ClientResult<String> {
        self.provider.sign_message(message).await.map_err(Into::into)
    }
}

impl std::fmt::Debug for SigningGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningGateway")
            .field("address", &self.provider.address())
            .finish()
    }
}

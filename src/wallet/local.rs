//! Local keypair signing provider.
//!
//! Used by the CLI and tests in place of the embedded-wallet capability.
//! A local key never shows a prompt, so it can never report rejection.
//!
//! # Security
//! - Keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;

use crate::config::schema::WALLET_KEY_ENV_VAR;
use crate::error::{ClientError, ClientResult};
use crate::wallet::provider::{ProviderError, WalletProvider};

/// Signing provider backed by an in-process ed25519 keypair.
pub struct LocalWallet {
    keypair: Keypair,
}

impl LocalWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Parse a base58-encoded 64-byte keypair.
    pub fn from_base58(encoded: &str) -> ClientResult<Self> {
        let bytes = solana_sdk::bs58::decode(encoded)
            .into_vec()
            .map_err(|e| ClientError::Config(format!("invalid wallet key encoding: {}", e)))?;
        let keypair = Keypair::try_from(bytes.as_slice())
            .map_err(|e| ClientError::Config(format!("invalid wallet keypair: {}", e)))?;

        tracing::info!(address = %keypair.pubkey(), "Local wallet initialized");
        Ok(Self { keypair })
    }

    /// Load the keypair from `CARD_CLIENT_WALLET_KEY`.
    pub fn from_env() -> ClientResult<Self> {
        let encoded = std::env::var(WALLET_KEY_ENV_VAR).map_err(|_| {
            ClientError::Config(format!(
                "environment variable {} not set",
                WALLET_KEY_ENV_VAR
            ))
        })?;
        Self::from_base58(&encoded)
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[async_trait]
impl WalletProvider for LocalWallet {
    fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<VersionedTransaction, ProviderError> {
        let message_bytes = transaction.message.serialize();
        let required = transaction.message.header().num_required_signatures as usize;
        let index = transaction
            .message
            .static_account_keys()
            .iter()
            .take(required)
            .position(|key| *key == self.keypair.pubkey())
            .ok_or_else(|| {
                ProviderError::Unavailable("wallet is not a required signer".to_string())
            })?;

        let mut signatures = transaction.signatures.clone();
        if signatures.len() < required {
            signatures = vec![Signature::default(); required];
        }
        signatures[index] = self.keypair.sign_message(&message_bytes);

        Ok(VersionedTransaction {
            signatures,
            message: transaction.message.clone(),
        })
    }

    async fn sign_message(&self, message: &str) -> Result<String, ProviderError> {
        Ok(self.keypair.sign_message(message.as_bytes()).to_string())
    }
}

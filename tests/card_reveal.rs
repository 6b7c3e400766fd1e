//! End-to-end card reveal flow against an in-memory card API that plays
//! the server side of the session handshake.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use aes_gcm::aead::Aead;
use aes_gcm::{Aes128Gcm, Aes256Gcm, Key, KeyInit, Nonce};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};

use card_client::api::client::CardApi;
use card_client::api::types::{AuthRequest, CardSecretsResponse, CardUserInfo, EncryptedField};
use card_client::card::auth;
use card_client::card::secrets::CardSecretsClient;
use card_client::card::session::{TransportKey, SESSION_KEY_LEN, TRANSPORT_KEY_LEN};
use card_client::config::schema::RetryConfig;
use card_client::error::{ClientError, ClientResult};
use card_client::wallet::gateway::SigningGateway;
use card_client::wallet::local::LocalWallet;

const NONCE_LEN: usize = 12;

/// In-memory card API holding the same pre-shared transport key as the
/// client.
struct FakeCardApi {
    transport_key: [u8; TRANSPORT_KEY_LEN],
    pan: String,
    cvc: String,
    expected_bearer: String,
    fetch_calls: AtomicU32,
    last_auth: Mutex<Option<AuthRequest>>,
}

impl FakeCardApi {
    fn new(transport_key: [u8; TRANSPORT_KEY_LEN], pan: &str, cvc: &str, bearer: &str) -> Self {
        Self {
            transport_key,
            pan: pan.to_string(),
            cvc: cvc.to_string(),
            expected_bearer: bearer.to_string(),
            fetch_calls: AtomicU32::new(0),
            last_auth: Mutex::new(None),
        }
    }
}

impl FakeCardApi {
    /// Recover the session key from the handshake blob; a tag-check failure
    /// surfaces as 400 like the real backend.
    fn open_session(&self, session_id: &str) -> ClientResult<[u8; SESSION_KEY_LEN]> {
        let reject = || ClientError::Api {
            status: 400,
            detail: "bad session".to_string(),
        };
        let blob = BASE64_STANDARD.decode(session_id).map_err(|_| reject())?;
        if blob.len() <= NONCE_LEN {
            return Err(reject());
        }
        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.transport_key));
        let hex_key = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| reject())?;
        let bytes = hex::decode(hex_key).map_err(|_| reject())?;
        bytes.try_into().map_err(|_| reject())
    }

    fn encrypt_field(session_key: &[u8; SESSION_KEY_LEN], plaintext: &str) -> EncryptedField {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let cipher = Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(session_key));
        let data = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .unwrap();
        EncryptedField {
            data: BASE64_STANDARD.encode(data),
            iv: BASE64_STANDARD.encode(nonce_bytes),
        }
    }
}

#[async_trait]
impl CardApi for FakeCardApi {
    async fn user_info(&self, public_key: &str) -> ClientResult<CardUserInfo> {
        Ok(CardUserInfo {
            id: "user-1".to_string(),
            public_key: Some(public_key.to_string()),
        })
    }

    async fn login(&self, request: &AuthRequest) -> ClientResult<String> {
        *self.last_auth.lock().unwrap() = Some(request.clone());
        Ok(self.expected_bearer.clone())
    }

    async fn fetch_secrets(
        &self,
        _card_id: &str,
        session_id: &str,
        bearer: &str,
    ) -> ClientResult<CardSecretsResponse> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if bearer != self.expected_bearer {
            return Err(ClientError::Api {
                status: 401,
                detail: "unauthorized".to_string(),
            });
        }

        let session_key = self.open_session(session_id)?;
        Ok(CardSecretsResponse {
            encrypted_pan: Self::encrypt_field(&session_key, &self.pan),
            encrypted_cvc: Self::encrypt_field(&session_key, &self.cvc),
        })
    }
}

fn no_delay_retries() -> RetryConfig {
    RetryConfig {
        max_attempts: 0,
        base_delay_ms: 0,
        max_delay_ms: 0,
    }
}

#[tokio::test]
async fn test_reveal_round_trip() {
    let raw_key = [9u8; TRANSPORT_KEY_LEN];
    let api = Arc::new(FakeCardApi::new(
        raw_key,
        "4242-4242-4242-4242",
        "123",
        "token-xyz",
    ));

    let transport_key = TransportKey::from_hex(&hex::encode(raw_key)).unwrap();
    let client = CardSecretsClient::new(
        Arc::clone(&api) as Arc<dyn CardApi>,
        transport_key,
        no_delay_retries(),
    );

    let secrets = client.reveal("card-1", "token-xyz").await.unwrap();
    assert_eq!(secrets.pan, "4242424242424242");
    assert_eq!(secrets.cvc, "123");
    assert_eq!(api.fetch_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_reveal_with_wrong_bearer_fails() {
    let raw_key = [9u8; TRANSPORT_KEY_LEN];
    let api = Arc::new(FakeCardApi::new(
        raw_key,
        "4242424242424242",
        "123",
        "token-xyz",
    ));

    let transport_key = TransportKey::from_hex(&hex::encode(raw_key)).unwrap();
    let client = CardSecretsClient::new(
        Arc::clone(&api) as Arc<dyn CardApi>,
        transport_key,
        no_delay_retries(),
    );

    let err = client.reveal("card-1", "stale-token").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_mismatched_transport_keys_fail_closed() {
    let api = Arc::new(FakeCardApi::new(
        [9u8; TRANSPORT_KEY_LEN],
        "4242424242424242",
        "123",
        "token-xyz",
    ));

    // The client handshakes under a different pre-shared key; the server
    // fails the GCM tag check when opening the session.
    let transport_key = TransportKey::from_hex(&hex::encode([1u8; TRANSPORT_KEY_LEN])).unwrap();
    let client = CardSecretsClient::new(
        Arc::clone(&api) as Arc<dyn CardApi>,
        transport_key,
        no_delay_retries(),
    );

    let err = client.reveal("card-1", "token-xyz").await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 400, .. }));
}

#[tokio::test]
async fn test_login_carries_signed_message_and_user_id() {
    let api = Arc::new(FakeCardApi::new(
        [9u8; TRANSPORT_KEY_LEN],
        "4242424242424242",
        "123",
        "token-xyz",
    ));

    let wallet = LocalWallet::new(Keypair::new());
    let address = wallet.pubkey().to_string();
    let gateway = SigningGateway::new(Arc::new(wallet));

    let token = auth::login(api.as_ref(), &gateway).await.unwrap();
    assert_eq!(token, "token-xyz");

    let request = api.last_auth.lock().unwrap().clone().unwrap();
    assert_eq!(request.public_key, address);
    assert_eq!(request.id.as_deref(), Some("user-1"));
    assert!(request.message.contains(&format!("Wallet address: {}", address)));

    let signature: Signature = request.signature.parse().unwrap();
    let pubkey: Pubkey = address.parse().unwrap();
    assert!(signature.verify(pubkey.as_ref(), request.message.as_bytes()));
}

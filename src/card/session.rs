//! Single-use encrypted channel for card-secret retrieval.
//!
//! One coherent AEAD scheme on both legs (the mode/padding pairing is a
//! compatibility contract with the server, agreed bit-for-bit):
//!
//! - Transport: AES-256-GCM under a 32-byte pre-shared key configured out
//!   of band. `session_id = base64(nonce + ciphertext + tag)` over the hex
//!   form of the session key; the nonce is also exposed separately as `iv`.
//! - Fields: AES-128-GCM under the 16-byte session key. Each field arrives
//!   as `{ data: base64(ciphertext + tag), iv: base64(12-byte nonce) }`.
//!
//! A key mismatch fails the GCM tag check deterministically; it can never
//! silently produce garbage plaintext.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes128Gcm, Aes256Gcm, Key, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::api::types::EncryptedField;
use crate::config::schema::TRANSPORT_KEY_ENV_VAR;
use crate::error::{ClientError, ClientResult};

/// Session key length (AES-128).
pub const SESSION_KEY_LEN: usize = 16;

/// Transport key length (AES-256).
pub const TRANSPORT_KEY_LEN: usize = 32;

const NONCE_LEN: usize = 12;

/// Pre-shared key protecting the session-key handshake.
#[derive(Clone)]
pub struct TransportKey([u8; TRANSPORT_KEY_LEN]);

impl TransportKey {
    /// Parse a 64-character hex key.
    pub fn from_hex(encoded: &str) -> ClientResult<Self> {
        let bytes = hex::decode(encoded.trim())
            .map_err(|e| ClientError::CryptoConfig(format!("transport key is not hex: {}", e)))?;
        let key: [u8; TRANSPORT_KEY_LEN] = bytes.try_into().map_err(|_| {
            ClientError::CryptoConfig(format!(
                "transport key must be {} bytes",
                TRANSPORT_KEY_LEN
            ))
        })?;
        Ok(Self(key))
    }

    /// Load the key from `CARD_CLIENT_TRANSPORT_KEY`.
    pub fn from_env() -> ClientResult<Self> {
        let encoded = std::env::var(TRANSPORT_KEY_ENV_VAR).map_err(|_| {
            ClientError::CryptoConfig(format!(
                "environment variable {} not set",
                TRANSPORT_KEY_ENV_VAR
            ))
        })?;
        Self::from_hex(&encoded)
    }
}

impl std::fmt::Debug for TransportKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TransportKey(..)")
    }
}

/// One reveal's worth of session-channel state.
///
/// The same `secret_key` bytes produce `session_id` and later decrypt the
/// response; it is zeroized when the handshake is dropped.
pub struct SessionHandshake {
    secret_key: [u8; SESSION_KEY_LEN],
    /// Session key encrypted for transport, base64 `nonce + ciphertext + tag`.
    pub session_id: String,
    /// The transport nonce on its own, base64.
    pub iv: String,
}

impl SessionHandshake {
    pub fn secret_key(&self) -> &[u8; SESSION_KEY_LEN] {
        &self.secret_key
    }
}

impl Drop for SessionHandshake {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

impl std::fmt::Debug for SessionHandshake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandshake")
            .field("session_id", &self.session_id)
            .field("iv", &self.iv)
            .finish_non_exhaustive()
    }
}

/// Generate a fresh session key and encrypt it for transport.
pub fn create_handshake(transport_key: &TransportKey) -> ClientResult<SessionHandshake> {
    let mut secret_key = [0u8; SESSION_KEY_LEN];
    OsRng.fill_bytes(&mut secret_key);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    // The canonical transported form of the session key is its hex string.
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&transport_key.0));
    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            hex::encode(secret_key).as_bytes(),
        )
        .map_err(|_| ClientError::CryptoConfig("handshake encryption failed".to_string()))?;

    let mut session_blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    session_blob.extend_from_slice(&nonce_bytes);
    session_blob.extend_from_slice(&ciphertext);

    Ok(SessionHandshake {
        secret_key,
        session_id: BASE64_STANDARD.encode(session_blob),
        iv: BASE64_STANDARD.encode(nonce_bytes),
    })
}

/// Decrypt one sensitive field under the session key.
pub fn decrypt_field(
    field: &EncryptedField,
    session_key: &[u8; SESSION_KEY_LEN],
) -> ClientResult<String> {
    let data = BASE64_STANDARD
        .decode(&field.data)
        .map_err(|e| ClientError::MalformedSecret(format!("field data is not base64: {}", e)))?;
    let iv = BASE64_STANDARD
        .decode(&field.iv)
        .map_err(|e| ClientError::MalformedSecret(format!("field iv is not base64: {}", e)))?;
    if iv.len() != NONCE_LEN {
        return Err(ClientError::MalformedSecret(format!(
            "field iv must be {} bytes, got {}",
            NONCE_LEN,
            iv.len()
        )));
    }

    let cipher = Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(session_key));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&iv), data.as_ref())
        .map_err(|_| ClientError::MalformedSecret("field decryption failed".to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|_| ClientError::MalformedSecret("field is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_transport_key() -> TransportKey {
        TransportKey::from_hex(&hex::encode([7u8; TRANSPORT_KEY_LEN])).unwrap()
    }

    /// Server side of the handshake: recover the session key from the
    /// session id, then encrypt a field under it.
    fn server_open_handshake(transport_key: &TransportKey, session_id: &str) -> [u8; SESSION_KEY_LEN] {
        let blob = BASE64_STANDARD.decode(session_id).unwrap();
        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&transport_key.0));
        let hex_key = cipher.decrypt(Nonce::from_slice(nonce), ciphertext).unwrap();
        let bytes = hex::decode(hex_key).unwrap();
        bytes.try_into().unwrap()
    }

    fn server_encrypt_field(session_key: &[u8; SESSION_KEY_LEN], plaintext: &str) -> EncryptedField {
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

    #[test]
    fn test_handshake_round_trip() {
        let transport_key = test_transport_key();
        let handshake = create_handshake(&transport_key).unwrap();

        // The key recovered server-side matches the client's copy exactly.
        let recovered = server_open_handshake(&transport_key, &handshake.session_id);
        assert_eq!(&recovered, handshake.secret_key());

        let field = server_encrypt_field(&recovered, "4242424242424242");
        let plaintext = decrypt_field(&field, handshake.secret_key()).unwrap();
        assert_eq!(plaintext, "4242424242424242");
    }

    #[test]
    fn test_wrong_key_fails_deterministically() {
        let transport_key = test_transport_key();
        let handshake = create_handshake(&transport_key).unwrap();
        let other = create_handshake(&transport_key).unwrap();

        let field = server_encrypt_field(handshake.secret_key(), "123");
        let err = decrypt_field(&field, other.secret_key()).unwrap_err();
        assert!(matches!(err, ClientError::MalformedSecret(_)));
    }

    #[test]
    fn test_fresh_key_per_handshake() {
        let transport_key = test_transport_key();
        let a = create_handshake(&transport_key).unwrap();
        let b = create_handshake(&transport_key).unwrap();
        assert_ne!(a.secret_key(), b.secret_key());
        assert_ne!(a.session_id, b.session_id);
    }

    #[test]
    fn test_transport_key_validation() {
        assert!(matches!(
            TransportKey::from_hex("zz"),
            Err(ClientError::CryptoConfig(_))
        ));
        assert!(matches!(
            TransportKey::from_hex("aabb"),
            Err(ClientError::CryptoConfig(_))
        ));
    }

    #[test]
    fn test_malformed_field_inputs() {
        let key = [1u8; SESSION_KEY_LEN];
        let bad_b64 = EncryptedField {
            data: "!!".to_string(),
            iv: BASE64_STANDARD.encode([0u8; NONCE_LEN]),
        };
        assert!(matches!(
            decrypt_field(&bad_b64, &key),
            Err(ClientError::MalformedSecret(_))
        ));

        let bad_iv = EncryptedField {
            data: BASE64_STANDARD.encode([0u8; 16]),
            iv: BASE64_STANDARD.encode([0u8; 4]),
        };
        assert!(matches!(
            decrypt_field(&bad_iv, &key),
            Err(ClientError::MalformedSecret(_))
        ));
    }
}

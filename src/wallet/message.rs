//! Ownership-proof message for the card API login handshake.
//!
//! The message text is part of the backend contract; the timestamp keeps
//! signatures from being replayable forever.

use std::time::{SystemTime, UNIX_EPOCH};

/// Build the login message for a wallet address and timestamp (ms).
pub fn login_message(wallet_address: &str, timestamp_ms: u128) -> String {
    [
        "Sign this message to authenticate ownership. This signature will not trigger any blockchain transaction or cost any gas fees.\n".to_string(),
        format!("Wallet address: {}", wallet_address),
        format!("Timestamp: {}", timestamp_ms),
    ]
    .join("\n")
}

/// Build the login message with the current wall-clock timestamp.
pub fn login_message_now(wallet_address: &str) -> String {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    login_message(wallet_address, timestamp_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        let message = login_message("wallet123", 1700000000000);
        assert!(message.starts_with("Sign this message to authenticate ownership."));
        assert!(message.contains("Wallet address: wallet123"));
        assert!(message.ends_with("Timestamp: 1700000000000"));
        // Blank line between the preamble and the fields.
        assert!(message.contains("fees.\n\nWallet address"));
    }
}

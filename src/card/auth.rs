//! Card API authentication.
//!
//! Ownership is proven by signing a canonical message with the wallet; the
//! backend exchanges it for a bearer token. Rejecting the signing prompt
//! surfaces as `SignRejected` and must not be reported as a generic
//! failure.

use crate::api::client::CardApi;
use crate::api::types::AuthRequest;
use crate::error::{ClientError, ClientResult};
use crate::wallet::gateway::SigningGateway;
use crate::wallet::message::login_message_now;

/// Sign the ownership message and exchange it for a bearer token.
///
/// A wallet already known to the card product carries its user id in the
/// login body; an unregistered wallet (404 from the lookup) logs in
/// without one.
pub async fn login(api: &dyn CardApi, gateway: &SigningGateway) -> ClientResult<String> {
    let address = gateway.address().to_string();

    let id = match api.user_info(&address).await {
        Ok(info) => Some(info.id),
        Err(ClientError::Api { status: 404, .. }) => None,
        Err(e) => return Err(e),
    };

    let message = login_message_now(&address);
    let signature = gateway.sign_message(&message).await?;

    let token = api
        .login(&AuthRequest {
            public_key: address,
            signature,
            message,
            id,
        })
        .await?;

    tracing::info!("Card API login complete");
    Ok(token)
}

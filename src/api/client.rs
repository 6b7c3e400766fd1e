//! HTTP client for the protocol backend and the internal card API.
//!
//! # Responsibilities
//! - Construct endpoint URLs with query parameters
//! - Execute JSON requests with timeouts and error classification
//! - Route idempotent display-data GETs through the retry layer; the
//!   transaction fetch is retried by the pipeline, in exactly one layer
//!
//! # Design Decisions
//! - `ProgramApi` and `CardApi` are traits so the submission pipeline and
//!   card flows can be exercised against in-memory fakes
//! - The submission POST is classified here, next to the wire format: a
//!   non-ok body whose error mentions a stale blockhash is the recoverable
//!   signal, everything else is fatal

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::types::{
    AuthRequest, BuildTransactionResponse, CardSecretsRequest, CardSecretsResponse, CardUserInfo,
    MarketMap, Rate, SendTransactionError, SendTransactionRequest, SendTransactionResponse,
    SpendLimitsResponse,
};
use crate::config::schema::{ApiConfig, RetryConfig};
use crate::error::{ClientError, ClientResult};
use crate::resilience::with_retry;
use crate::tx::actions::TxAction;

/// Backend error fragment that marks a recoverable stale-blockhash send.
pub const BLOCKHASH_EXPIRED_MARKER: &str = "Blockhash not found";

/// Append query parameters to a base endpoint.
pub fn build_endpoint_url(base: &str, params: &[(&str, String)]) -> ClientResult<String> {
    let mut url: url::Url = base
        .parse()
        .map_err(|e| ClientError::Config(format!("invalid endpoint '{}': {}", base, e)))?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.to_string())
}

/// Classify a non-ok submission response body.
pub fn classify_send_failure(status: u16, body: &str) -> ClientError {
    let detail = serde_json::from_str::<SendTransactionError>(body)
        .map(|e| e.error)
        .ok()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| body.to_string());

    if detail.contains(BLOCKHASH_EXPIRED_MARKER) {
        ClientError::BlockhashExpired
    } else {
        ClientError::Submission {
            detail: format!("status {}: {}", status, detail),
        }
    }
}

/// Transaction endpoints of the protocol backend.
#[async_trait]
pub trait ProgramApi: Send + Sync {
    /// Fetch a server-built unsigned transaction, base64-encoded.
    async fn build_transaction(&self, action: &TxAction) -> ClientResult<String>;

    /// Submit a signed transaction; returns the signature on success.
    async fn send_transaction(&self, transaction: &str, skip_preflight: bool)
        -> ClientResult<String>;

    /// Advisory confirmation poll for a submitted signature.
    async fn confirm_transaction(&self, signature: &str) -> ClientResult<()>;
}

/// Auth and card-secret endpoints of the internal card API.
#[async_trait]
pub trait CardApi: Send + Sync {
    /// Look up the card-product user for a wallet public key.
    async fn user_info(&self, public_key: &str) -> ClientResult<CardUserInfo>;

    /// Exchange a signed ownership message for a bearer token.
    async fn login(&self, request: &AuthRequest) -> ClientResult<String>;

    /// Fetch encrypted card secrets for an established session.
    async fn fetch_secrets(
        &self,
        card_id: &str,
        session_id: &str,
        bearer: &str,
    ) -> ClientResult<CardSecretsResponse>;
}

/// HTTP client bound to the configured backend base URLs.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    internal_url: String,
    retries: RetryConfig,
}

impl ApiClient {
    /// Create a client from validated configuration.
    pub fn new(api: &ApiConfig, retries: &RetryConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(format!("http client: {}", e)))?;

        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            internal_url: api.internal_url.trim_end_matches('/').to_string(),
            retries: retries.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> ClientResult<T> {
        let response = self.http.get(&url).send().await?;
        Self::parse_json(response).await
    }

    /// Retried GET for idempotent endpoints.
    async fn get_json_retried<T: DeserializeOwned>(&self, url: String) -> ClientResult<T> {
        with_retry(
            || self.get_json::<T>(url.clone()),
            self.retries.max_attempts,
            &self.retries,
        )
        .await
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Network(format!("decode response: {}", e)))
    }

    fn program_endpoint(&self, path: &str, params: &[(&str, String)]) -> ClientResult<String> {
        build_endpoint_url(&format!("{}{}", self.base_url, path), params)
    }

    fn card_endpoint(&self, path: &str, params: &[(&str, String)]) -> ClientResult<String> {
        build_endpoint_url(&format!("{}{}", self.internal_url, path), params)
    }

    // --- Display-data queries ---

    /// `GET /data/price`: asset prices per market index.
    pub async fn prices(&self) -> ClientResult<MarketMap<f64>> {
        let url = self.program_endpoint("/data/price", &[])?;
        self.get_json_retried(url).await
    }

    /// `GET /user/rate`: deposit/borrow rates for the given markets.
    pub async fn rates(&self, market_indices: &[u16]) -> ClientResult<MarketMap<Rate>> {
        let url = self.program_endpoint(
            "/user/rate",
            &[("marketIndices", join_indices(market_indices))],
        )?;
        self.get_json_retried(url).await
    }

    /// `GET /user/balance`: account balances for the given markets.
    pub async fn balances(
        &self,
        address: &str,
        market_indices: &[u16],
    ) -> ClientResult<MarketMap<f64>> {
        let url = self.program_endpoint(
            "/user/balance",
            &[
                ("address", address.to_string()),
                ("marketIndices", join_indices(market_indices)),
            ],
        )?;
        self.get_json_retried(url).await
    }

    /// `GET /user/withdraw-limit`.
    pub async fn withdraw_limits(
        &self,
        address: &str,
        market_indices: &[u16],
    ) -> ClientResult<MarketMap<f64>> {
        let url = self.program_endpoint(
            "/user/withdraw-limit",
            &[
                ("address", address.to_string()),
                ("marketIndices", join_indices(market_indices)),
            ],
        )?;
        self.get_json_retried(url).await
    }

    /// `GET /user/borrow-limit`.
    pub async fn borrow_limits(
        &self,
        address: &str,
        market_indices: &[u16],
    ) -> ClientResult<MarketMap<f64>> {
        let url = self.program_endpoint(
            "/user/borrow-limit",
            &[
                ("address", address.to_string()),
                ("marketIndices", join_indices(market_indices)),
            ],
        )?;
        self.get_json_retried(url).await
    }

    /// `GET /user/deposit-limit`.
    pub async fn deposit_limits(
        &self,
        address: &str,
        market_indices: &[u16],
    ) -> ClientResult<MarketMap<f64>> {
        let url = self.program_endpoint(
            "/user/deposit-limit",
            &[
                ("address", address.to_string()),
                ("marketIndices", join_indices(market_indices)),
            ],
        )?;
        self.get_json_retried(url).await
    }

    /// `GET /user/spend-limit`: card spend limit state.
    pub async fn spend_limits(&self, address: &str) -> ClientResult<SpendLimitsResponse> {
        let url =
            self.program_endpoint("/user/spend-limit", &[("address", address.to_string())])?;
        self.get_json_retried(url).await
    }

    /// `GET /program/account-status`.
    pub async fn account_status(&self, wallet: &str) -> ClientResult<String> {
        #[derive(serde::Deserialize)]
        struct StatusResponse {
            status: String,
        }
        let url =
            self.program_endpoint("/program/account-status", &[("wallet", wallet.to_string())])?;
        let response: StatusResponse = self.get_json_retried(url).await?;
        Ok(response.status)
    }

    /// `GET /user/health`: account health factor.
    pub async fn health(&self, address: &str) -> ClientResult<f64> {
        let url = self.program_endpoint("/user/health", &[("address", address.to_string())])?;
        self.get_json_retried(url).await
    }
}

#[async_trait]
impl ProgramApi for ApiClient {
    async fn build_transaction(&self, action: &TxAction) -> ClientResult<String> {
        let url = self.program_endpoint(
            &format!("/program/build-tx/{}", action.endpoint_path()),
            &action.query_params(),
        )?;
        // The pipeline owns the retry budget for this fetch; retrying here
        // too would multiply it.
        let response: BuildTransactionResponse = self.get_json(url).await?;
        Ok(response.transaction)
    }

    async fn send_transaction(
        &self,
        transaction: &str,
        skip_preflight: bool,
    ) -> ClientResult<String> {
        let url = self.program_endpoint("/program/tx/send", &[])?;
        let body = SendTransactionRequest {
            transaction: transaction.to_string(),
            skip_preflight,
        };

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_send_failure(status.as_u16(), &text));
        }

        let parsed: SendTransactionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Network(format!("decode send response: {}", e)))?;
        Ok(parsed.signature)
    }

    async fn confirm_transaction(&self, signature: &str) -> ClientResult<()> {
        let url = self.program_endpoint(
            "/program/tx/confirm",
            &[("signature", signature.to_string())],
        )?;
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Api {
                status: response.status().as_u16(),
                detail: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CardApi for ApiClient {
    async fn user_info(&self, public_key: &str) -> ClientResult<CardUserInfo> {
        let url = self.card_endpoint("/auth/user-info", &[("publicKey", public_key.to_string())])?;
        self.get_json_retried(url).await
    }

    async fn login(&self, request: &AuthRequest) -> ClientResult<String> {
        let url = self.card_endpoint("/auth/user", &[])?;
        let response = self.http.post(&url).json(request).send().await?;
        Self::parse_json(response).await
    }

    async fn fetch_secrets(
        &self,
        card_id: &str,
        session_id: &str,
        bearer: &str,
    ) -> ClientResult<CardSecretsResponse> {
        let url = self.card_endpoint("/card/issuing/secrets", &[("id", card_id.to_string())])?;
        let body = CardSecretsRequest {
            session_id: session_id.to_string(),
        };
        let response = self
            .http
            .post(&url)
            .bearer_auth(bearer)
            .json(&body)
            .send()
            .await?;
        Self::parse_json(response).await
    }
}

fn join_indices(market_indices: &[u16]) -> String {
    market_indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

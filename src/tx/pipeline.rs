//! Transaction submission pipeline.
//!
//! # State Machine
//! ```text
//! Idle → AwaitingTransaction (fetch envelope, retried)
//!      → AwaitingSignature   (decode, request signature; rejection is final)
//!      → Submitting          (encode, POST; never retried)
//!      → Confirming          (fire-and-forget confirmation poll)
//!      → Done
//! Any step may instead end in Failed(reason).
//! ```
//!
//! # Design Decisions
//! - `run` consumes the pipeline: one instance per attempt, so a stale
//!   signature request can never leak into a new attempt
//! - A stale blockhash is a recoverable outcome, not an error; the caller
//!   may start a fresh pipeline with a freshly fetched envelope
//! - Double-submit prevention (e.g. a double-tapped confirm button) is the
//!   caller's responsibility; the pipeline does not deduplicate concurrent
//!   instances

use std::sync::Arc;

use crate::api::client::ProgramApi;
use crate::config::schema::{RetryConfig, SubmissionConfig};
use crate::error::{ClientError, ClientResult};
use crate::resilience::with_retry;
use crate::tx::actions::TxAction;
use crate::tx::codec;
use crate::tx::status::{StatusSink, TxStatus, TxStatusUpdate};
use crate::wallet::gateway::SigningGateway;

/// Why a pipeline ended in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    SignRejected,
    BlockhashExpired,
    Fatal,
}

/// Pipeline lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    AwaitingTransaction,
    AwaitingSignature,
    Submitting,
    Confirming,
    Done,
    Failed(FailureReason),
}

impl PipelineState {
    fn name(&self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::AwaitingTransaction => "awaiting_transaction",
            PipelineState::AwaitingSignature => "awaiting_signature",
            PipelineState::Submitting => "submitting",
            PipelineState::Confirming => "confirming",
            PipelineState::Done => "done",
            PipelineState::Failed(_) => "failed",
        }
    }
}

/// Terminal result of a pipeline run that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Backend accepted the transaction.
    Sent { signature: String },
    /// Recoverable: the envelope went stale; retry with a fresh fetch.
    BlockhashExpired,
}

impl SubmissionOutcome {
    /// The submission signature; empty for a stale-blockhash outcome.
    pub fn signature(&self) -> &str {
        match self {
            SubmissionOutcome::Sent { signature } => signature,
            SubmissionOutcome::BlockhashExpired => "",
        }
    }
}

/// Orchestrates one fetch → sign → submit attempt.
pub struct SubmissionPipeline {
    api: Arc<dyn ProgramApi>,
    gateway: SigningGateway,
    status: Arc<dyn StatusSink>,
    retries: RetryConfig,
    submission: SubmissionConfig,
    state: PipelineState,
}

impl SubmissionPipeline {
    pub fn new(
        api: Arc<dyn ProgramApi>,
        gateway: SigningGateway,
        status: Arc<dyn StatusSink>,
        retries: RetryConfig,
        submission: SubmissionConfig,
    ) -> Self {
        Self {
            api,
            gateway,
            status,
            retries,
            submission,
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "Pipeline transition");
        self.state = next;
    }

    /// Execute the attempt. Consumes the pipeline; a new attempt requires a
    /// fresh instance.
    pub async fn run(mut self, action: TxAction) -> ClientResult<SubmissionOutcome> {
        let action_path = action.endpoint_path();
        tracing::info!(action = action_path, "Starting submission attempt");

        self.transition(PipelineState::AwaitingTransaction);
        let envelope = match with_retry(
            || self.api.build_transaction(&action),
            self.retries.max_attempts,
            &self.retries,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(e) => return self.fail_fatal(e),
        };

        let unsigned = match codec::decode(&envelope) {
            Ok(tx) => tx,
            Err(e) => return self.fail_fatal(e),
        };

        self.transition(PipelineState::AwaitingSignature);
        self.status.show(TxStatusUpdate::new(TxStatus::Signing));
        let signed = match self.gateway.sign_transaction(&unsigned).await {
            Ok(tx) => tx,
            Err(ClientError::SignRejected) => {
                self.transition(PipelineState::Failed(FailureReason::SignRejected));
                self.status.show(TxStatusUpdate::new(TxStatus::SignRejected));
                tracing::info!(action = action_path, "User rejected signing prompt");
                return Err(ClientError::SignRejected);
            }
            Err(e) => return self.fail_fatal(e),
        };

        self.transition(PipelineState::Submitting);
        let encoded = match codec::encode(&signed) {
            Ok(encoded) => encoded,
            Err(e) => return self.fail_fatal(e),
        };

        match self
            .api
            .send_transaction(&encoded, self.submission.skip_preflight)
            .await
        {
            Ok(signature) => {
                self.transition(PipelineState::Confirming);
                self.status.show(TxStatusUpdate::sent(signature.clone()));
                self.spawn_confirmation_poll(&signature);
                self.transition(PipelineState::Done);
                tracing::info!(action = action_path, signature = %signature, "Transaction sent");
                Ok(SubmissionOutcome::Sent { signature })
            }
            Err(ClientError::BlockhashExpired) => {
                self.transition(PipelineState::Failed(FailureReason::BlockhashExpired));
                self.status
                    .show(TxStatusUpdate::new(TxStatus::BlockhashExpired));
                tracing::warn!(action = action_path, "Envelope blockhash expired before landing");
                Ok(SubmissionOutcome::BlockhashExpired)
            }
            Err(e) => self.fail_fatal(e),
        }
    }

    fn fail_fatal<T>(&mut self, error: ClientError) -> ClientResult<T> {
        self.transition(PipelineState::Failed(FailureReason::Fatal));
        // Clear any in-progress display; the caller reports the error.
        self.status.show(TxStatusUpdate::new(TxStatus::None));
        Err(error)
    }

    /// Best-effort confirmation poll. Advisory only; its failures are
    /// swallowed.
    fn spawn_confirmation_poll(&self, signature: &str) {
        if !self.submission.confirm_poll {
            return;
        }
        let api = Arc::clone(&self.api);
        let signature = signature.to_string();
        tokio::spawn(async move {
            if let Err(e) = api.confirm_transaction(&signature).await {
                tracing::debug!(signature = %signature, error = %e, "Confirmation poll failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_signature() {
        let sent = SubmissionOutcome::Sent {
            signature: "abc123".to_string(),
        };
        assert_eq!(sent.signature(), "abc123");
        assert_eq!(SubmissionOutcome::BlockhashExpired.signature(), "");
    }
}

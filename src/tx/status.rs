//! Submission status side channel.
//!
//! The pipeline reports lifecycle transitions to a caller-owned sink (in
//! the app this backs a toast/banner). Transitions are one-directional per
//! attempt: `None → Signing → { Sent | SignRejected | BlockhashExpired }`.

/// Lifecycle of a single submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// No attempt in progress (also used to clear the display on fatal
    /// errors).
    None,
    /// Awaiting the user-facing signing prompt.
    Signing,
    /// User dismissed the signing prompt.
    SignRejected,
    /// Accepted by the backend.
    Sent,
    /// The envelope's blockhash went stale before submission landed.
    BlockhashExpired,
}

/// One status report, optionally carrying the submission signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxStatusUpdate {
    pub status: TxStatus,
    pub signature: Option<String>,
}

impl TxStatusUpdate {
    pub fn new(status: TxStatus) -> Self {
        Self {
            status,
            signature: None,
        }
    }

    pub fn sent(signature: String) -> Self {
        Self {
            status: TxStatus::Sent,
            signature: Some(signature),
        }
    }
}

/// Caller-owned observer for submission status.
pub trait StatusSink: Send + Sync {
    fn show(&self, update: TxStatusUpdate);
}

/// Sink that discards every update.
pub struct NullStatusSink;

impl StatusSink for NullStatusSink {
    fn show(&self, _update: TxStatusUpdate) {}
}

impl<F> StatusSink for F
where
    F: Fn(TxStatusUpdate) + Send + Sync,
{
    fn show(&self, update: TxStatusUpdate) {
        self(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink() {
        let seen: Mutex<Vec<TxStatusUpdate>> = Mutex::new(Vec::new());
        let sink = |update: TxStatusUpdate| seen.lock().unwrap().push(update);

        sink.show(TxStatusUpdate::new(TxStatus::Signing));
        sink.show(TxStatusUpdate::sent("abc123".to_string()));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].status, TxStatus::Signing);
        assert_eq!(seen[1].signature.as_deref(), Some("abc123"));
    }
}

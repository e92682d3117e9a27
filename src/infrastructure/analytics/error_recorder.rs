//! Error sink that reports through tracing

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::error;

use crate::domain::upstream::ErrorRecorder;
use crate::domain::DomainError;

#[derive(Debug, Default)]
pub struct TracingErrorRecorder {
    recorded: AtomicU64,
}

impl TracingErrorRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of errors recorded since startup
    pub fn recorded(&self) -> u64 {
        self.recorded.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ErrorRecorder for TracingErrorRecorder {
    async fn record_error(&self, err: &DomainError) {
        self.recorded.fetch_add(1, Ordering::Relaxed);
        error!(error = %err, "Request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_recorded_errors() {
        let recorder = TracingErrorRecorder::new();

        recorder
            .record_error(&DomainError::upstream("catalog", "HTTP 500"))
            .await;
        recorder.record_error(&DomainError::internal("boom")).await;

        assert_eq!(recorder.recorded(), 2);
    }
}

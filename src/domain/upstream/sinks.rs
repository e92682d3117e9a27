//! Side-effect sinks: view analytics and error reporting

use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::domain::DomainError;

/// Records a page view. Failures are never surfaced to the client.
#[async_trait]
pub trait ViewRecorder: Send + Sync {
    async fn record_view(&self, headers: &HeaderMap) -> Result<(), DomainError>;
}

/// Receives every error that ends up as a 500 response
#[async_trait]
pub trait ErrorRecorder: Send + Sync {
    async fn record_error(&self, error: &DomainError);
}

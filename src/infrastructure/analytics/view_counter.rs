//! In-process view counter

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use tracing::debug;

use crate::domain::upstream::ViewRecorder;
use crate::domain::DomainError;

const UNKNOWN_ORIGIN: &str = "direct";

/// Counts every recorded view, in total and per `Origin` header
#[derive(Debug, Default)]
pub struct InMemoryViewCounter {
    total: AtomicU64,
    by_origin: RwLock<HashMap<String, u64>>,
}

impl InMemoryViewCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn views_from(&self, origin: &str) -> u64 {
        self.by_origin
            .read()
            .map(|counts| counts.get(origin).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl ViewRecorder for InMemoryViewCounter {
    async fn record_view(&self, headers: &HeaderMap) -> Result<(), DomainError> {
        let origin = headers
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(UNKNOWN_ORIGIN)
            .to_string();

        let total = self.total.fetch_add(1, Ordering::Relaxed) + 1;

        let mut counts = self
            .by_origin
            .write()
            .map_err(|_| DomainError::analytics("View counter lock poisoned"))?;
        *counts.entry(origin.clone()).or_insert(0) += 1;

        debug!(origin = %origin, total = total, "View recorded");
        Ok(())
    }
}

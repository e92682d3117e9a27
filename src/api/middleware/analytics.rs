//! Fire-and-forget view tracking

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::api::state::AppState;

/// Records the view on a detached task so neither its latency nor its
/// failure reaches the response path.
pub async fn analytics_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let recorder = Arc::clone(&state.view_recorder);
    let headers = request.headers().clone();

    tokio::spawn(async move {
        if let Err(e) = recorder.record_view(&headers).await {
            warn!(error = %e, "Failed to record view");
        }
    });

    next.run(request).await
}

//! Request/response logging middleware

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::info;

/// Logs one line per request and one per response.
/// No span is opened here; `TraceLayer` already owns the request span.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = extract_request_id(&request);
    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        user_agent = %user_agent,
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

use axum::{middleware, routing::any, Router};
use tower_http::trace::TraceLayer;

use super::anime;
use super::home;
use super::middleware::{analytics_middleware, cors_middleware, logging_middleware};
use super::state::AppState;

/// Create the full router with application state.
///
/// Layer order, outermost first: trace, request logging, CORS (answers
/// preflight before anything below runs), analytics, routes.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", any(home::index))
        .fallback(anime::dispatch)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            analytics_middleware,
        ))
        .layer(middleware::from_fn(cors_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

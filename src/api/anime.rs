//! Anime route dispatch

use axum::{
    extract::{RawQuery, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ResultsResponse};
use crate::domain::route::Route;

/// Every path other than `/` lands here and is matched against the route
/// table. Unmatched paths get a plain-text 404. The query string is handed
/// over undecoded so a malformed one never rejects the request.
pub async fn dispatch(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    uri: Uri,
) -> Response {
    let Some(route) = Route::match_path(uri.path(), query.as_deref()) else {
        debug!(path = %uri.path(), "No route matched");
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    match state.anime_service.handle(&route).await {
        Ok(results) => Json(ResultsResponse::new(&results)).into_response(),
        Err(err) if err.is_not_found() => {
            debug!(route = %route.kind(), error = %err, "Not found");
            ApiError::from(err).into_response()
        }
        Err(err) => {
            state.error_recorder.record_error(&err).await;
            ApiError::from(err).into_response()
        }
    }
}

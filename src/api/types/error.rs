//! Error envelopes returned to clients

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Body of every JSON error: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// API error with status code.
///
/// Client-facing messages are fixed; the underlying cause is reported
/// through the error sink, never echoed back.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: message.into(),
            },
        }
    }

    /// Empty search results or an unresolvable entity
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    /// Any upstream or internal failure
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => Self::not_found(),
            DomainError::Upstream { .. }
            | DomainError::Analytics { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. } => Self::internal(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.response.error)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_conversion() {
        let api_err: ApiError = DomainError::not_found("No results for 'zzz'").into();

        assert_eq!(api_err.status, StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::to_string(&api_err.response).unwrap(),
            r#"{"error":"Not found"}"#
        );
    }

    #[test]
    fn test_upstream_errors_are_masked() {
        let api_err: ApiError = DomainError::upstream("catalog", "HTTP 502: bad gateway").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_err.response.error, "Internal Server Error");
    }

    #[test]
    fn test_all_non_not_found_variants_are_500() {
        let errors = [
            DomainError::analytics("x"),
            DomainError::configuration("x"),
            DomainError::internal("x"),
        ];

        for err in errors {
            assert_eq!(ApiError::from(err).status, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

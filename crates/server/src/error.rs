//! Unified error handling for the HTTP surface.
//!
//! Provides a unified `AppError` type that all route handlers return.
//! Internal detail is logged; clients only ever see an HTTP status and a
//! JSON `{"error": ...}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::db::RepositoryError;
use crate::services::AuthError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Outfit analysis failed.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Identity or session verification failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error with a client-safe message chosen at the
    /// route boundary (e.g. "Failed to add item").
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_) | Self::Analysis(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Analysis(err) => match err {
                AnalysisError::Unavailable(_) => StatusCode::BAD_GATEWAY,
                AnalysisError::UpstreamFormat(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Database(_) => "Internal server error".to_string(),
            Self::Analysis(_) => "Failed to analyze outfit".to_string(),
            Self::Auth(_) => "Invalid Google token".to_string(),
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Internal(msg) => msg,
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::VisionError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("user 9".to_string());
        assert_eq!(err.to_string(), "Not found: user 9");

        let err = AppError::BadRequest("category is required".to_string());
        assert_eq!(err.to_string(), "Bad request: category is required");
    }

    #[test]
    fn test_auth_errors_are_401() {
        let err = AppError::Auth(AuthError::InvalidToken("bad signature".to_string()));
        assert_eq!(get_status(err), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_upstream_unavailable_is_502() {
        let err = AppError::Analysis(AnalysisError::Unavailable(VisionError::Api {
            status: 503,
            message: "overloaded".to_string(),
        }));
        assert_eq!(get_status(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_format_is_500() {
        let err = AppError::Analysis(AnalysisError::UpstreamFormat("not json".to_string()));
        assert_eq!(get_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_is_400_and_persistence_is_500() {
        assert_eq!(
            get_status(AppError::BadRequest("category is required".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_keeps_route_chosen_body() {
        let response = AppError::Internal("Failed to add item".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_database_detail_is_not_exposed() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "user 3 has no google_id".to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

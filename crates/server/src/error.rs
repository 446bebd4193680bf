//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side failures to
//! Sentry before responding. Every error reaches the client as a JSON body of
//! the form `{"error": "<message>"}`. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the tracker.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed or no session accompanies the request.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Preference or shipment storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// Malformed request body or parameters. The message is shown to the client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Valid session lacking the required permission.
    #[error("Forbidden")]
    Forbidden,

    /// Unknown route or method.
    #[error("Not found")]
    NotFound,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Auth(AuthError::InvalidPayload(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Auth(AuthError::InvalidCredentials | AuthError::Unauthenticated) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Never includes internal details.
    #[must_use]
    pub fn client_message(&self) -> &str {
        match self {
            Self::Auth(AuthError::InvalidPayload(_)) => "Invalid login payload",
            Self::Auth(AuthError::InvalidCredentials) => "Invalid password",
            Self::Auth(AuthError::Unauthenticated) => "Unauthorized",
            Self::BadRequest(message) => message.as_str(),
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not found",
            Self::Storage(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Storage(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = Json(json!({ "error": self.client_message() }));
        (self.status(), body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("Invalid JSON".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid JSON");

        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Auth error: invalid credentials");
    }

    #[tokio::test]
    async fn test_app_error_status_and_body() {
        let cases = [
            (
                AppError::Auth(AuthError::InvalidPayload("email is empty".to_string())),
                StatusCode::BAD_REQUEST,
                "Invalid login payload",
            ),
            (
                AppError::Auth(AuthError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
                "Invalid password",
            ),
            (
                AppError::Auth(AuthError::Unauthenticated),
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
            ),
            (
                AppError::BadRequest("Invalid search parameters".to_string()),
                StatusCode::BAD_REQUEST,
                "Invalid search parameters",
            ),
            (AppError::Forbidden, StatusCode::FORBIDDEN, "Forbidden"),
            (AppError::NotFound, StatusCode::NOT_FOUND, "Not found"),
        ];

        for (err, status, message) in cases {
            assert_eq!(render(err).await, (status, json!({ "error": message })));
        }
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let io = std::io::Error::other("disk on fire at /var/data");
        let (status, body) = render(AppError::Storage(RepositoryError::Io(io))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));

        let json_err = serde_json::from_str::<serde_json::Value>("{secret").unwrap_err();
        let (_, body) = render(AppError::Storage(RepositoryError::Serialization(json_err))).await;
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
}

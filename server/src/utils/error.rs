use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error, warn, Level};

use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Client mistakes stay below `error`; only server-side failures reach it.
    pub fn log_level(&self) -> Level {
        match self {
            AppError::NotFound(_) => Level::DEBUG,
            AppError::BadRequest(_) | AppError::UnsupportedMediaType(_) => Level::WARN,
            AppError::ConfigError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => Level::ERROR,
        }
    }

    fn log(&self) {
        let level = self.log_level();
        if level == Level::DEBUG {
            debug!(error = %self, "Resource not found");
        } else if level == Level::WARN {
            warn!(code = self.code(), error = %self, "Rejected request");
        } else if let AppError::DatabaseError(e) = self {
            error!(error = ?e, "Database error");
        } else {
            error!(error = ?self, "Application error");
        }
    }

    /// Message safe to hand back to clients.
    fn public_message(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "The request could not be processed",
            AppError::UnsupportedMediaType(_) => "Expected an application/json request body",
            AppError::NotFound(_) => "The requested resource was not found",
            AppError::DatabaseError(_) => "A database error occurred",
            AppError::ConfigError(_) | AppError::InternalServerError(_) => {
                "An internal error occurred"
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
            AppError::UnsupportedMediaType(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log();

        // Missing resources answer with a bare 404
        if let AppError::NotFound(_) = self {
            return status.into_response();
        }

        error_response(self.code(), self.public_message(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = AppError::NotFound("dev event 42".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let response = AppError::DatabaseError(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "DATABASE_ERROR");
        assert_eq!(json["error"]["message"], "A database error occurred");
        assert!(json["error"]["details"].is_null());
    }

    #[test]
    fn test_client_errors_log_below_error_level() {
        assert_eq!(AppError::NotFound("x".into()).log_level(), Level::DEBUG);
        assert_eq!(AppError::BadRequest("x".into()).log_level(), Level::WARN);
        assert_eq!(AppError::UnsupportedMediaType("x".into()).log_level(), Level::WARN);
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::PoolTimedOut).log_level(),
            Level::ERROR
        );
        assert_eq!(AppError::InternalServerError("x".into()).log_level(), Level::ERROR);
    }

    #[tokio::test]
    async fn test_unsupported_media_type_status() {
        let response = AppError::UnsupportedMediaType("no content type".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_bad_request_uses_public_message() {
        let response = AppError::BadRequest("expected value at line 1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert_eq!(json["error"]["message"], "The request could not be processed");
    }
}

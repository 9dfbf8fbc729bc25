use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Map known backend error substrings to messages safe to show a user.
/// Raw store error text never leaves the server.
pub fn redact_db_error(err: &sea_orm::DbErr) -> &'static str {
    let raw = err.to_string().to_lowercase();

    if raw.contains("duplicate key") || raw.contains("unique constraint") {
        "That record already exists"
    } else if raw.contains("foreign key") {
        "A related record is missing or still referenced"
    } else if raw.contains("not-null") || raw.contains("not null") {
        "A required field was missing"
    } else if raw.contains("check constraint") {
        "A field value was out of range"
    } else if raw.contains("permission denied") {
        "You don't have permission to do that"
    } else {
        "Something went wrong saving your data"
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, redact_db_error(e))
            }
            Self::HttpRequest(ref e) => {
                tracing::error!("HTTP request error: {}", e);
                (StatusCode::BAD_GATEWAY, "External service request failed")
            }
            Self::Serialization(ref e) => {
                tracing::error!("Serialization error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Data processing error")
            }
            // Validation failures are expected user input, not incidents.
            Self::Validation(ref msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            Self::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            Self::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.as_str()),
            Self::ExternalApi(ref msg) => {
                tracing::warn!("External API error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.as_str())
            }
            Self::Configuration(ref msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.as_str()),
            Self::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred")
            }
            Self::Other(ref e) => {
                tracing::error!("Unexpected error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_maps_known_substrings() {
        let dup = sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"idx_artists_name_normalized\""
                .to_string(),
        );
        assert_eq!(redact_db_error(&dup), "That record already exists");

        let fk = sea_orm::DbErr::Custom(
            "insert or update on table \"lineups\" violates foreign key constraint".to_string(),
        );
        assert_eq!(
            redact_db_error(&fk),
            "A related record is missing or still referenced"
        );
    }

    #[test]
    fn redaction_falls_back_to_generic_message() {
        let weird = sea_orm::DbErr::Custom("connection reset by peer at 10.0.0.3".to_string());
        let msg = redact_db_error(&weird);
        assert_eq!(msg, "Something went wrong saving your data");
        assert!(!msg.contains("10.0.0.3"));
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM request failed: {0}")]
    LlmUnavailable(#[from] reqwest::Error),

    #[error("LLM returned malformed {integration} payload: {reason}")]
    SchemaMismatch {
        integration: &'static str,
        reason: String,
    },

    #[error("Missing or invalid session token")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Essay not found")]
    EssayNotFound,

    #[error("Vocabulary entry not found")]
    WordNotFound,

    #[error("No reading material available")]
    ArticleNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::LlmUnavailable(ref e) => {
                tracing::error!("LLM transport error: {:?}", e);
                (StatusCode::BAD_GATEWAY, "AI service unavailable")
            }
            AppError::SchemaMismatch {
                integration,
                ref reason,
            } => {
                tracing::error!(integration, %reason, "LLM schema mismatch");
                (StatusCode::BAD_GATEWAY, "AI returned an unusable response")
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Not signed in"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            AppError::EmailTaken => (StatusCode::CONFLICT, "Email already registered"),
            AppError::EssayNotFound => (StatusCode::NOT_FOUND, "Essay not found"),
            AppError::WordNotFound => (StatusCode::NOT_FOUND, "Vocabulary entry not found"),
            AppError::ArticleNotFound => (StatusCode::NOT_FOUND, "No reading material available"),
            AppError::InvalidInput(ref msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

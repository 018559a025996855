use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> axum::response::Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(resource) => {
                error_response(StatusCode::NOT_FOUND, format!("{} not found", resource))
            }
            AppError::Unauthorized => {
                error_response(StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid email or password".to_string())
            }
            AppError::Db(e) => {
                error!("Database error: {:?}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        }
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}

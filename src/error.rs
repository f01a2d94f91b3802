use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text shown in the page's status region when a search fails
    pub fn status_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::HttpClient(_) | AppError::ExternalApi(_) => {
                "Could not reach the recommendation service. Please try again.".to_string()
            }
            AppError::MalformedResponse(_) => {
                "The recommendation service sent an unexpected response.".to_string()
            }
            AppError::Cache(_) | AppError::Internal(_) => "Something went wrong.".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::HttpClient(_) | AppError::ExternalApi(_) | AppError::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Cache(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::InvalidInput(msg)
            | AppError::ExternalApi(msg)
            | AppError::MalformedResponse(msg) => msg,
            AppError::HttpClient(_) | AppError::Cache(_) | AppError::Internal(_) => {
                self.to_string()
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

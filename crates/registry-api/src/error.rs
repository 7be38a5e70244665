use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use registry_types::api::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable credential was supplied.
    #[error("Missing or invalid Authorization header")]
    Unauthorized,

    /// A bearer credential was supplied but does not match.
    #[error("Invalid admin token")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),

    #[error("encryption error: {0:#}")]
    Encryption(anyhow::Error),

    #[error("export error: {0:#}")]
    Export(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) | ApiError::Encryption(_) | ApiError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            warn!("Request failed: {}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

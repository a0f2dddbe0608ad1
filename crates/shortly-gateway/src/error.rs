use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortly_core::{CoreError, StorageError};
use thiserror::Error;
use tracing::{error, info};

use crate::model::ApiResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    InvalidAlias(#[from] CoreError),
    #[error("url already exists")]
    AliasConflict,
    #[error("not found")]
    NotFound,
    #[error("no free alias after {0} attempts")]
    AliasExhausted(usize),
    #[error("failed to add url: {0}")]
    SaveFailed(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => AppError::NotFound,
            StorageError::AlreadyExists => AppError::AliasConflict,
            StorageError::InvalidInput(message) => AppError::InvalidRequest(message),
            internal @ StorageError::Internal { .. } => AppError::Internal(internal.to_string()),
        }
    }
}

impl AppError {
    /// Like the `From<StorageError>` conversion, but engine failures are
    /// reported as a failed save.
    pub fn from_save(error: StorageError) -> Self {
        match error {
            internal @ StorageError::Internal { .. } => AppError::SaveFailed(internal.to_string()),
            other => other.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::InvalidUrl(_) | AppError::InvalidAlias(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::AliasConflict => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AliasExhausted(_) | AppError::SaveFailed(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message exposed to clients. Internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::AliasExhausted(_) | AppError::SaveFailed(_) => "failed to add url".to_string(),
            AppError::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            info!(error = %self, status = status.as_u16(), "request rejected");
        }

        (status, Json(ApiResponse::error(self.public_message()))).into_response()
    }
}

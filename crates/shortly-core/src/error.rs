use thiserror::Error;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Engine-agnostic storage failures.
///
/// Callers branch on [`StorageError::NotFound`] and
/// [`StorageError::AlreadyExists`]; everything else is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("url not found")]
    NotFound,
    #[error("url exists")]
    AlreadyExists,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{op}: {message}")]
    Internal { op: &'static str, message: String },
}

impl StorageError {
    pub fn internal(op: &'static str, message: impl Into<String>) -> Self {
        Self::Internal {
            op,
            message: message.into(),
        }
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid alias: {0}")]
    InvalidAlias(String),
}

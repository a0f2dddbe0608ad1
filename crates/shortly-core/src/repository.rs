use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A persisted mapping from alias to URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Store-assigned surrogate key. Never reused.
    pub id: i64,
    pub alias: String,
    /// The redirect target, stored verbatim.
    pub url: String,
}

/// The alias store contract.
///
/// Implementations must enforce alias uniqueness atomically: a colliding
/// insert fails with [`StorageError::AlreadyExists`] and leaves no trace.
///
/// [`StorageError::AlreadyExists`]: crate::StorageError::AlreadyExists
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Stores `url` under `alias` and returns the new record id.
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64>;

    /// Returns the URL stored under `alias`, or `NotFound`.
    async fn get_url(&self, alias: &str) -> Result<String>;
}

/// Rejects empty fields before they reach an engine.
pub fn ensure_non_empty(url: &str, alias: &str) -> Result<()> {
    if url.is_empty() {
        return Err(crate::StorageError::InvalidInput(
            "url cannot be empty".to_string(),
        ));
    }
    if alias.is_empty() {
        return Err(crate::StorageError::InvalidInput(
            "alias cannot be empty".to_string(),
        ));
    }
    Ok(())
}

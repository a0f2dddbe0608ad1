use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shortly_core::error::Result;
use shortly_core::repository::{ensure_non_empty, Repository, UrlRecord};
use shortly_core::StorageError;

/// In-memory implementation of the repository contract.
///
/// Uniqueness is enforced through DashMap's entry API, which holds the
/// shard lock across the existence check and the insert.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlRecord>,
    last_id: AtomicI64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64> {
        ensure_non_empty(url, alias)?;

        match self.storage.entry(alias.to_owned()) {
            Entry::Occupied(_) => Err(StorageError::AlreadyExists),
            Entry::Vacant(slot) => {
                let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
                slot.insert(UrlRecord {
                    id,
                    alias: alias.to_owned(),
                    url: url.to_owned(),
                });
                Ok(id)
            }
        }
    }

    async fn get_url(&self, alias: &str) -> Result<String> {
        self.storage
            .get(alias)
            .map(|record| record.url.clone())
            .ok_or(StorageError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn save_and_get() {
        let repo = InMemoryRepository::new();

        let id = repo.save_url("https://example.com", "abc123").await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(repo.get_url("abc123").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let err = repo.get_url("nope").await.unwrap_err();
        assert_eq!(err, StorageError::NotFound);
    }

    #[tokio::test]
    async fn insert_conflict() {
        let repo = InMemoryRepository::new();

        repo.save_url("https://example.com", "abc123").await.unwrap();
        let err = repo
            .save_url("https://other.com", "abc123")
            .await
            .unwrap_err();

        assert_eq!(err, StorageError::AlreadyExists);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get_url("abc123").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn ids_are_not_consumed_by_conflicts() {
        let repo = InMemoryRepository::new();

        assert_eq!(repo.save_url("https://a.com", "a").await.unwrap(), 1);
        assert!(repo.save_url("https://b.com", "a").await.is_err());
        assert_eq!(repo.save_url("https://b.com", "b").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn aliases_are_case_sensitive() {
        let repo = InMemoryRepository::new();

        repo.save_url("https://lower.com", "abc").await.unwrap();
        repo.save_url("https://upper.com", "ABC").await.unwrap();

        assert_eq!(repo.get_url("abc").await.unwrap(), "https://lower.com");
        assert_eq!(repo.get_url("ABC").await.unwrap(), "https://upper.com");
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let repo = InMemoryRepository::new();

        assert!(matches!(
            repo.save_url("", "abc").await,
            Err(StorageError::InvalidInput(_))
        ));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn concurrent_same_alias_has_single_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..16u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let url = format!("https://example{}.com", i);
                (url.clone(), repo.save_url(&url, "race").await)
            }));
        }

        let mut winners = vec![];
        for handle in handles {
            let (url, result) = handle.await.unwrap();
            match result {
                Ok(_) => winners.push(url),
                Err(err) => assert_eq!(err, StorageError::AlreadyExists),
            }
        }

        assert_eq!(winners.len(), 1);
        assert_eq!(repo.get_url("race").await.unwrap(), winners[0]);
    }
}

//! Alias store engines.
//!
//! [`SqliteRepository`] is the durable engine; [`InMemoryRepository`]
//! honours the same contract without persistence and is meant for
//! development and tests.

mod error;
pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use shortly_core::error::Result;
pub use shortly_core::{Repository, StorageError, UrlRecord};
pub use sqlite::{SqliteConfig, SqliteRepository};

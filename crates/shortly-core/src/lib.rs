//! Core types and traits for the shortly URL shortener.
//!
//! This crate holds the pieces every other crate agrees on: the alias
//! type, the stored record, the repository contract and the error
//! taxonomy that storage engines translate into.

pub mod alias;
pub mod error;
pub mod repository;

pub use alias::Alias;
pub use error::{CoreError, StorageError};
pub use repository::{ensure_non_empty, Repository, UrlRecord};

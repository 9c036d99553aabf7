//! Persistence medium: a durable key -> string store
//!
//! Every logical collection lives under one stable key as a complete JSON
//! blob. Implementations must make `set` atomic: a reader sees either the old
//! value or the new one, never a mix.

pub mod memory;
pub mod redb_store;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

/// Key holding the full equipment collection
pub const EQUIPMENT_KEY: &str = "@equipment_data";
/// Key holding the full change-log collection
pub const CHANGELOG_KEY: &str = "@changelog_data";
/// Key holding the optional user profile
pub const USER_KEY: &str = "@user_data";
/// Key holding the selected display language
pub const LANGUAGE_KEY: &str = "@app_language";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("read failed: {0}")]
    Read(String),

    #[error("write failed: {0}")]
    Write(String),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under a key.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

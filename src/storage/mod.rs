//! Key-value storage port.
//!
//! Every entity kind lives under one key as a serialized JSON array. The store
//! only ever sees whole values: callers read the full array, mutate it in
//! memory and write the full array back.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use async_trait::async_trait;

/// Durable string storage shared by all entity caches.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

use async_trait::async_trait;

use crate::error::Result;

/// Persistent string key-value storage.
///
/// Writes replace the whole value; there are no partial updates.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<()>;
}

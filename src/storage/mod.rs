//! Namespaced key-value persistence for users, profiles, library state and
//! cached catalog responses.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;

pub mod keys;
mod memory;
mod redis_store;

pub use keys::{ProfileScope, StorageKey};
pub use memory::MemoryStore;
pub use redis_store::{create_redis_client, RedisStore};

/// Raw string store. Backends only move bytes; JSON lives in [`Storage`].
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Stores a value the backend may drop after `expiry`. Backends without
    /// expiry keep it like [`KvStore::set`].
    async fn set_expiring(&self, key: &str, value: String, _expiry: Duration) -> AppResult<()> {
        self.set(key, value).await
    }

    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Typed JSON view over a [`KvStore`]
#[derive(Clone)]
pub struct Storage {
    inner: Arc<dyn KvStore>,
}

impl Storage {
    pub fn new(inner: Arc<dyn KvStore>) -> Self {
        Self { inner }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Reads and deserializes the value under `key`, if any
    pub async fn load<T: DeserializeOwned>(&self, key: &StorageKey) -> AppResult<Option<T>> {
        match self.inner.get(&key.to_string()).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Like [`Storage::load`] but an unreadable value counts as absent
    pub async fn load_or_default<T: DeserializeOwned + Default>(&self, key: &StorageKey) -> T {
        match self.load(key).await {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding unreadable stored value");
                T::default()
            }
        }
    }

    pub async fn save<T: Serialize + ?Sized>(&self, key: &StorageKey, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.inner.set(&key.to_string(), json).await
    }

    pub async fn save_expiring<T: Serialize + ?Sized>(
        &self,
        key: &StorageKey,
        value: &T,
        expiry: Duration,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.inner.set_expiring(&key.to_string(), json, expiry).await
    }

    pub async fn remove(&self, key: &StorageKey) -> AppResult<()> {
        self.inner.remove(&key.to_string()).await
    }
}

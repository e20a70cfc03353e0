//! Two-tier memoization of catalog responses keyed by request URL.
//!
//! Reads go memory, then persisted storage, then network. There is no
//! invalidation: an entry older than the TTL is simply refetched on the next
//! read. Concurrent misses for the same URL each reach the network.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::services::tmdb::CatalogTransport;
use crate::storage::{Storage, StorageKey};

pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Persisted entries outlive their freshness by this factor before the
/// backend may drop them
const RETENTION_FACTOR: u32 = 6;

/// A response body and the time (ms since epoch) it was fetched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub data: Value,
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        now_ms - self.timestamp < ttl.as_millis() as i64
    }
}

pub struct ResponseCache {
    memory: RwLock<HashMap<String, CacheEntry>>,
    storage: Storage,
    transport: Arc<dyn CatalogTransport>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(transport: Arc<dyn CatalogTransport>, storage: Storage, ttl: Duration) -> Self {
        Self {
            memory: RwLock::new(HashMap::new()),
            storage,
            transport,
            ttl,
        }
    }

    /// Returns the JSON body for `url`, fetching only when no tier holds a
    /// fresh copy
    pub async fn fetch_with_cache(&self, url: &str) -> AppResult<Value> {
        let now = Utc::now().timestamp_millis();

        if let Some(entry) = self.memory.read().await.get(url) {
            if entry.is_fresh(now, self.ttl) {
                tracing::debug!(url = %url, "Memory cache hit");
                return Ok(entry.data.clone());
            }
        }

        let key = StorageKey::Response(url.to_string());
        match self.storage.load::<CacheEntry>(&key).await {
            Ok(Some(entry)) if entry.is_fresh(now, self.ttl) => {
                tracing::debug!(url = %url, "Persisted cache hit");
                let data = entry.data.clone();
                self.memory.write().await.insert(url.to_string(), entry);
                return Ok(data);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Ignoring unreadable cache entry");
            }
        }

        tracing::debug!(url = %url, "Cache miss");
        let data = self.transport.get_json(url).await?;

        let entry = CacheEntry {
            data: data.clone(),
            timestamp: now,
        };
        let retention = self.ttl * RETENTION_FACTOR;
        if let Err(e) = self.storage.save_expiring(&key, &entry, retention).await {
            tracing::warn!(url = %url, error = %e, "Failed to persist cache entry");
        }
        self.memory.write().await.insert(url.to_string(), entry);

        Ok(data)
    }

    /// [`ResponseCache::fetch_with_cache`] decoded into a typed response
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let data = self.fetch_with_cache(url).await?;
        serde_json::from_value(data).map_err(|e| {
            tracing::error!(url = %url, error = %e, "Unexpected TMDB response shape");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use movies_core::{CachedBlob, MovieCache, MovieId, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Simple in-memory cache for testing and development.
///
/// Data is stored in `RwLock`-protected maps and is lost when the cache is dropped.
/// Payloads are cloned on get.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    trending: RwLock<Option<CachedBlob>>,
    details: RwLock<HashMap<MovieId, CachedBlob>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieCache for InMemoryCache {
    #[instrument(skip(self))]
    async fn get_trending(&self) -> Result<Option<CachedBlob>> {
        let cache = self.trending.read().await;
        match cache.as_ref() {
            Some(blob) => {
                debug!("Cache hit for trending snapshot");
                Ok(Some(blob.clone()))
            }
            None => {
                debug!("Cache miss for trending snapshot");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, json))]
    async fn put_trending(&self, json: &str, fetched_at: DateTime<Utc>) -> Result<()> {
        *self.trending.write().await = Some(CachedBlob::new(json, fetched_at));
        debug!("Cached trending snapshot");
        Ok(())
    }

    #[instrument(skip(self), fields(movie_id = %id))]
    async fn get_details(&self, id: MovieId) -> Result<Option<CachedBlob>> {
        let cache = self.details.read().await;
        match cache.get(&id) {
            Some(blob) => {
                debug!("Cache hit for details");
                Ok(Some(blob.clone()))
            }
            None => {
                debug!("Cache miss for details");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, json), fields(movie_id = %id))]
    async fn put_details(&self, id: MovieId, json: &str, fetched_at: DateTime<Utc>) -> Result<()> {
        let mut cache = self.details.write().await;
        cache.insert(id, CachedBlob::new(json, fetched_at));
        debug!("Cached details");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        *self.trending.write().await = None;
        self.details.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}

//! No-op cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use movies_core::{CachedBlob, MovieCache, MovieId, Result};
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// All `get_*` methods return `Ok(None)` and all `put_*` methods return `Ok(())`.
/// Useful for disabling caching so every catalog call goes to the remote source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MovieCache for NoopCache {
    async fn get_trending(&self) -> Result<Option<CachedBlob>> {
        trace!("NoopCache: get_trending called, returning None");
        Ok(None)
    }

    async fn put_trending(&self, _json: &str, _fetched_at: DateTime<Utc>) -> Result<()> {
        trace!("NoopCache: put_trending called, doing nothing");
        Ok(())
    }

    async fn get_details(&self, _id: MovieId) -> Result<Option<CachedBlob>> {
        trace!("NoopCache: get_details called, returning None");
        Ok(None)
    }

    async fn put_details(
        &self,
        _id: MovieId,
        _json: &str,
        _fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        trace!("NoopCache: put_details called, doing nothing");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}

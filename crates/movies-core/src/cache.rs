//! Cache trait for storing fetched catalog data.
//!
//! This module defines the [`MovieCache`] trait that provides a unified interface
//! for the two cached blobs: the trending snapshot and per-movie details.
//! Payloads are opaque JSON text; decoding is the caller's concern.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{error::Result, types::MovieId};

/// A cached JSON payload and the time it was fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedBlob {
    /// Serialized payload.
    pub json: String,
    /// When the payload was fetched from the remote source.
    pub fetched_at: DateTime<Utc>,
}

impl CachedBlob {
    /// Creates a new cached blob.
    #[must_use]
    pub fn new(json: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            json: json.into(),
            fetched_at,
        }
    }
}

/// Trait for caching fetched catalog data.
///
/// Implementations can store data in various backends (SQLite, in-memory, etc.)
/// to avoid repeated API calls.
#[async_trait]
pub trait MovieCache: Send + Sync {
    /// Retrieves the trending snapshot.
    ///
    /// Returns `Ok(Some(blob))` if a snapshot exists, `Ok(None)` if not cached.
    async fn get_trending(&self) -> Result<Option<CachedBlob>>;

    /// Replaces the trending snapshot.
    async fn put_trending(&self, json: &str, fetched_at: DateTime<Utc>) -> Result<()>;

    /// Retrieves cached details for a movie.
    ///
    /// Returns `Ok(Some(blob))` if cached, `Ok(None)` if not cached.
    async fn get_details(&self, id: MovieId) -> Result<Option<CachedBlob>>;

    /// Stores details for a movie, replacing any previous entry for the same id.
    async fn put_details(&self, id: MovieId, json: &str, fetched_at: DateTime<Utc>) -> Result<()>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}

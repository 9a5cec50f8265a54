//! Catalog configuration and assembly.

use std::path::PathBuf;
use std::time::Duration;

use movies_core::{CachePolicy, MovieError, Result};

/// Settings needed to build a [`MovieCatalog`](crate::MovieCatalog) against TMDB.
#[derive(Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// TMDB API read access token.
    pub api_token: String,
    /// Override for the API root; `None` uses the public endpoint.
    pub base_url: Option<String>,
    /// SQLite database file; `None` keeps the cache in memory.
    pub cache_path: Option<PathBuf>,
    /// Freshness policy for the trending snapshot.
    pub trending_policy: CachePolicy,
    /// Freshness policy for movie details.
    pub details_policy: CachePolicy,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("cache_path", &self.cache_path)
            .field("trending_policy", &self.trending_policy)
            .field("details_policy", &self.details_policy)
            .finish()
    }
}

impl CatalogConfig {
    /// Configuration with default policies and an in-memory cache.
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: None,
            cache_path: None,
            trending_policy: CachePolicy::trending(),
            details_policy: CachePolicy::details(),
        }
    }

    /// Use a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Persist the cache to a SQLite file.
    #[must_use]
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Override the trending freshness window.
    #[must_use]
    pub const fn with_trending_ttl(mut self, ttl: Duration) -> Self {
        self.trending_policy = CachePolicy::expiring(ttl);
        self
    }

    /// Give details a freshness window instead of keeping them forever.
    #[must_use]
    pub const fn with_details_ttl(mut self, ttl: Duration) -> Self {
        self.details_policy = CachePolicy::expiring(ttl);
        self
    }

    /// Check the configuration before building anything from it.
    ///
    /// # Errors
    /// Returns [`MovieError::InvalidParameter`] if the token is blank.
    pub fn validate(&self) -> Result<()> {
        if self.api_token.trim().is_empty() {
            return Err(MovieError::InvalidParameter(
                "TMDB API token must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Open the local store named by `config`, creating parent directories as needed.
///
/// Does not need an API token, so it also serves maintenance such as clearing
/// the cache.
///
/// # Errors
/// Returns an error if the cache cannot be opened.
#[cfg(feature = "cache-sqlite")]
pub fn open_cache(config: &CatalogConfig) -> Result<movies_cache::SqliteCache> {
    use movies_cache::SqliteCache;
    use tracing::debug;

    match &config.cache_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| MovieError::Cache(e.to_string()))?;
            }
            debug!(path = %path.display(), "Opening SQLite cache");
            SqliteCache::new(path)
        }
        None => SqliteCache::in_memory(),
    }
}

/// Build the remote client, the local store, and the catalog, in that order.
///
/// # Errors
/// Returns an error if the configuration is invalid or the cache cannot be opened.
#[cfg(all(feature = "tmdb", feature = "cache-sqlite"))]
pub fn assemble(config: &CatalogConfig) -> Result<crate::MovieCatalog> {
    use std::sync::Arc;

    use movies_tmdb::TmdbClient;

    config.validate()?;

    let mut client = TmdbClient::new(config.api_token.clone());
    if let Some(base_url) = &config.base_url {
        client = client.with_base_url(base_url.clone());
    }

    let cache = open_cache(config)?;

    Ok(crate::MovieCatalog::new(Arc::new(client), Arc::new(cache))
        .with_trending_policy(config.trending_policy)
        .with_details_policy(config.details_policy))
}

//! Catalog service: decides between cached and fresh data.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use movies_core::{
    CachePolicy, CachedBlob, Movie, MovieCache, MovieDetails, MovieDetailsDto, MovieDto, MovieId,
    MovieSource, Result,
};

use crate::coalesce::{CoalescingSlot, FetchKey, RequestCoalescer};

/// Movie catalog backed by a remote source and a local cache.
///
/// The trending list and per-movie details are served from the cache while
/// fresh under their [`CachePolicy`], and fetched and written through on a miss.
/// Search always goes to the remote source. Concurrent misses for the same key
/// share a single remote fetch.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use movies::{MovieCatalog, SqliteCache, TmdbClient};
///
/// let catalog = MovieCatalog::new(
///     Arc::new(TmdbClient::new("token")),
///     Arc::new(SqliteCache::new("movies.db")?),
/// );
///
/// let trending = catalog.trending_movies().await?;
/// let details = catalog.movie_details(trending[0].id).await?;
/// ```
pub struct MovieCatalog {
    source: Arc<dyn MovieSource>,
    cache: Arc<dyn MovieCache>,
    trending_policy: CachePolicy,
    details_policy: CachePolicy,
    coalescer: RequestCoalescer,
}

impl std::fmt::Debug for MovieCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieCatalog")
            .field("source", &self.source.name())
            .field("trending_policy", &self.trending_policy)
            .field("details_policy", &self.details_policy)
            .field("in_flight", &self.coalescer.in_flight_count())
            .finish()
    }
}

impl MovieCatalog {
    /// Create a catalog with the default cache policies.
    #[must_use]
    pub fn new(source: Arc<dyn MovieSource>, cache: Arc<dyn MovieCache>) -> Self {
        Self {
            source,
            cache,
            trending_policy: CachePolicy::trending(),
            details_policy: CachePolicy::details(),
            coalescer: RequestCoalescer::new(),
        }
    }

    /// Set the freshness policy for the trending snapshot.
    #[must_use]
    pub const fn with_trending_policy(mut self, policy: CachePolicy) -> Self {
        self.trending_policy = policy;
        self
    }

    /// Set the freshness policy for movie details.
    #[must_use]
    pub const fn with_details_policy(mut self, policy: CachePolicy) -> Self {
        self.details_policy = policy;
        self
    }

    /// Drop every cached trending snapshot and details entry.
    ///
    /// # Errors
    /// Returns an error if the store cannot be cleared.
    #[instrument(skip(self))]
    pub async fn clear_cache(&self) -> Result<()> {
        self.cache.clear().await?;
        debug!("Cache cleared");
        Ok(())
    }

    /// Name of the underlying remote source.
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Today's trending movies.
    ///
    /// A fresh cached snapshot is returned as is. A snapshot that no longer
    /// decodes yields an empty list rather than an error. Otherwise the list is
    /// fetched, written through to the cache, and returned; fetch errors propagate.
    #[instrument(skip(self))]
    pub async fn trending_movies(&self) -> Result<Vec<Movie>> {
        loop {
            if let Some(movies) = self.cached_trending().await {
                return Ok(movies);
            }

            match self.coalescer.acquire(FetchKey::Trending).await {
                CoalescingSlot::Follower => {
                    debug!("Joined in-flight trending fetch");
                }
                CoalescingSlot::Leader(_guard) => {
                    // A previous leader may have finished between the check and the election
                    if let Some(movies) = self.cached_trending().await {
                        return Ok(movies);
                    }
                    return self.fetch_trending().await;
                }
            }
        }
    }

    /// Search movies by title. Never cached.
    #[instrument(skip(self))]
    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
        debug!(source = self.source.name(), "Searching movies");
        let results = self.source.search(query).await?;
        Ok(results.into_iter().map(Movie::from).collect())
    }

    /// Full details for one movie.
    ///
    /// Cached details are served while fresh under the details policy, which by
    /// default never expires. A cached entry that fails to decode is an error.
    #[instrument(skip(self), fields(movie_id = %id))]
    pub async fn movie_details(&self, id: MovieId) -> Result<MovieDetails> {
        loop {
            if let Some(details) = self.cached_details(id).await? {
                return Ok(details);
            }

            match self.coalescer.acquire(FetchKey::Details(id)).await {
                CoalescingSlot::Follower => {
                    debug!("Joined in-flight details fetch");
                }
                CoalescingSlot::Leader(_guard) => {
                    if let Some(details) = self.cached_details(id).await? {
                        return Ok(details);
                    }
                    return self.fetch_details(id).await;
                }
            }
        }
    }

    async fn cached_trending(&self) -> Option<Vec<Movie>> {
        let blob = match self.cache.get_trending().await {
            Ok(blob) => blob?,
            Err(e) => {
                warn!(error = %e, "Failed to read trending cache, treating as miss");
                return None;
            }
        };

        if !self.trending_policy.is_fresh(blob.fetched_at, Utc::now()) {
            debug!(fetched_at = %blob.fetched_at, "Trending cache is stale");
            return None;
        }

        debug!("Cache hit for trending movies");
        match serde_json::from_str::<Vec<MovieDto>>(&blob.json) {
            Ok(dtos) => Some(dtos.into_iter().map(Movie::from).collect()),
            Err(e) => {
                warn!(error = %e, "Corrupt trending cache, returning empty list");
                Some(Vec::new())
            }
        }
    }

    async fn fetch_trending(&self) -> Result<Vec<Movie>> {
        debug!(source = self.source.name(), "Fetching trending movies");
        let dtos = self.source.fetch_trending().await?;
        let fetched_at = Utc::now();

        match serde_json::to_string(&dtos) {
            Ok(json) => {
                if let Err(e) = self.cache.put_trending(&json, fetched_at).await {
                    warn!(error = %e, "Failed to cache trending movies");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode trending movies"),
        }

        Ok(dtos.into_iter().map(Movie::from).collect())
    }

    async fn cached_details(&self, id: MovieId) -> Result<Option<MovieDetails>> {
        let blob = match self.cache.get_details(id).await {
            Ok(Some(blob)) => blob,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, "Failed to read details cache, treating as miss");
                return Ok(None);
            }
        };

        if !self.details_policy.is_fresh(blob.fetched_at, Utc::now()) {
            debug!(fetched_at = %blob.fetched_at, "Details cache is stale");
            return Ok(None);
        }

        debug!("Cache hit for movie details");
        Ok(Some(decode_details(&blob)?))
    }

    async fn fetch_details(&self, id: MovieId) -> Result<MovieDetails> {
        debug!(source = self.source.name(), "Fetching movie details");
        let dto = self.source.fetch_details(id).await?;
        let fetched_at = Utc::now();

        match serde_json::to_string(&dto) {
            Ok(json) => {
                if let Err(e) = self.cache.put_details(id, &json, fetched_at).await {
                    warn!(error = %e, "Failed to cache movie details");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode movie details"),
        }

        Ok(dto.into())
    }
}

fn decode_details(blob: &CachedBlob) -> Result<MovieDetails> {
    let dto: MovieDetailsDto = serde_json::from_str(&blob.json)?;
    Ok(dto.into())
}

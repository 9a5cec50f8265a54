//! Remote source trait for fetching catalog data.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    dto::{MovieDetailsDto, MovieDto},
    error::Result,
    types::MovieId,
};

/// A remote catalog the service can read from.
///
/// All operations are idempotent reads. Implementations return transfer objects
/// untouched; mapping to domain types happens in the catalog service.
#[async_trait]
pub trait MovieSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "TMDB").
    fn name(&self) -> &str;

    /// Fetches the first page of today's trending movies.
    async fn fetch_trending(&self) -> Result<Vec<MovieDto>>;

    /// Searches movies by title, first page only.
    ///
    /// The query is passed through as given; blank queries are not rejected.
    async fn search(&self, query: &str) -> Result<Vec<MovieDto>>;

    /// Fetches full details for a single movie.
    async fn fetch_details(&self, id: MovieId) -> Result<MovieDetailsDto>;
}

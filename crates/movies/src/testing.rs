//! Test doubles shared by the catalog and presentation tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use movies_core::{
    CachedBlob, GenreDto, MovieCache, MovieDetailsDto, MovieDto, MovieError, MovieId, MovieSource,
    ProductionCompanyDto, Result,
};

pub(crate) fn movie_dto(id: i64, title: &str) -> MovieDto {
    MovieDto {
        id: MovieId::new(id),
        title: title.to_string(),
        release_date: Some("2023-01-01".to_string()),
        vote_average: 8.5,
        poster_path: Some(format!("/poster{id}.jpg")),
        backdrop_path: Some(format!("/backdrop{id}.jpg")),
        overview: Some(format!("Overview {id}")),
    }
}

pub(crate) fn details_dto(id: i64) -> MovieDetailsDto {
    MovieDetailsDto {
        id: MovieId::new(id),
        title: format!("Movie {id}"),
        release_date: Some("2022-11-18".to_string()),
        vote_average: 7.3,
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
        overview: Some("A detailed overview".to_string()),
        runtime: Some(142),
        genres: vec![
            GenreDto {
                id: 28,
                name: "Action".to_string(),
            },
            GenreDto {
                id: 878,
                name: "Science Fiction".to_string(),
            },
        ],
        production_companies: vec![ProductionCompanyDto {
            id: 420,
            name: "Marvel Studios".to_string(),
            logo_path: Some("/logo.png".to_string()),
        }],
        homepage: Some("https://example.com".to_string()),
    }
}

/// Scripted [`MovieSource`] that counts calls.
#[derive(Debug, Default)]
pub(crate) struct MockSource {
    pub(crate) trending: Vec<MovieDto>,
    pub(crate) search_results: Vec<MovieDto>,
    /// When set, every call fails with a network error carrying this message.
    pub(crate) fail_with: Option<String>,
    pub(crate) delay: Duration,
    pub(crate) trending_calls: AtomicUsize,
    pub(crate) search_calls: AtomicUsize,
    pub(crate) details_calls: AtomicUsize,
    pub(crate) last_query: Mutex<Option<String>>,
}

impl MockSource {
    pub(crate) fn with_trending(trending: Vec<MovieDto>) -> Self {
        Self {
            trending,
            ..Default::default()
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn trending_calls(&self) -> usize {
        self.trending_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }

    async fn respond<T>(&self, value: impl FnOnce() -> T) -> Result<T> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.fail_with {
            Some(message) => Err(MovieError::Network(message.clone())),
            None => Ok(value()),
        }
    }
}

#[async_trait]
impl MovieSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_trending(&self) -> Result<Vec<MovieDto>> {
        self.trending_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(|| self.trending.clone()).await
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieDto>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.to_string());
        self.respond(|| self.search_results.clone()).await
    }

    async fn fetch_details(&self, id: MovieId) -> Result<MovieDetailsDto> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(|| details_dto(id.get())).await
    }
}

/// A store whose every operation fails.
#[derive(Debug, Default)]
pub(crate) struct BrokenCache;

#[async_trait]
impl MovieCache for BrokenCache {
    async fn get_trending(&self) -> Result<Option<CachedBlob>> {
        Err(MovieError::Cache("disk I/O error".to_string()))
    }

    async fn put_trending(&self, _json: &str, _fetched_at: DateTime<Utc>) -> Result<()> {
        Err(MovieError::Cache("disk I/O error".to_string()))
    }

    async fn get_details(&self, _id: MovieId) -> Result<Option<CachedBlob>> {
        Err(MovieError::Cache("disk I/O error".to_string()))
    }

    async fn put_details(
        &self,
        _id: MovieId,
        _json: &str,
        _fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        Err(MovieError::Cache("disk I/O error".to_string()))
    }

    async fn clear(&self) -> Result<()> {
        Err(MovieError::Cache("disk I/O error".to_string()))
    }
}

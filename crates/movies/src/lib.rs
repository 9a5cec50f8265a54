#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/paulcoding/movies/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Cached movie catalog over The Movie Database API.
//!
//! This crate ties the pieces together: it re-exports core types, the cache
//! implementations, and the TMDB client, and provides [`MovieCatalog`], which
//! serves trending lists and movie details from a local cache while fresh and
//! writes through on a miss.
//!
//! # Features
//!
//! - `tmdb` - TMDB remote client
//! - `cache-sqlite` - SQLite-based caching
//!
//! # Example
//!
//! ```rust,ignore
//! use movies::{CatalogConfig, assemble};
//!
//! #[tokio::main]
//! async fn main() -> movies::Result<()> {
//!     let catalog = assemble(&CatalogConfig::new("token").with_cache_path("movies.db"))?;
//!
//!     for movie in catalog.trending_movies().await? {
//!         println!("{} ({})", movie.title, movie.year().unwrap_or("?"));
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use movies_core::*;

// Cache implementations
#[cfg(feature = "cache-sqlite")]
pub use movies_cache::SqliteCache;
pub use movies_cache::{InMemoryCache, NoopCache};

// Remote sources
#[cfg(feature = "tmdb")]
pub use movies_tmdb::TmdbClient;

mod catalog;
pub use catalog::MovieCatalog;

pub mod coalesce;

mod config;
#[cfg(all(feature = "tmdb", feature = "cache-sqlite"))]
pub use config::assemble;
#[cfg(feature = "cache-sqlite")]
pub use config::open_cache;
pub use config::CatalogConfig;

pub mod presentation;
pub use presentation::{
    MovieDetailModel, MovieDetailState, MovieListModel, MovieListState, SEARCH_DEBOUNCE,
};

#[cfg(test)]
mod testing;

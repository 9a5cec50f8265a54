#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/paulcoding/movies/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the movie catalog.
//!
//! This crate provides the foundational abstractions shared by every other crate:
//!
//! - [`MovieSource`](source::MovieSource) - Remote catalog the service reads from
//! - [`MovieCache`](cache::MovieCache) - Local store for fetched payloads
//! - [`CachePolicy`](policy::CachePolicy) - Per-kind freshness windows
//! - [`Movie`](types::Movie) and [`MovieDetails`](types::MovieDetails) - Domain objects
//! - [`dto`] - Wire-format transfer objects

/// Cache trait and types for storing fetched data.
pub mod cache;
/// Wire-format transfer objects.
pub mod dto;
/// Error types for catalog operations.
pub mod error;
/// Cache freshness policies.
pub mod policy;
/// Remote source trait.
pub mod source;
/// Domain types (MovieId, Movie, MovieDetails, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{CachedBlob, MovieCache};
pub use dto::{
    ApiErrorResponse, GenreDto, MovieDetailsDto, MovieDto, PagedResponse, ProductionCompanyDto,
};
pub use error::{MovieError, Result, UNKNOWN_ERROR};
pub use policy::{CachePolicy, TRENDING_TTL};
pub use source::MovieSource;
pub use types::{Genre, Movie, MovieDetails, MovieId, ProductionCompany};

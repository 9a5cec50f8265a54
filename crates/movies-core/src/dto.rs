//! Wire-format transfer objects.
//!
//! These mirror the JSON shapes returned by the upstream catalog API. They are
//! also the representation written to the local cache, so every type here is
//! both `Serialize` and `Deserialize`. Unknown fields are ignored on input.

use serde::{Deserialize, Serialize};

use crate::types::MovieId;

/// A movie as it appears in list responses (trending, search).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDto {
    /// Catalog identifier.
    pub id: MovieId,
    /// Movie title.
    pub title: String,
    /// Release date, `YYYY-MM-DD`.
    pub release_date: Option<String>,
    /// Average user rating, 0.0 to 10.0.
    pub vote_average: f64,
    /// Relative poster image path.
    pub poster_path: Option<String>,
    /// Relative backdrop image path.
    pub backdrop_path: Option<String>,
    /// Synopsis.
    pub overview: Option<String>,
}

/// Full details for a single movie.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDetailsDto {
    /// Catalog identifier.
    pub id: MovieId,
    /// Movie title.
    pub title: String,
    /// Release date, `YYYY-MM-DD`.
    pub release_date: Option<String>,
    /// Average user rating, 0.0 to 10.0.
    pub vote_average: f64,
    /// Relative poster image path.
    pub poster_path: Option<String>,
    /// Relative backdrop image path.
    pub backdrop_path: Option<String>,
    /// Synopsis.
    pub overview: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Genres, in upstream order.
    pub genres: Vec<GenreDto>,
    /// Production companies, in upstream order.
    pub production_companies: Vec<ProductionCompanyDto>,
    /// Official homepage.
    pub homepage: Option<String>,
}

/// A genre attached to a movie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDto {
    /// Genre identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// A production company attached to a movie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompanyDto {
    /// Company identifier.
    pub id: i64,
    /// Company name.
    pub name: String,
    /// Relative logo image path.
    pub logo_path: Option<String>,
}

/// Paginated envelope used by the list endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// Page number of this response.
    pub page: u32,
    /// Items on this page.
    pub results: Vec<T>,
    /// Total number of pages available.
    pub total_pages: u32,
    /// Total number of results available.
    pub total_results: u32,
}

/// Error body returned by the upstream API on failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Upstream-specific status code.
    pub status_code: Option<i64>,
    /// Human-readable error description.
    pub status_message: Option<String>,
    /// Always `false` for error bodies.
    pub success: Option<bool>,
}

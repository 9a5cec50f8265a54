//! Core domain types for the movie catalog.
//!
//! This module defines the application-facing data structures:
//!
//! - [`MovieId`] - Stable catalog identifier
//! - [`Movie`] - List-view movie with derived image URLs and year
//! - [`MovieDetails`] - Detail-view movie with runtime, genres, and companies
//! - [`Genre`] - Genre id/name pair
//! - [`ProductionCompany`] - Production company with derived logo URL
//!
//! Domain objects are built from the transfer objects in [`crate::dto`] through
//! `From` conversions that map every field one to one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dto::{GenreDto, MovieDetailsDto, MovieDto, ProductionCompanyDto};

/// Base URL of the image host.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Image size used for posters.
pub const POSTER_SIZE: &str = "w500";

/// Image size used for backdrops.
pub const BACKDROP_SIZE: &str = "original";

/// Image size used for company logos.
pub const LOGO_SIZE: &str = "w200";

fn image_url(size: &str, path: Option<&str>) -> Option<String> {
    path.map(|p| format!("{IMAGE_BASE_URL}/{size}{p}"))
}

fn release_year(release_date: Option<&str>) -> Option<&str> {
    release_date.and_then(|d| d.split('-').next())
}

/// A stable catalog identifier for a movie.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(i64);

impl MovieId {
    /// Creates a new movie id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MovieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A movie as shown in lists.
#[derive(Clone, Debug, PartialEq)]
pub struct Movie {
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

impl Movie {
    /// Release year, the part of the release date before the first `-`.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    /// Absolute poster URL.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        image_url(POSTER_SIZE, self.poster_path.as_deref())
    }

    /// Absolute backdrop URL.
    #[must_use]
    pub fn backdrop_url(&self) -> Option<String> {
        image_url(BACKDROP_SIZE, self.backdrop_path.as_deref())
    }
}

impl From<MovieDto> for Movie {
    fn from(dto: MovieDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            release_date: dto.release_date,
            vote_average: dto.vote_average,
            poster_path: dto.poster_path,
            backdrop_path: dto.backdrop_path,
            overview: dto.overview,
        }
    }
}

/// Full details for a single movie.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieDetails {
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
    pub genres: Vec<Genre>,
    /// Production companies, in upstream order.
    pub production_companies: Vec<ProductionCompany>,
    /// Official homepage.
    pub homepage: Option<String>,
}

impl MovieDetails {
    /// Release year, the part of the release date before the first `-`.
    #[must_use]
    pub fn year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    /// Absolute poster URL.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        image_url(POSTER_SIZE, self.poster_path.as_deref())
    }

    /// Absolute backdrop URL.
    #[must_use]
    pub fn backdrop_url(&self) -> Option<String> {
        image_url(BACKDROP_SIZE, self.backdrop_path.as_deref())
    }

    /// Runtime rendered as `"<n> min"`.
    #[must_use]
    pub fn runtime_formatted(&self) -> Option<String> {
        self.runtime.map(|minutes| format!("{minutes} min"))
    }

    /// Genre names joined with `", "`.
    #[must_use]
    pub fn genres_formatted(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<MovieDetailsDto> for MovieDetails {
    fn from(dto: MovieDetailsDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            release_date: dto.release_date,
            vote_average: dto.vote_average,
            poster_path: dto.poster_path,
            backdrop_path: dto.backdrop_path,
            overview: dto.overview,
            runtime: dto.runtime,
            genres: dto.genres.into_iter().map(Genre::from).collect(),
            production_companies: dto
                .production_companies
                .into_iter()
                .map(ProductionCompany::from)
                .collect(),
            homepage: dto.homepage,
        }
    }
}

/// A movie genre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genre {
    /// Genre identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl From<GenreDto> for Genre {
    fn from(dto: GenreDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

/// A production company.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductionCompany {
    /// Company identifier.
    pub id: i64,
    /// Company name.
    pub name: String,
    /// Relative logo image path.
    pub logo_path: Option<String>,
}

impl ProductionCompany {
    /// Absolute logo URL.
    #[must_use]
    pub fn logo_url(&self) -> Option<String> {
        image_url(LOGO_SIZE, self.logo_path.as_deref())
    }
}

impl From<ProductionCompanyDto> for ProductionCompany {
    fn from(dto: ProductionCompanyDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            logo_path: dto.logo_path,
        }
    }
}

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/paulcoding/movies/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! The Movie Database (TMDB) remote client.
//!
//! This crate implements the [`MovieSource`] trait from `movies-core` for the
//! [TMDB](https://www.themoviedb.org/) v3 REST API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use movies_tmdb::TmdbClient;
//! use movies_core::{MovieId, MovieSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TmdbClient::new("your_read_access_token");
//!
//!     let trending = client.fetch_trending().await?;
//!     let details = client.fetch_details(MovieId::new(550)).await?;
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use movies_core::{
    ApiErrorResponse, MovieDetailsDto, MovieDto, MovieError, MovieId, MovieSource, PagedResponse,
    Result,
};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Base URL for the TMDB v3 API.
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const JSON: &str = "application/json";

/// TMDB remote client.
///
/// Provides access to:
/// - Today's trending movies
/// - Title search
/// - Full movie details
///
/// Every request carries the bearer token and JSON accept/content-type headers.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    token: String,
    base_url: String,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl TmdbClient {
    /// Create a new TMDB client with the given API read access token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_client(Client::new(), token)
    }

    /// Create a new TMDB client with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: TMDB_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the absolute URL for an endpoint.
    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(endpoint);
        debug!("TMDB request: {}", endpoint);

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| MovieError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MovieError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        serde_json::from_str(&text).map_err(|e| MovieError::Parse(e.to_string()))
    }
}

/// Build an error from a non-success response, preferring the API's own message.
fn api_error(status: u16, body: &str) -> MovieError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|e| e.status_message)
        .unwrap_or_else(|| body.to_string());
    MovieError::Api { status, message }
}

#[async_trait]
impl MovieSource for TmdbClient {
    fn name(&self) -> &str {
        "TMDB"
    }

    async fn fetch_trending(&self) -> Result<Vec<MovieDto>> {
        let page: PagedResponse<MovieDto> = self
            .get("trending/movie/day", &[("page", "1"), ("language", "en-US")])
            .await?;
        Ok(page.results)
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieDto>> {
        let page: PagedResponse<MovieDto> = self
            .get("search/movie", &[("query", query), ("page", "1")])
            .await?;
        Ok(page.results)
    }

    async fn fetch_details(&self, id: MovieId) -> Result<MovieDetailsDto> {
        self.get(&format!("movie/{id}"), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the raw request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    #[test]
    fn test_url_building() {
        let client = TmdbClient::new("token");
        assert_eq!(
            client.url("movie/550"),
            "https://api.themoviedb.org/3/movie/550"
        );

        let client = TmdbClient::new("token").with_base_url("http://localhost:8080/3/");
        assert_eq!(client.url("search/movie"), "http://localhost:8080/3/search/movie");
    }

    #[test]
    fn test_source_metadata() {
        let client = TmdbClient::new("token");
        assert_eq!(client.name(), "TMDB");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = TmdbClient::new("secret_token_12345");
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret_token_12345"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_api_error_prefers_status_message() {
        let err = api_error(
            401,
            r#"{"status_code":7,"status_message":"Invalid API key","success":false}"#,
        );
        assert!(matches!(
            err,
            MovieError::Api { status: 401, ref message } if message == "Invalid API key"
        ));

        let err = api_error(502, "Bad Gateway");
        assert!(matches!(
            err,
            MovieError::Api { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn test_fetch_trending_request_shape() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{
                "page": 1,
                "results": [{
                    "id": 1, "title": "One", "release_date": "2024-05-01",
                    "vote_average": 7.1, "poster_path": null, "backdrop_path": null,
                    "overview": null, "popularity": 12.5
                }],
                "total_pages": 1,
                "total_results": 1
            }"#,
        )
        .await;

        let client = TmdbClient::new("abc123").with_base_url(base);
        let movies = client.fetch_trending().await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "One");

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /trending/movie/day?page=1&language=en-us "));
        assert!(request.contains("authorization: bearer abc123"));
        assert!(request.contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"page":1,"results":[],"total_pages":0,"total_results":0}"#,
        )
        .await;

        let client = TmdbClient::new("abc123").with_base_url(base);
        let movies = client.search("the matrix & co").await.unwrap();
        assert!(movies.is_empty());

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /search/movie?query=the+matrix+%26+co&page=1 "));
    }

    #[tokio::test]
    async fn test_fetch_details_error_status() {
        let (base, server) = serve_once(
            "404 Not Found",
            r#"{
                "status_code": 34,
                "status_message": "The resource you requested could not be found.",
                "success": false
            }"#,
        )
        .await;

        let client = TmdbClient::new("abc123").with_base_url(base);
        let err = client.fetch_details(MovieId::new(999_999)).await.unwrap_err();
        assert!(matches!(err, MovieError::Api { status: 404, .. }));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /movie/999999 "));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (base, server) = serve_once("200 OK", r#"{"id": 5}"#).await;

        let client = TmdbClient::new("abc123").with_base_url(base);
        let err = client.fetch_details(MovieId::new(5)).await.unwrap_err();
        assert!(matches!(err, MovieError::Parse(_)));
        server.await.unwrap();
    }
}

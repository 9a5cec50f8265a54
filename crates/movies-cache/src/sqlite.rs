//! SQLite-based cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use movies_core::{CachedBlob, MovieCache, MovieError, MovieId, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// Primary key of the single trending row.
const TRENDING_ROW_ID: i64 = 0;

/// SQLite-based cache for catalog data.
///
/// This cache stores data in a SQLite database file, providing persistence across
/// application restarts. Every statement runs under `tokio::task::spawn_blocking`
/// so storage work stays off the async workers.
#[derive(Debug, Clone)]
pub struct SqliteCache {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCache {
    /// Create a new SQLite cache at the given path.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| MovieError::Cache(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Create an in-memory SQLite cache.
    ///
    /// Useful for testing; data is lost when the cache is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| MovieError::Cache(e.to_string()))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Initialize the database schema.
    fn initialize_schema(conn: &Connection) -> Result<()> {
        // Single-row trending snapshot
        conn.execute(
            "CREATE TABLE IF NOT EXISTS trending_movie_cache (
                id INTEGER PRIMARY KEY CHECK (id = 0),
                data TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )",
            [],
        )
        .map_err(|e| MovieError::Cache(e.to_string()))?;

        // Details cache table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS movie_details_cache (
                movie_id INTEGER PRIMARY KEY,
                data TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )",
            [],
        )
        .map_err(|e| MovieError::Cache(e.to_string()))?;

        debug!("SQLite cache schema initialized");
        Ok(())
    }

    /// Run a statement against the connection on the blocking thread pool.
    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|e| MovieError::Cache(e.to_string()))?;
            f(&*conn).map_err(|e| MovieError::Cache(e.to_string()))
        })
        .await
        .map_err(|e| MovieError::Cache(e.to_string()))?
    }

    fn to_blob((json, millis): (String, i64)) -> Result<CachedBlob> {
        let fetched_at = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| MovieError::Cache(format!("Invalid cache timestamp: {millis}")))?;
        Ok(CachedBlob { json, fetched_at })
    }
}

#[async_trait]
impl MovieCache for SqliteCache {
    #[instrument(skip(self))]
    async fn get_trending(&self) -> Result<Option<CachedBlob>> {
        let row = self
            .run(|conn| {
                conn.query_row(
                    "SELECT data, timestamp FROM trending_movie_cache WHERE id = ?1",
                    params![TRENDING_ROW_ID],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
                )
                .optional()
            })
            .await?;

        match row {
            Some(row) => {
                debug!("Found cached trending snapshot");
                Self::to_blob(row).map(Some)
            }
            None => {
                debug!("No cached trending snapshot found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, json), fields(bytes = json.len()))]
    async fn put_trending(&self, json: &str, fetched_at: DateTime<Utc>) -> Result<()> {
        let json = json.to_string();
        let millis = fetched_at.timestamp_millis();

        self.run(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO trending_movie_cache (id, data, timestamp)
                 VALUES (?1, ?2, ?3)",
                params![TRENDING_ROW_ID, json, millis],
            )
        })
        .await?;

        debug!("Cached trending snapshot");
        Ok(())
    }

    #[instrument(skip(self), fields(movie_id = %id))]
    async fn get_details(&self, id: MovieId) -> Result<Option<CachedBlob>> {
        let row = self
            .run(move |conn| {
                conn.query_row(
                    "SELECT data, timestamp FROM movie_details_cache WHERE movie_id = ?1",
                    params![id.get()],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
                )
                .optional()
            })
            .await?;

        match row {
            Some(row) => {
                debug!("Found cached details");
                Self::to_blob(row).map(Some)
            }
            None => {
                debug!("No cached details found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, json), fields(movie_id = %id, bytes = json.len()))]
    async fn put_details(&self, id: MovieId, json: &str, fetched_at: DateTime<Utc>) -> Result<()> {
        let json = json.to_string();
        let millis = fetched_at.timestamp_millis();

        self.run(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO movie_details_cache (movie_id, data, timestamp)
                 VALUES (?1, ?2, ?3)",
                params![id.get(), json, millis],
            )
        })
        .await?;

        debug!("Cached details");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.run(|conn| {
            conn.execute("DELETE FROM trending_movie_cache", [])?;
            conn.execute("DELETE FROM movie_details_cache", [])
        })
        .await?;

        debug!("Cleared all cache entries");
        Ok(())
    }
}

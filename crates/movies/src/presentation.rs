//! Observable state holders for a UI built on top of the catalog.
//!
//! Each model owns its state behind a [`tokio::sync::watch`] channel: callers
//! read the current value or subscribe to changes. Models are plain objects,
//! created and dropped by whoever renders them.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use movies_core::{Movie, MovieDetails, MovieId};

use crate::MovieCatalog;

/// Quiet period after the last keystroke before a search is sent.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// State of a movie list screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieListState {
    /// A request is outstanding.
    pub is_loading: bool,
    /// Movies currently shown.
    pub movies: Vec<Movie>,
    /// Message of the last failure, cleared when a new request starts.
    pub error_message: Option<String>,
}

/// Trending list and search results, with debounced query input.
#[derive(Debug)]
pub struct MovieListModel {
    catalog: Arc<MovieCatalog>,
    state: watch::Sender<MovieListState>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl MovieListModel {
    /// Create a model in the initial, idle state.
    #[must_use]
    pub fn new(catalog: Arc<MovieCatalog>) -> Self {
        Self {
            catalog,
            state: watch::Sender::new(MovieListState::default()),
            pending: Mutex::new(None),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> MovieListState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MovieListState> {
        self.state.subscribe()
    }

    /// Load the trending list.
    pub async fn load_trending(&self) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        match self.catalog.trending_movies().await {
            Ok(movies) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.movies = movies;
            }),
            Err(e) => {
                warn!(error = %e, "Failed to load trending movies");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.error_message = Some(e.user_message());
                });
            }
        }
    }

    /// Run a search immediately, replacing the shown movies.
    pub async fn search(&self, query: &str) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
            s.movies.clear();
        });

        match self.catalog.search_movies(query).await {
            Ok(movies) => self.state.send_modify(|s| {
                s.is_loading = false;
                s.movies = movies;
            }),
            Err(e) => {
                warn!(error = %e, "Search failed");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.error_message = Some(e.user_message());
                });
            }
        }
    }

    /// React to the search box changing.
    ///
    /// A blank query shows the trending list right away. Anything else is
    /// searched after [`SEARCH_DEBOUNCE`] unless another call comes first, which
    /// cancels the pending one.
    pub fn set_query(self: &Arc<Self>, query: impl Into<String>) {
        let query = query.into();
        let model = Arc::clone(self);

        let task = tokio::spawn(async move {
            if query.trim().is_empty() {
                model.load_trending().await;
            } else {
                tokio::time::sleep(SEARCH_DEBOUNCE).await;
                model.search(&query).await;
            }
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl Drop for MovieListModel {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }
}

/// State of a movie detail screen.
#[derive(Clone, Debug, PartialEq)]
pub enum MovieDetailState {
    /// Details are being fetched.
    Loading,
    /// Details are available.
    Loaded(MovieDetails),
    /// The fetch failed with this message.
    Failed(String),
}

/// Details for a single movie.
#[derive(Debug)]
pub struct MovieDetailModel {
    catalog: Arc<MovieCatalog>,
    movie_id: MovieId,
    state: watch::Sender<MovieDetailState>,
}

impl MovieDetailModel {
    /// Create a model for `movie_id`, starting in [`MovieDetailState::Loading`].
    #[must_use]
    pub fn new(catalog: Arc<MovieCatalog>, movie_id: MovieId) -> Self {
        Self {
            catalog,
            movie_id,
            state: watch::Sender::new(MovieDetailState::Loading),
        }
    }

    /// The movie this model shows.
    #[must_use]
    pub const fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> MovieDetailState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MovieDetailState> {
        self.state.subscribe()
    }

    /// Fetch the details.
    pub async fn load(&self) {
        self.state.send_replace(MovieDetailState::Loading);

        let next = match self.catalog.movie_details(self.movie_id).await {
            Ok(details) => MovieDetailState::Loaded(details),
            Err(e) => {
                warn!(error = %e, movie_id = %self.movie_id, "Failed to load movie details");
                MovieDetailState::Failed(e.user_message())
            }
        };
        self.state.send_replace(next);
    }
}

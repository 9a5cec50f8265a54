//! `movies` command-line front end.
//!
//! Shows today's trending movies, searches by title, and prints details for a
//! single movie, using the local cache whenever it is fresh.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use movies::{
    CatalogConfig, Movie, MovieCache, MovieCatalog, MovieDetails, MovieError, MovieId, assemble,
    open_cache,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Browse trending movies and movie details from TMDB
#[derive(Parser, Debug)]
#[command(name = "movies")]
#[command(version, about)]
struct Cli {
    /// TMDB API read access token, required by every command that calls TMDB
    #[arg(long, env = "TMDB_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// SQLite cache file [default: platform cache dir]
    #[arg(long, value_name = "PATH")]
    cache: Option<PathBuf>,

    /// Keep the cache in memory for this run only
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,

    /// Override the TMDB API root
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Trending cache lifetime in seconds
    #[arg(long, value_name = "SECS")]
    trending_ttl: Option<u64>,

    /// Details cache lifetime in seconds [default: never expire]
    #[arg(long, value_name = "SECS")]
    details_ttl: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Today's trending movies
    Trending,
    /// Search movies by title
    Search {
        /// Title to look for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Full details for one movie
    Details {
        /// TMDB movie id
        id: MovieId,
    },
    /// Remove every cached entry
    ClearCache,
}

impl Cli {
    fn config(&self) -> Result<CatalogConfig> {
        let mut config = CatalogConfig::new(self.token.clone().unwrap_or_default());

        if !self.no_cache {
            let path = match &self.cache {
                Some(path) => path.clone(),
                None => default_cache_path().context("could not determine a cache directory")?,
            };
            config = config.with_cache_path(path);
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(secs) = self.trending_ttl {
            config = config.with_trending_ttl(Duration::from_secs(secs));
        }
        if let Some(secs) = self.details_ttl {
            config = config.with_details_ttl(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn default_cache_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "movies")?;
    Some(dirs.cache_dir().join("movies.db"))
}

/// Report a catalog failure by its user-facing message.
fn user_facing(e: MovieError) -> anyhow::Error {
    anyhow!(e.user_message())
}

/// Build the catalog for commands that call TMDB.
fn connect(config: &CatalogConfig) -> Result<MovieCatalog> {
    config
        .validate()
        .map_err(user_facing)
        .context("pass --token or set TMDB_API_TOKEN")?;
    assemble(config)
        .map_err(user_facing)
        .context("failed to set up the movie catalog")
}

fn movie_line(movie: &Movie) -> String {
    format!(
        "{:>8}  {} ({})  {:.1}",
        movie.id,
        movie.title,
        movie.year().unwrap_or("?"),
        movie.vote_average
    )
}

fn details_block(details: &MovieDetails) -> String {
    let mut lines = vec![
        format!("{} ({})", details.title, details.year().unwrap_or("?")),
        format!("Rating:   {:.1}", details.vote_average),
    ];

    if let Some(runtime) = details.runtime_formatted() {
        lines.push(format!("Runtime:  {runtime}"));
    }
    if !details.genres.is_empty() {
        lines.push(format!("Genres:   {}", details.genres_formatted()));
    }
    if !details.production_companies.is_empty() {
        let names: Vec<&str> = details
            .production_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        lines.push(format!("Studios:  {}", names.join(", ")));
    }
    if let Some(homepage) = details.homepage.as_deref().filter(|h| !h.is_empty()) {
        lines.push(format!("Homepage: {homepage}"));
    }
    if let Some(poster) = details.poster_url() {
        lines.push(format!("Poster:   {poster}"));
    }
    if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
        lines.push(String::new());
        lines.push(overview.to_string());
    }

    lines.join("\n")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    debug!(?config, "Starting");

    match cli.command {
        Command::Trending => {
            let catalog = connect(&config)?;
            let movies = catalog.trending_movies().await.map_err(user_facing)?;
            for movie in movies {
                println!("{}", movie_line(&movie));
            }
        }
        Command::Search { query } => {
            let query = query.join(" ");
            let catalog = connect(&config)?;
            let results = catalog.search_movies(&query).await.map_err(user_facing)?;
            if results.is_empty() {
                println!("No movies found for \"{query}\"");
            }
            for movie in results {
                println!("{}", movie_line(&movie));
            }
        }
        Command::Details { id } => {
            let catalog = connect(&config)?;
            let details = catalog.movie_details(id).await.map_err(user_facing)?;
            println!("{}", details_block(&details));
        }
        Command::ClearCache => {
            // Local only, so no token is needed
            let cache = open_cache(&config)
                .map_err(user_facing)
                .context("failed to open the cache")?;
            cache.clear().await.map_err(user_facing)?;
            println!("Cache cleared");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use movies::{Genre, MovieDetailsDto, MovieDto};

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["movies", "--token", "t"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        assert_eq!(parse(&["trending"]).command, Command::Trending);
        assert_eq!(
            parse(&["search", "the", "matrix"]).command,
            Command::Search {
                query: vec!["the".to_string(), "matrix".to_string()]
            }
        );
        assert_eq!(
            parse(&["details", "550"]).command,
            Command::Details {
                id: MovieId::new(550)
            }
        );
        assert_eq!(parse(&["clear-cache"]).command, Command::ClearCache);
    }

    #[test]
    fn test_details_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["movies", "--token", "t", "details", "abc"]).is_err());
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["movies", "--token", "t", "search"]).is_err());
    }

    #[test]
    fn test_config_from_flags() {
        let cli = parse(&[
            "--cache",
            "/tmp/m.db",
            "--base-url",
            "http://localhost:8080",
            "--trending-ttl",
            "60",
            "--details-ttl",
            "600",
            "trending",
        ]);
        let config = cli.config().unwrap();

        assert_eq!(config.cache_path, Some(PathBuf::from("/tmp/m.db")));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.trending_policy.ttl(), Some(Duration::from_secs(60)));
        assert_eq!(config.details_policy.ttl(), Some(Duration::from_secs(600)));
    }

    fn tokenless(command: Command) -> Cli {
        Cli {
            token: None,
            cache: None,
            no_cache: true,
            base_url: None,
            trending_ttl: None,
            details_ttl: None,
            command,
        }
    }

    #[tokio::test]
    async fn test_clear_cache_needs_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.db");
        let mut cli = tokenless(Command::ClearCache);
        cli.no_cache = false;
        cli.cache = Some(path.clone());

        let cache = open_cache(&cli.config().unwrap()).unwrap();
        cache.clear().await.unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_token_rejected_for_remote_commands() {
        let config = tokenless(Command::Trending).config().unwrap();
        let err = connect(&config).unwrap_err();
        assert!(format!("{err:#}").contains("TMDB_API_TOKEN"));
    }

    #[test]
    fn test_error_without_message_reads_unknown() {
        let err = user_facing(MovieError::Network(String::new()));
        assert_eq!(err.to_string(), "Unknown error");
        assert_eq!(format!("{err:#}"), "Unknown error");

        let err = user_facing(MovieError::Network("connection refused".to_string()));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_no_cache_keeps_memory_store() {
        let config = parse(&["--no-cache", "trending"]).config().unwrap();
        assert!(config.cache_path.is_none());
    }

    #[test]
    fn test_movie_line() {
        let movie = Movie::from(MovieDto {
            id: MovieId::new(603),
            title: "The Matrix".to_string(),
            release_date: Some("1999-03-30".to_string()),
            vote_average: 8.2,
            poster_path: None,
            backdrop_path: None,
            overview: None,
        });
        assert_eq!(movie_line(&movie), "     603  The Matrix (1999)  8.2");
    }

    #[test]
    fn test_details_block() {
        let mut details = MovieDetails::from(MovieDetailsDto {
            id: MovieId::new(603),
            title: "The Matrix".to_string(),
            release_date: None,
            vote_average: 8.2,
            poster_path: None,
            backdrop_path: None,
            overview: Some("Neo wakes up.".to_string()),
            runtime: Some(136),
            genres: Vec::new(),
            production_companies: Vec::new(),
            homepage: None,
        });
        details.genres.push(Genre {
            id: 28,
            name: "Action".to_string(),
        });

        let block = details_block(&details);
        assert!(block.starts_with("The Matrix (?)"));
        assert!(block.contains("Runtime:  136 min"));
        assert!(block.contains("Genres:   Action"));
        assert!(block.ends_with("Neo wakes up."));
        assert!(!block.contains("Studios"));
    }
}

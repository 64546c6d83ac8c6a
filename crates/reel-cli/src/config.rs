use clap::{Parser, Subcommand};
use std::sync::LazyLock;

use reel_core::config::{
    DEFAULT_EMBEDDING_MODEL, DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_TMDB_BASE_URL,
};
use reel_core::{AppError, CatalogConfig};

static VERSION_INFO: LazyLock<String> = LazyLock::new(|| {
    let version = env!("CARGO_PKG_VERSION");

    let commit = option_env!("VERGEN_GIT_SHA")
        .map(|s| s.chars().take(7).collect::<String>())
        .unwrap_or_else(|| "unknown".to_string());

    let built = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown"); // YYYY-MM-DD
    let target = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown");
    let rustc = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");

    format!("{version}\ncommit: {commit}\nbuilt: {built}\ntarget: {target}\nrustc: {rustc}")
});

pub fn version_info() -> &'static str {
    &VERSION_INFO
}

/// CLI configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "reel")]
#[command(
    author,
    version = version_info(),
    about = "Semantic search over TMDB's popular movies"
)]
#[command(after_help = "Examples:
  reel migrate
  reel ingest --page 1
  reel search \"uzayda geçen bilim kurgu\"
  reel search \"anime\" --filtered
  reel grouped")]
pub struct Config {
    /// PostgreSQL database connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// OpenAI API key (required by ingest, backfill and search)
    #[arg(long, env = "OPENAI_API_KEY")]
    pub openai_api_key: Option<String>,

    /// OpenAI embedding model
    #[arg(long, env = "EMBEDDING_MODEL", default_value = DEFAULT_EMBEDDING_MODEL)]
    pub embedding_model: String,

    /// Custom embeddings endpoint (Azure OpenAI or a proxy)
    #[arg(long, env = "OPENAI_ENDPOINT")]
    pub openai_endpoint: Option<String>,

    /// TMDB API key (required by ingest, popular and grouped)
    #[arg(long, env = "TMDB_API_KEY")]
    pub tmdb_api_key: Option<String>,

    /// TMDB API root
    #[arg(long, env = "TMDB_BASE_URL", default_value = DEFAULT_TMDB_BASE_URL)]
    pub tmdb_base_url: String,

    /// Language sent with every catalog request
    #[arg(long, env = "TMDB_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub tmdb_language: String,

    /// Prefix for relative poster paths
    #[arg(long, env = "TMDB_IMAGE_BASE_URL", default_value = DEFAULT_IMAGE_BASE_URL)]
    pub tmdb_image_base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create the movies table if it does not exist
    Migrate,
    /// Fetch one page of popular movies and store the new ones
    #[command(after_help = "Example: reel ingest --page 3")]
    Ingest {
        /// Catalog page, starting at 1
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Compute embeddings for stored movies that have none
    Backfill,
    /// Search stored movies by meaning
    Search {
        /// Search query text
        query: String,
        /// Skip movies whose title is written in Chinese, Japanese or Korean
        #[arg(long)]
        filtered: bool,
    },
    /// Print TMDB's first page of popular movies as JSON
    Popular,
    /// Print the popular movies grouped by genre as JSON
    Grouped,
    /// Show database statistics
    Stats,
}

impl Config {
    /// Catalog settings derived from the TMDB options.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.tmdb_base_url.clone(),
            language: self.tmdb_language.clone(),
            image_base_url: self.tmdb_image_base_url.clone(),
        }
    }

    /// Returns the OpenAI key, or a configuration error naming the variable.
    pub fn require_openai_key(&self) -> Result<&str, AppError> {
        self.openai_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::ConfigError("OPENAI_API_KEY is not set".to_string()))
    }

    /// Returns the TMDB key, or a configuration error naming the variable.
    pub fn require_tmdb_key(&self) -> Result<&str, AppError> {
        self.tmdb_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::ConfigError("TMDB_API_KEY is not set".to_string()))
    }
}

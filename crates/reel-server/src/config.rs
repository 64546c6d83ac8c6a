use clap::Parser;

use reel_core::CatalogConfig;
use reel_core::config::{
    DEFAULT_EMBEDDING_MODEL, DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_TMDB_BASE_URL,
};

/// Server configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug, Clone)]
#[command(name = "reel-server")]
#[command(author, version, about = "REST API server for Reel semantic movie search")]
pub struct ServerConfig {
    /// PostgreSQL database connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// OpenAI API key for generating embeddings
    #[arg(long, env = "OPENAI_API_KEY")]
    pub openai_api_key: String,

    /// TMDB API key for the movie catalog
    #[arg(long, env = "TMDB_API_KEY")]
    pub tmdb_api_key: String,

    /// TMDB API root
    #[arg(long, env = "TMDB_BASE_URL", default_value = DEFAULT_TMDB_BASE_URL)]
    pub tmdb_base_url: String,

    /// Language sent with every catalog request
    #[arg(long, env = "TMDB_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub tmdb_language: String,

    /// Prefix for relative poster paths
    #[arg(long, env = "TMDB_IMAGE_BASE_URL", default_value = DEFAULT_IMAGE_BASE_URL)]
    pub tmdb_image_base_url: String,

    /// OpenAI embedding model
    #[arg(long, env = "EMBEDDING_MODEL", default_value = DEFAULT_EMBEDDING_MODEL)]
    pub embedding_model: String,

    /// Custom embeddings endpoint (Azure OpenAI or a proxy)
    #[arg(long, env = "OPENAI_ENDPOINT")]
    pub openai_endpoint: Option<String>,

    /// Server port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Server host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Allowed CORS origins, comma separated, or "*" for any
    #[arg(long, env = "CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,
}

impl ServerConfig {
    /// Catalog settings derived from the TMDB options.
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.tmdb_base_url.clone(),
            language: self.tmdb_language.clone(),
            image_base_url: self.tmdb_image_base_url.clone(),
        }
    }
}

//! Configuration types for Reel components.
//!
//! Binaries build these from command line arguments and environment
//! variables; services and clients only see the typed structs below.

use std::time::Duration;

/// Default TMDB v3 API root.
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default prefix turning a relative TMDB poster path into an absolute image URL.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Default catalog language.
pub const DEFAULT_LANGUAGE: &str = "tr-TR";

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Database connection pool configuration.
pub struct DbConfig {
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self { max_connections: 5 }
    }
}

/// HTTP client configuration for external API calls.
///
/// Reel performs a single attempt per request; the timeout is the only
/// deadline applied to outbound calls.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Movie catalog (TMDB) configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, e.g. `https://api.themoviedb.org/3`.
    pub base_url: String,
    /// Language code sent with every catalog request.
    pub language: String,
    /// Prefix used to make stored poster paths absolute.
    pub image_base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Sets the catalog language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the image base URL.
    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    /// Builds the absolute poster URL for a catalog poster path.
    ///
    /// Paths that are already absolute are returned unchanged and a missing
    /// path yields an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use reel_core::CatalogConfig;
    ///
    /// let config = CatalogConfig::default();
    /// assert_eq!(
    ///     config.poster_url(Some("/abc.jpg")),
    ///     "https://image.tmdb.org/t/p/w500/abc.jpg"
    /// );
    /// assert_eq!(config.poster_url(None), "");
    /// ```
    pub fn poster_url(&self, poster_path: Option<&str>) -> String {
        match poster_path {
            None | Some("") => String::new(),
            Some(path) if path.starts_with("http://") || path.starts_with("https://") => {
                path.to_string()
            }
            Some(path) => format!("{}{}", self.image_base_url.trim_end_matches('/'), path),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of hits returned by a search.
    pub limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

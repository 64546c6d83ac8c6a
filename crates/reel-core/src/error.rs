use thiserror::Error;

/// Application-wide error types.
///
/// This enum represents all possible errors that can occur in Reel.
/// It uses the `thiserror` crate for ergonomic error handling and automatic conversion
/// from underlying library errors.
///
/// # Error Conversion
///
/// `sqlx::Error` converts into `AppError::DatabaseError` through `#[from]`.
///
/// # Examples
///
/// ```no_run
/// use reel_core::error::AppError;
///
/// fn example() -> Result<(), AppError> {
///     Err(AppError::MovieNotFound(550))
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operation failed.
    ///
    /// This error wraps all errors from SQLx database operations, including
    /// connection failures, query errors, and constraint violations.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// HTTP client request failed.
    ///
    /// This error occurs when HTTP requests fail for reasons other than
    /// connectivity or timeouts, e.g. an unexpected status code.
    #[error("API Client error: {0}")]
    ClientError(String),

    /// The embedding provider failed or returned an empty vector.
    ///
    /// On the search path this is fatal for the request. During ingestion
    /// and backfill it is caught per movie and the batch continues.
    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// The upstream movie catalog could not be reached or answered with an error.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// URL parsing failed.
    ///
    /// This error occurs when a configured base URL cannot be parsed or
    /// an endpoint cannot be joined onto it.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Movie not found in the store.
    #[error("Movie not found: {0}")]
    MovieNotFound(i64),

    /// API response contained no data.
    ///
    /// This error occurs when an API returns a successful status but
    /// the response body is empty or missing expected data.
    #[error("Empty response from API")]
    EmptyResponse,

    /// Network or connection error.
    ///
    /// This error occurs when a network request fails due to connectivity issues,
    /// DNS resolution failures, or the remote server being unreachable.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Please wait and try again.")]
    RateLimitExceeded,

    /// Configuration error, such as a missing API key.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns a user-friendly error message suitable for CLI output.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DatabaseError(e) => {
                if e.to_string().contains("connection") {
                    "Cannot connect to database. Is PostgreSQL running?\n   Try: docker-compose up -d".to_string()
                } else {
                    format!("Database error: {}", e)
                }
            }
            AppError::ClientError(msg) => format!("API error: {}", msg),
            AppError::EmbeddingUnavailable(msg) => {
                format!(
                    "Could not compute an embedding: {}\n   Check your OPENAI_API_KEY environment variable.",
                    msg
                )
            }
            AppError::CatalogUnavailable(msg) => {
                format!(
                    "The movie catalog is unavailable: {}\n   Check your TMDB_API_KEY and internet connection.",
                    msg
                )
            }
            AppError::MovieNotFound(id) => format!("No stored movie with id {}", id),
            AppError::NetworkError(msg) => {
                format!("Network error: {}\n   Check your internet connection.", msg)
            }
            AppError::Timeout(secs) => {
                format!(
                    "Request timed out after {} seconds.\n   The server may be overloaded. Try again later.",
                    secs
                )
            }
            AppError::RateLimitExceeded => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            AppError::EmptyResponse => {
                "The API returned no data. The service may be temporarily unavailable.".to_string()
            }
            AppError::ConfigError(msg) => {
                format!("Configuration error: {}\n   Check your environment variables.", msg)
            }
            _ => self.to_string(),
        }
    }
}

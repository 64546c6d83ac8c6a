//! TMDB client for the popular-movies listing and the genre list.
//!
//! TMDB API reference: <https://developer.themoviedb.org/reference/intro/getting-started>

use reel_core::error::AppError;
use reel_core::traits::CatalogClient;
use reel_core::{CatalogConfig, CatalogMovie, Genre, HttpConfig};
use reqwest::{Client, Response, Url};
use serde::Deserialize;

/// Response of `GET /movie/popular`.
///
/// Paging fields (`total_pages`, `total_results`) are not used.
#[derive(Deserialize, Debug)]
struct PopularResponse {
    #[serde(default)]
    results: Vec<CatalogMovie>,
}

/// Response of `GET /genre/movie/list`.
#[derive(Deserialize, Debug)]
struct GenreListResponse {
    #[serde(default)]
    genres: Vec<Genre>,
}

/// Error body returned by TMDB on failed requests.
#[derive(Deserialize, Debug)]
struct TmdbError {
    status_message: String,
}

/// HTTP client for the TMDB v3 API.
///
/// Every request carries the API key and the configured language as query
/// parameters.
///
/// # Examples
///
/// ```no_run
/// use reel_client::TmdbClient;
/// use reel_core::CatalogConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TmdbClient::new("tmdb-api-key", &CatalogConfig::default())?;
/// let movies = client.fetch_popular(1).await?;
/// println!("Page 1 has {} movies", movies.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: Url,
    api_key: String,
    language: String,
    timeout_secs: u64,
}

impl TmdbClient {
    /// Creates a new TMDB client.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidUrl` if `config.base_url` cannot be parsed.
    /// Returns `AppError::ClientError` if the HTTP client cannot be built.
    pub fn new(api_key: &str, config: &CatalogConfig) -> Result<Self, AppError> {
        // Url::join replaces the last segment unless the base ends with '/'.
        let normalized = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|_| AppError::InvalidUrl(config.base_url.clone()))?;

        let http_config = HttpConfig::default();
        let client = Client::builder()
            .user_agent(concat!("Reel/", env!("CARGO_PKG_VERSION")))
            .timeout(http_config.timeout)
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
            language: config.language.clone(),
            timeout_secs: http_config.timeout.as_secs(),
        })
    }

    /// Fetches one page of `movie/popular`.
    ///
    /// Movies are returned in the order TMDB delivers them.
    pub async fn fetch_popular(&self, page: u32) -> Result<Vec<CatalogMovie>, AppError> {
        let url = self.endpoint("movie/popular", Some(page))?;
        let body: PopularResponse = self.get_json(url).await?;
        tracing::debug!(page, count = body.results.len(), "Fetched popular movies");
        Ok(body.results)
    }

    /// Fetches `genre/movie/list`.
    pub async fn fetch_genres(&self) -> Result<Vec<Genre>, AppError> {
        let url = self.endpoint("genre/movie/list", None)?;
        let body: GenreListResponse = self.get_json(url).await?;
        Ok(body.genres)
    }

    fn endpoint(&self, path: &str, page: Option<u32>) -> Result<Url, AppError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| AppError::InvalidUrl(e.to_string()))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            query.append_pair("language", &self.language);
            if let Some(page) = page {
                query.append_pair("page", &page.to_string());
            }
        }

        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::CatalogUnavailable(format!(
                    "TMDB request timed out after {}s",
                    self.timeout_secs
                ))
            } else if e.is_connect() {
                AppError::CatalogUnavailable(format!("Cannot connect to TMDB: {}", e))
            } else {
                AppError::CatalogUnavailable(e.to_string())
            }
        })?;

        let resp = check_status(resp).await?;

        resp.json()
            .await
            .map_err(|e| AppError::CatalogUnavailable(format!("Invalid TMDB response: {}", e)))
    }
}

async fn check_status(resp: Response) -> Result<Response, AppError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), &body))
}

/// Maps a non-success TMDB status to an error.
///
/// Every catalog failure surfaces as `AppError::CatalogUnavailable`.
fn status_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<TmdbError>(body)
        .map(|e| e.status_message)
        .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));

    match status {
        401 => AppError::CatalogUnavailable(format!(
            "TMDB authentication failed: {}. Check your TMDB_API_KEY.",
            message
        )),
        429 => AppError::CatalogUnavailable(format!("TMDB rate limit exceeded: {}", message)),
        _ => AppError::CatalogUnavailable(format!("TMDB error: {}", message)),
    }
}

// =============================================================================
// Trait Implementation: CatalogClient
// =============================================================================

impl CatalogClient for TmdbClient {
    async fn popular_movies(&self, page: u32) -> Result<Vec<CatalogMovie>, AppError> {
        self.fetch_popular(page).await
    }

    async fn genres(&self) -> Result<Vec<Genre>, AppError> {
        self.fetch_genres().await
    }
}

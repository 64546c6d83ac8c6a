use reel_client::{OpenAIClient, TmdbClient};
use reel_core::{CatalogConfig, CatalogService, IngestService, SearchService};
use reel_db::MovieRepository;

/// Shared application state for all handlers.
///
/// Axum clones the state per request; every field is a cheap handle over a
/// pooled client or connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Semantic and filtered search over stored movies
    pub search_service: SearchService<MovieRepository, OpenAIClient>,

    /// Page ingestion and embedding backfill
    pub ingest_service: IngestService<MovieRepository, OpenAIClient, TmdbClient>,

    /// Read-only catalog browsing
    pub catalog_service: CatalogService<TmdbClient>,

    /// Movie repository for direct database queries
    pub movie_repo: MovieRepository,
}

impl AppState {
    /// Creates a new application state with all services initialized.
    pub fn new(
        pool: sqlx::PgPool,
        embedding_client: OpenAIClient,
        catalog_client: TmdbClient,
        catalog_config: CatalogConfig,
    ) -> Self {
        let movie_repo = MovieRepository::new(pool);

        Self {
            search_service: SearchService::new(movie_repo.clone(), embedding_client.clone()),
            ingest_service: IngestService::with_config(
                movie_repo.clone(),
                embedding_client,
                catalog_client.clone(),
                catalog_config,
            ),
            catalog_service: CatalogService::new(catalog_client),
            movie_repo,
        }
    }
}

//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::dto::{
    BackfillResponse, FetchAndStoreQuery, HealthResponse, IngestResponse, MovieResponse,
    SearchHitDto, SearchQuery, ServiceStatus, StatsResponse, TextSearchHitDto,
};
use crate::handlers::{health, movies, stats};

/// OpenAPI documentation for the Reel API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reel API",
        version = "1.0.0",
        description = "Semantic search over TMDB's popular movies.

Reel ingests pages of TMDB's popular listing, stores every movie with an
OpenAI embedding of its title and overview, and ranks stored movies against
natural-language queries by cosine similarity.

## Quick Start

1. Ingest a page: `GET /movies/fetch-and-store?page=1`
2. Search: `GET /movies/semantic-search?q=uzay+macerası`
3. View statistics: `GET /stats`
",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        health::health_check,
        stats::get_stats,
        movies::popular,
        movies::grouped_by_genre,
        movies::semantic_search,
        movies::text_search,
        movies::fetch_and_store,
        movies::backfill_embeddings,
        movies::get_movie,
    ),
    components(
        schemas(
            // Request types
            SearchQuery,
            FetchAndStoreQuery,
            // Response types
            HealthResponse,
            ServiceStatus,
            StatsResponse,
            SearchHitDto,
            TextSearchHitDto,
            IngestResponse,
            BackfillResponse,
            MovieResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and statistics"),
        (name = "catalog", description = "Live TMDB browsing"),
        (name = "search", description = "Semantic search operations"),
        (name = "ingest", description = "Catalog ingestion and embedding backfill"),
        (name = "movies", description = "Stored movie retrieval"),
    )
)]
pub struct ApiDoc;

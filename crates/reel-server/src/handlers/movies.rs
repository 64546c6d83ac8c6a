//! Movie endpoints: catalog browsing, search, ingestion and lookup.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use reel_core::{AppError, CatalogMovie, GenreGroup, TracingReporter};

use crate::dto::{
    BackfillResponse, FetchAndStoreQuery, IngestResponse, MovieResponse, SearchHitDto,
    SearchQuery, TextSearchHitDto,
};
use crate::error::ApiError;
use crate::state::AppState;

/// First page of TMDB's popular movies.
///
/// Movies are returned as delivered by TMDB, nothing is stored.
#[utoipa::path(
    get,
    path = "/movies/popular",
    responses(
        (status = 200, description = "Raw TMDB movie objects"),
        (status = 500, description = "Catalog unavailable"),
    ),
    tag = "catalog"
)]
pub async fn popular(State(state): State<AppState>) -> Result<Json<Vec<CatalogMovie>>, ApiError> {
    let movies = state.catalog_service.popular_movies().await?;
    Ok(Json(movies))
}

/// Popular movies grouped by genre.
///
/// One group per TMDB genre, in genre-list order. A movie appears in every
/// group whose genre it carries.
#[utoipa::path(
    get,
    path = "/movies/grouped-by-genre",
    responses(
        (status = 200, description = "Array of {genre, movies}"),
        (status = 500, description = "Catalog unavailable"),
    ),
    tag = "catalog"
)]
pub async fn grouped_by_genre(
    State(state): State<AppState>,
) -> Result<Json<Vec<GenreGroup>>, ApiError> {
    let groups = state.catalog_service.grouped_by_genre().await?;
    Ok(Json(groups))
}

/// Semantic search over stored movies.
#[utoipa::path(
    get,
    path = "/movies/semantic-search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Up to 10 hits, best first", body = [SearchHitDto]),
        (status = 400, description = "Invalid query parameters"),
        (status = 503, description = "Embedding provider unavailable"),
    ),
    tag = "search"
)]
pub async fn semantic_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SearchHitDto>>, ApiError> {
    params.validate().map_err(ApiError::BadRequest)?;

    let hits = state.search_service.semantic_search(&params.q).await?;
    tracing::info!(query = %params.q, hits = hits.len(), "Semantic search");

    Ok(Json(hits.into_iter().map(SearchHitDto::from).collect()))
}

/// Semantic search that skips movies with Chinese, Japanese or Korean titles.
#[utoipa::path(
    get,
    path = "/movies/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Up to 10 hits, best first", body = [TextSearchHitDto]),
        (status = 400, description = "Invalid query parameters"),
        (status = 503, description = "Embedding provider unavailable"),
    ),
    tag = "search"
)]
pub async fn text_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<TextSearchHitDto>>, ApiError> {
    params.validate().map_err(ApiError::BadRequest)?;

    let hits = state.search_service.text_search(&params.q).await?;
    Ok(Json(hits.into_iter().map(TextSearchHitDto::from).collect()))
}

/// Fetches one page of popular movies and stores the new ones with embeddings.
#[utoipa::path(
    get,
    path = "/movies/fetch-and-store",
    params(FetchAndStoreQuery),
    responses(
        (status = 200, description = "Page ingested", body = IngestResponse),
        (status = 400, description = "Invalid page"),
        (status = 500, description = "Catalog or database unavailable"),
    ),
    tag = "ingest"
)]
pub async fn fetch_and_store(
    State(state): State<AppState>,
    Query(params): Query<FetchAndStoreQuery>,
) -> Result<Json<IngestResponse>, ApiError> {
    if params.page == 0 {
        return Err(ApiError::BadRequest("Page must be at least 1".to_string()));
    }

    let summary = state
        .ingest_service
        .fetch_and_store_with_progress(params.page, &TracingReporter)
        .await?;

    Ok(Json(IngestResponse::from(summary)))
}

/// Computes embeddings for stored movies that have none yet.
#[utoipa::path(
    get,
    path = "/movies/backfill-embeddings",
    responses(
        (status = 200, description = "Backfill finished", body = BackfillResponse),
        (status = 500, description = "Database unavailable"),
    ),
    tag = "ingest"
)]
pub async fn backfill_embeddings(
    State(state): State<AppState>,
) -> Result<Json<BackfillResponse>, ApiError> {
    let summary = state
        .ingest_service
        .backfill_embeddings_with_progress(&TracingReporter)
        .await?;

    Ok(Json(BackfillResponse::from(summary)))
}

/// Get a stored movie by its TMDB id.
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(
        ("id" = i64, Path, description = "TMDB movie id")
    ),
    responses(
        (status = 200, description = "Movie found", body = MovieResponse),
        (status = 404, description = "Movie not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MovieResponse>, ApiError> {
    let movie = state
        .movie_repo
        .get(id)
        .await?
        .ok_or(AppError::MovieNotFound(id))?;

    Ok(Json(MovieResponse::from(movie)))
}

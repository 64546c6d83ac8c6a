//! Response DTOs for API endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use reel_core::{BackfillSummary, IngestSummary, MovieRecord, SearchHit, StoreStats, TextSearchHit};

// =============================================================================
// Health & Stats
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("healthy" or "degraded")
    pub status: String,
    /// Server version
    pub version: String,
    /// Database connectivity status
    pub database: ServiceStatus,
}

/// Status of an individual service component.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    /// Whether the service is reachable
    pub healthy: bool,
    /// Optional message (e.g., error details)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Store statistics response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Total number of stored movies
    pub total_movies: i64,
    /// Number of movies with a non-empty embedding
    pub movies_with_embeddings: i64,
    /// Timestamp of the last write
    pub last_update: Option<DateTime<Utc>>,
}

impl From<StoreStats> for StatsResponse {
    fn from(s: StoreStats) -> Self {
        Self {
            total_movies: s.total_movies,
            movies_with_embeddings: s.movies_with_embeddings,
            last_update: s.last_update,
        }
    }
}

// =============================================================================
// Search
// =============================================================================

/// Semantic search hit.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchHitDto {
    /// TMDB movie id
    pub id: i64,
    pub title: String,
    pub overview: String,
    /// Absolute poster URL, empty if the movie has none
    pub poster_path: String,
    /// Cosine similarity to the query
    pub score: f32,
}

impl From<SearchHit> for SearchHitDto {
    fn from(h: SearchHit) -> Self {
        Self {
            id: h.id,
            title: h.title,
            overview: h.overview,
            poster_path: h.poster_path,
            score: h.score,
        }
    }
}

/// Filtered search hit.
#[derive(Debug, Serialize, ToSchema)]
pub struct TextSearchHitDto {
    pub title: String,
    pub overview: String,
    pub score: f32,
}

impl From<TextSearchHit> for TextSearchHitDto {
    fn from(h: TextSearchHit) -> Self {
        Self {
            title: h.title,
            overview: h.overview,
            score: h.score,
        }
    }
}

// =============================================================================
// Ingestion
// =============================================================================

/// Result of ingesting one catalog page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub message: String,
    /// Number of newly stored movies
    pub total_saved: usize,
}

impl From<IngestSummary> for IngestResponse {
    fn from(s: IngestSummary) -> Self {
        Self {
            message: s.message(),
            total_saved: s.total_saved,
        }
    }
}

/// Result of an embedding backfill run.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackfillResponse {
    pub message: String,
    /// Number of movies that received an embedding
    pub total_updated: usize,
    /// Number of movies that could not be embedded
    pub failed: usize,
}

impl From<BackfillSummary> for BackfillResponse {
    fn from(s: BackfillSummary) -> Self {
        Self {
            message: s.message(),
            total_updated: s.total_updated,
            failed: s.failed,
        }
    }
}

// =============================================================================
// Movies
// =============================================================================

/// Stored movie, without its embedding vector.
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieResponse {
    /// TMDB movie id
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: String,
    pub release_date: String,
    pub vote_average: f64,
    /// Whether an embedding is stored for this movie
    pub has_embedding: bool,
    pub first_seen_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MovieRecord> for MovieResponse {
    fn from(m: MovieRecord) -> Self {
        Self {
            has_embedding: m.has_embedding(),
            id: m.external_id,
            title: m.title,
            overview: m.overview,
            poster_path: m.poster_path,
            release_date: m.release_date,
            vote_average: m.vote_average,
            first_seen_at: m.first_seen_at,
            updated_at: m.updated_at,
        }
    }
}

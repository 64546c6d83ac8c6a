//! Domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A movie persisted in the store.
///
/// `embedding` is either empty (not computed yet) or has the dimension of
/// the configured embedding model. Once populated it is never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovieRecord {
    /// Identifier assigned by the upstream catalog. Unique.
    pub external_id: i64,
    pub title: String,
    pub overview: String,
    /// Absolute image URL.
    pub poster_path: String,
    pub release_date: String,
    pub vote_average: f64,
    pub embedding: Vec<f32>,
    pub first_seen_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MovieRecord {
    /// Returns true once an embedding has been stored for this movie.
    pub fn has_embedding(&self) -> bool {
        !self.embedding.is_empty()
    }

    /// Text fed to the embedding provider for this movie.
    pub fn embedding_text(&self) -> String {
        embedding_text(&self.title, &self.overview)
    }
}

/// Insert shape for a movie that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub external_id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: String,
    pub release_date: String,
    pub vote_average: f64,
    pub embedding: Vec<f32>,
}

/// Builds the text that is embedded for a movie: title and overview joined by a space.
pub fn embedding_text(title: &str, overview: &str) -> String {
    format!("{} {}", title, overview)
}

/// A movie as returned by the catalog API.
///
/// The fields Reel relies on are typed; every other field of the upstream
/// object is kept in `extras` so the object can be handed back verbatim.
///
/// # Examples
///
/// ```
/// use reel_core::CatalogMovie;
///
/// let json = r#"{
///     "id": 550,
///     "title": "Fight Club",
///     "overview": "An insomniac office worker...",
///     "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
///     "release_date": "1999-10-15",
///     "vote_average": 8.4,
///     "genre_ids": [18, 53],
///     "adult": false
/// }"#;
///
/// let movie: CatalogMovie = serde_json::from_str(json).unwrap();
/// assert_eq!(movie.id, 550);
/// assert!(movie.has_genre(53));
/// assert!(movie.extras.contains_key("adult"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMovie {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    /// All other fields returned by the catalog (e.g. popularity, adult, backdrop_path).
    #[serde(flatten)]
    pub extras: serde_json::Map<String, Value>,
}

impl CatalogMovie {
    /// Returns true if the movie is tagged with the given genre.
    pub fn has_genre(&self, genre_id: i64) -> bool {
        self.genre_ids.contains(&genre_id)
    }

    /// Text fed to the embedding provider for this movie.
    pub fn embedding_text(&self) -> String {
        embedding_text(&self.title, &self.overview)
    }
}

/// A catalog genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Popular movies belonging to one genre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreGroup {
    #[serde(skip_serializing)]
    pub genre_id: i64,
    /// Genre display name.
    pub genre: String,
    pub movies: Vec<CatalogMovie>,
}

/// A ranked semantic search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: String,
    pub score: f32,
}

/// A ranked result of the script-filtered text search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSearchHit {
    pub title: String,
    pub overview: String,
    pub score: f32,
}

/// Outcome of ingesting one catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub page: u32,
    /// Newly created records.
    pub total_saved: usize,
    /// Movies already present in the store.
    pub skipped: usize,
    /// Movies whose embedding or insert failed.
    pub failed: usize,
}

impl IngestSummary {
    /// Human-readable completion message.
    pub fn message(&self) -> String {
        format!("Page {} movies saved successfully!", self.page)
    }

    /// Number of catalog movies looked at.
    pub fn total(&self) -> usize {
        self.total_saved + self.skipped + self.failed
    }
}

/// Outcome of an embedding backfill run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    /// Records whose empty embedding was filled.
    pub total_updated: usize,
    /// Records that already had an embedding.
    pub already_embedded: usize,
    pub failed: usize,
}

impl BackfillSummary {
    /// Human-readable completion message.
    pub fn message(&self) -> String {
        if self.failed == 0 {
            "Embeddings generated for all movies!".to_string()
        } else {
            format!(
                "Embeddings generated, {} movie(s) could not be embedded",
                self.failed
            )
        }
    }
}

/// Aggregated store statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStats {
    pub total_movies: i64,
    pub movies_with_embeddings: i64,
    pub last_update: Option<DateTime<Utc>>,
}

//! Search service for semantic movie queries.
//!
//! Ranking happens in process: the query is embedded once, every stored
//! movie is scored with [`cosine_similarity`](crate::similarity::cosine_similarity)
//! and the best hits are returned.

use crate::similarity::rank;
use crate::traits::{EmbeddingProvider, MovieStore, require_embedding};
use crate::{AppError, MovieRecord, SearchConfig, SearchHit, TextSearchHit};

/// Service for semantic search operations.
///
/// This service encapsulates the search business logic, coordinating between
/// the embedding provider and the movie store.
///
/// # Type Parameters
///
/// * `S` - Movie store implementation (e.g., `MovieRepository`)
/// * `E` - Embedding provider implementation (e.g., `OpenAIClient`)
///
/// # Example
///
/// ```ignore
/// use reel_core::search::SearchService;
///
/// let search_service = SearchService::new(repo, openai);
/// let hits = search_service.semantic_search("space opera with robots").await?;
///
/// for hit in hits {
///     println!("{}: {:.2}", hit.title, hit.score);
/// }
/// ```
pub struct SearchService<S, E>
where
    S: MovieStore,
    E: EmbeddingProvider,
{
    store: S,
    embedding: E,
    config: SearchConfig,
}

impl<S, E> Clone for SearchService<S, E>
where
    S: MovieStore + Clone,
    E: EmbeddingProvider + Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            embedding: self.embedding.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, E> SearchService<S, E>
where
    S: MovieStore,
    E: EmbeddingProvider,
{
    /// Creates a new search service returning at most 10 hits.
    ///
    /// # Arguments
    ///
    /// * `store` - Movie store holding the embeddings
    /// * `embedding` - Embedding provider for generating query embeddings
    pub fn new(store: S, embedding: E) -> Self {
        Self::with_config(store, embedding, SearchConfig::default())
    }

    /// Creates a search service with custom configuration.
    pub fn with_config(store: S, embedding: E, config: SearchConfig) -> Self {
        Self {
            store,
            embedding,
            config,
        }
    }

    /// Performs semantic search and returns ranked hits.
    ///
    /// This method:
    /// 1. Generates an embedding vector from the query text
    /// 2. Loads every stored movie
    /// 3. Scores each one by cosine similarity and keeps the best hits,
    ///    highest first (ties keep store order)
    ///
    /// # Errors
    ///
    /// Returns `AppError::EmbeddingUnavailable` if the provider fails or
    /// returns an empty vector, and `AppError::DatabaseError` if the store
    /// cannot be read.
    pub async fn semantic_search(&self, query: &str) -> Result<Vec<SearchHit>, AppError> {
        let query_vector = require_embedding(&self.embedding, query).await?;
        let movies = self.store.find_all().await?;

        let ranked = rank(
            &query_vector,
            movies.into_iter().map(split_embedding),
            self.config.limit,
        );

        Ok(ranked
            .into_iter()
            .map(|(movie, score)| SearchHit {
                id: movie.external_id,
                title: movie.title,
                overview: movie.overview,
                poster_path: movie.poster_path,
                score,
            })
            .collect())
    }

    /// Semantic search restricted to titles written without CJK characters.
    ///
    /// Movies whose title contains a Han, Hiragana, Katakana or Hangul
    /// character are excluded before scoring.
    ///
    /// # Errors
    ///
    /// Same as [`semantic_search`](Self::semantic_search).
    pub async fn text_search(&self, query: &str) -> Result<Vec<TextSearchHit>, AppError> {
        let query_vector = require_embedding(&self.embedding, query).await?;
        let movies = self.store.find_all().await?;

        let candidates = movies
            .into_iter()
            .filter(|movie| !contains_cjk(&movie.title))
            .map(split_embedding);

        Ok(rank(&query_vector, candidates, self.config.limit)
            .into_iter()
            .map(|(movie, score)| TextSearchHit {
                title: movie.title,
                overview: movie.overview,
                score,
            })
            .collect())
    }
}

fn split_embedding(mut movie: MovieRecord) -> (MovieRecord, Vec<f32>) {
    let embedding = std::mem::take(&mut movie.embedding);
    (movie, embedding)
}

/// Returns true if `text` contains a Han, Hiragana, Katakana or Hangul character.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

fn is_cjk_char(c: char) -> bool {
    matches!(c,
        // Han
        '\u{2E80}'..='\u{2FDF}'
        | '\u{3005}' | '\u{3007}' | '\u{3021}'..='\u{3029}' | '\u{3038}'..='\u{303B}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{3134F}'
        // Hiragana
        | '\u{3041}'..='\u{309F}'
        | '\u{1B001}'..='\u{1B11F}'
        // Katakana
        | '\u{30A0}'..='\u{30FF}'
        | '\u{31F0}'..='\u{31FF}'
        | '\u{32D0}'..='\u{32FE}'
        | '\u{3300}'..='\u{3357}'
        | '\u{FF66}'..='\u{FF9D}'
        // Hangul
        | '\u{1100}'..='\u{11FF}'
        | '\u{3131}'..='\u{318E}'
        | '\u{A960}'..='\u{A97F}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{D7B0}'..='\u{D7FF}'
        | '\u{FFA0}'..='\u{FFDC}'
    )
}

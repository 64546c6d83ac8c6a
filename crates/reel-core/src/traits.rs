//! Trait definitions for external dependencies.
//!
//! This module defines traits that abstract over external dependencies
//! (embedding provider, movie catalog, movie store), enabling:
//!
//! - **Testability**: Mock implementations for unit testing
//! - **Flexibility**: Different backend implementations
//! - **Decoupling**: Core business logic doesn't depend on specific implementations
//!
//! # Example
//!
//! ```
//! use reel_core::traits::{EmbeddingProvider, MovieStore};
//! use reel_core::similarity::cosine_similarity;
//!
//! // Business logic uses traits, not concrete types
//! async fn best_match<E, S>(
//!     embedding: &E,
//!     store: &S,
//!     query: &str,
//! ) -> Result<Option<String>, reel_core::AppError>
//! where
//!     E: EmbeddingProvider,
//!     S: MovieStore,
//! {
//!     let vector = embedding.generate(query).await?;
//!     let movies = store.find_all().await?;
//!     Ok(movies
//!         .into_iter()
//!         .max_by(|a, b| {
//!             cosine_similarity(&vector, &a.embedding)
//!                 .total_cmp(&cosine_similarity(&vector, &b.embedding))
//!         })
//!         .map(|m| m.title))
//! }
//! ```

use std::future::Future;

use crate::{AppError, CatalogMovie, Genre, MovieRecord, NewMovie, StoreStats};

/// Provider for generating text embeddings.
///
/// Implementations convert text into vector representations for semantic search.
pub trait EmbeddingProvider: Send + Sync + Clone {
    /// Short provider name for logging (e.g. "openai").
    fn name(&self) -> &'static str;

    /// Dimension of the vectors produced by the configured model.
    fn dimension(&self) -> usize;

    /// Generates an embedding vector for the given text.
    ///
    /// Callers treat an empty vector the same way as an error.
    fn generate(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, AppError>> + Send;
}

/// Client for the upstream movie catalog.
pub trait CatalogClient: Send + Sync + Clone {
    /// Fetches one page of the popular-movies listing.
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number
    fn popular_movies(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<Vec<CatalogMovie>, AppError>> + Send;

    /// Fetches the movie genre list.
    fn genres(&self) -> impl Future<Output = Result<Vec<Genre>, AppError>> + Send;
}

/// Store for movie persistence and retrieval.
pub trait MovieStore: Send + Sync + Clone {
    /// Looks up a movie by its catalog id.
    fn find_by_id(
        &self,
        external_id: i64,
    ) -> impl Future<Output = Result<Option<MovieRecord>, AppError>> + Send;

    /// Returns every stored movie in retrieval order (first seen, then id).
    fn find_all(&self) -> impl Future<Output = Result<Vec<MovieRecord>, AppError>> + Send;

    /// Inserts a new movie.
    ///
    /// # Returns
    ///
    /// `true` if a row was created, `false` if a movie with the same
    /// external id already existed (the existing row is left untouched).
    fn create(&self, movie: &NewMovie) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// Stores an embedding for a movie whose embedding is still empty.
    ///
    /// # Returns
    ///
    /// `true` if the row was updated, `false` if the movie does not exist
    /// or already has an embedding.
    fn set_embedding_if_empty(
        &self,
        external_id: i64,
        embedding: &[f32],
    ) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// Returns aggregated store statistics.
    fn stats(&self) -> impl Future<Output = Result<StoreStats, AppError>> + Send;

    /// Checks that the store is reachable.
    fn health_check(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Generates an embedding, treating both provider errors and empty vectors
/// as `AppError::EmbeddingUnavailable`.
pub(crate) async fn require_embedding<E: EmbeddingProvider>(
    provider: &E,
    text: &str,
) -> Result<Vec<f32>, AppError> {
    let vector = provider.generate(text).await.map_err(|e| match e {
        AppError::EmbeddingUnavailable(_) => e,
        other => AppError::EmbeddingUnavailable(other.to_string()),
    })?;

    if vector.is_empty() {
        return Err(AppError::EmbeddingUnavailable(format!(
            "{} returned an empty embedding",
            provider.name()
        )));
    }

    Ok(vector)
}

//! Ingestion service: catalog page → embeddings → store.
//!
//! # Architecture
//!
//! The [`IngestService`] is generic over three traits:
//! - [`MovieStore`] - for persistence
//! - [`EmbeddingProvider`] - for generating embeddings
//! - [`CatalogClient`] - for fetching catalog pages
//!
//! # Failure isolation
//!
//! Movies are processed one at a time, in catalog order. A failing
//! embedding or insert is reported and counted, and processing moves on to
//! the next movie. Only a failing catalog call or a failing existence lookup
//! aborts the run.
//!
//! # Idempotency
//!
//! Existing external ids are skipped before any embedding is requested, so
//! re-ingesting a page whose catalog response is unchanged saves nothing.
//! Stored embeddings are never recomputed; [`IngestService::backfill_embeddings`]
//! only fills embeddings that are still empty.

use crate::progress::{IngestEvent, ProgressReporter, SilentReporter};
use crate::traits::{CatalogClient, EmbeddingProvider, MovieStore, require_embedding};
use crate::{
    AppError, BackfillSummary, CatalogConfig, CatalogMovie, IngestSummary, MovieRecord, NewMovie,
};

/// Service for ingesting catalog pages into the movie store.
///
/// # Type Parameters
///
/// * `S` - Movie store implementation (e.g., `MovieRepository`)
/// * `E` - Embedding provider implementation (e.g., `OpenAIClient`)
/// * `C` - Catalog client implementation (e.g., `TmdbClient`)
///
/// # Example
///
/// ```ignore
/// use reel_core::ingest::IngestService;
///
/// let ingest = IngestService::new(repo, openai, tmdb);
/// let summary = ingest.fetch_and_store(1).await?;
/// println!("{} ({} saved)", summary.message(), summary.total_saved);
/// ```
pub struct IngestService<S, E, C>
where
    S: MovieStore,
    E: EmbeddingProvider,
    C: CatalogClient,
{
    store: S,
    embedding: E,
    catalog: C,
    config: CatalogConfig,
}

impl<S, E, C> Clone for IngestService<S, E, C>
where
    S: MovieStore + Clone,
    E: EmbeddingProvider + Clone,
    C: CatalogClient + Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            embedding: self.embedding.clone(),
            catalog: self.catalog.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, E, C> IngestService<S, E, C>
where
    S: MovieStore,
    E: EmbeddingProvider,
    C: CatalogClient,
{
    /// Creates a new ingestion service with default catalog configuration.
    pub fn new(store: S, embedding: E, catalog: C) -> Self {
        Self::with_config(store, embedding, catalog, CatalogConfig::default())
    }

    /// Creates an ingestion service with custom catalog configuration.
    ///
    /// Only `image_base_url` is used here; the language and API root are
    /// properties of the catalog client.
    pub fn with_config(store: S, embedding: E, catalog: C, config: CatalogConfig) -> Self {
        Self {
            store,
            embedding,
            catalog,
            config,
        }
    }

    /// Fetches one catalog page and stores every movie not seen before.
    pub async fn fetch_and_store(&self, page: u32) -> Result<IngestSummary, AppError> {
        self.fetch_and_store_with_progress(page, &SilentReporter).await
    }

    /// Fetches one catalog page and stores every movie not seen before,
    /// reporting progress through `reporter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog page cannot be fetched or the store
    /// lookup fails. Per-movie embedding and insert failures are counted in
    /// the summary instead.
    pub async fn fetch_and_store_with_progress<R: ProgressReporter>(
        &self,
        page: u32,
        reporter: &R,
    ) -> Result<IngestSummary, AppError> {
        let movies = self.catalog.popular_movies(page).await?;
        reporter.report(IngestEvent::PageFetched {
            page,
            count: movies.len(),
        });

        let mut summary = IngestSummary {
            page,
            ..Default::default()
        };

        for movie in &movies {
            if self.store.find_by_id(movie.id).await?.is_some() {
                summary.skipped += 1;
                reporter.report(IngestEvent::MovieSkipped {
                    id: movie.id,
                    title: &movie.title,
                });
                continue;
            }

            match self.store_movie(movie).await {
                Ok(true) => {
                    summary.total_saved += 1;
                    reporter.report(IngestEvent::MovieSaved {
                        id: movie.id,
                        title: &movie.title,
                    });
                }
                Ok(false) => {
                    // Inserted concurrently by another writer between lookup and insert.
                    summary.skipped += 1;
                    reporter.report(IngestEvent::MovieSkipped {
                        id: movie.id,
                        title: &movie.title,
                    });
                }
                Err(e) => {
                    summary.failed += 1;
                    let error = e.to_string();
                    reporter.report(IngestEvent::MovieFailed {
                        id: movie.id,
                        title: &movie.title,
                        error: &error,
                    });
                }
            }
        }

        reporter.report(IngestEvent::IngestCompleted { summary: &summary });
        Ok(summary)
    }

    /// Computes embeddings for stored movies whose embedding is empty.
    pub async fn backfill_embeddings(&self) -> Result<BackfillSummary, AppError> {
        self.backfill_embeddings_with_progress(&SilentReporter).await
    }

    /// Computes embeddings for stored movies whose embedding is empty,
    /// reporting progress through `reporter`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be listed. Per-movie
    /// failures are counted in the summary.
    pub async fn backfill_embeddings_with_progress<R: ProgressReporter>(
        &self,
        reporter: &R,
    ) -> Result<BackfillSummary, AppError> {
        let movies = self.store.find_all().await?;
        let mut summary = BackfillSummary::default();

        for movie in &movies {
            if movie.has_embedding() {
                summary.already_embedded += 1;
                continue;
            }

            match self.backfill_movie(movie).await {
                Ok(true) => {
                    summary.total_updated += 1;
                    reporter.report(IngestEvent::EmbeddingBackfilled {
                        id: movie.external_id,
                        title: &movie.title,
                    });
                }
                Ok(false) => summary.already_embedded += 1,
                Err(e) => {
                    summary.failed += 1;
                    let error = e.to_string();
                    reporter.report(IngestEvent::MovieFailed {
                        id: movie.external_id,
                        title: &movie.title,
                        error: &error,
                    });
                }
            }
        }

        reporter.report(IngestEvent::BackfillCompleted { summary: &summary });
        Ok(summary)
    }

    /// Embeds `text` for storage; the vector must match the provider's dimension.
    async fn embed_for_storage(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let embedding = require_embedding(&self.embedding, text).await?;
        let expected = self.embedding.dimension();
        if embedding.len() != expected {
            return Err(AppError::EmbeddingUnavailable(format!(
                "{} returned {} dimensions, expected {}",
                self.embedding.name(),
                embedding.len(),
                expected
            )));
        }
        Ok(embedding)
    }

    async fn backfill_movie(&self, movie: &MovieRecord) -> Result<bool, AppError> {
        let embedding = self.embed_for_storage(&movie.embedding_text()).await?;
        self.store
            .set_embedding_if_empty(movie.external_id, &embedding)
            .await
    }

    async fn store_movie(&self, movie: &CatalogMovie) -> Result<bool, AppError> {
        let embedding = self.embed_for_storage(&movie.embedding_text()).await?;
        let new_movie = self.to_new_movie(movie, embedding);
        self.store.create(&new_movie).await
    }

    fn to_new_movie(&self, movie: &CatalogMovie, embedding: Vec<f32>) -> NewMovie {
        NewMovie {
            external_id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            poster_path: self.config.poster_url(movie.poster_path.as_deref()),
            release_date: movie.release_date.clone().unwrap_or_default(),
            vote_average: movie.vote_average,
            embedding,
        }
    }
}

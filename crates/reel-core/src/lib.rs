//! Reel Core - Domain types, business logic, and services.
//!
//! This crate provides the core functionality for Reel, including:
//!
//! - **Domain models**: [`MovieRecord`], [`CatalogMovie`], [`SearchHit`], [`GenreGroup`], etc.
//! - **Ranking**: [`similarity::cosine_similarity`] and top-k ranking
//! - **Services**: [`IngestService`] for catalog ingestion and embedding backfill,
//!   [`SearchService`] for semantic search, [`CatalogService`] for browsing
//! - **Traits**: [`EmbeddingProvider`], [`MovieStore`], [`CatalogClient`] for dependency injection
//! - **Progress reporting**: [`ProgressReporter`] trait for decoupled logging/UI
//!
//! # Architecture
//!
//! This crate is designed to be reusable by different frontends (CLI, server, etc.).
//! Business logic is decoupled from I/O concerns through traits:
//!
//! - [`EmbeddingProvider`] - abstracts embedding generation (e.g., OpenAI API)
//! - [`MovieStore`] - abstracts persistence (e.g., PostgreSQL)
//! - [`CatalogClient`] - abstracts the movie catalog (e.g., TMDB API)
//!
//! # Example
//!
//! ```ignore
//! use reel_core::{IngestService, SearchService, TracingReporter};
//!
//! let ingest = IngestService::new(store.clone(), embedding.clone(), catalog);
//! let summary = ingest.fetch_and_store_with_progress(1, &TracingReporter).await?;
//!
//! let search = SearchService::new(store, embedding);
//! let hits = search.semantic_search("heist thriller").await?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod progress;
pub mod search;
pub mod similarity;
pub mod traits;

// Configuration
pub use config::{CatalogConfig, DbConfig, HttpConfig, SearchConfig};

// Error handling
pub use error::AppError;

// Domain models
pub use models::{
    BackfillSummary, CatalogMovie, Genre, GenreGroup, IngestSummary, MovieRecord, NewMovie,
    SearchHit, StoreStats, TextSearchHit,
};

// Progress reporting
pub use progress::{IngestEvent, ProgressReporter, SilentReporter, TracingReporter};

// Traits for dependency injection
pub use traits::{CatalogClient, EmbeddingProvider, MovieStore};

// Services (generic over trait implementations)
pub use catalog::CatalogService;
pub use ingest::IngestService;
pub use search::SearchService;

//! Reel Server - REST API for Reel semantic movie search
//!
//! This crate provides an HTTP API for accessing Reel functionality:
//!
//! - **Catalog**: Live popular listing and genre grouping from TMDB
//! - **Search**: Semantic search across stored movies
//! - **Ingest**: Page ingestion and embedding backfill
//!
//! # API Documentation
//!
//! When running the server, interactive API documentation is available
//! at `/swagger-ui`.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;

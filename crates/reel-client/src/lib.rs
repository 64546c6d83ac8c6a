//! Reel Client - HTTP clients for external APIs
//!
//! This crate provides HTTP clients for interacting with:
//!
//! - [`tmdb`] - TMDB movie catalog (popular listing, genre list)
//! - [`openai`] - OpenAI embeddings API
//!
//! Both clients make a single attempt per request, bounded by the
//! timeout from [`reel_core::HttpConfig`].

pub mod openai;
pub mod tmdb;

// Re-export main client types
pub use openai::OpenAIClient;
pub use tmdb::TmdbClient;

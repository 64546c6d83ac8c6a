//! Reel DB - Database repository layer for PostgreSQL
//!
//! This crate provides the repository pattern for movie persistence.
//! Embeddings are plain `REAL[]` columns; similarity ranking happens in
//! `reel-core`.
//!
//! # Overview
//!
//! The main components are:
//! - [`MovieRepository`] - Movie persistence, implementing `MovieStore`
//! - [`apply_schema`] - Idempotent creation of the `movies` table

mod repository;
pub mod schema;

pub use repository::MovieRepository;
pub use schema::apply_schema;

//! HTTP request handlers for API endpoints.

pub mod health;
pub mod movies;
pub mod stats;

//! Request DTOs for API endpoints.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Maximum allowed search query length.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 2000;

/// Query parameters for semantic and filtered search.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SearchQuery {
    /// The search query text (max: 2000 characters)
    #[param(example = "uzayda geçen bilim kurgu")]
    pub q: String,
}

impl SearchQuery {
    /// Rejects blank and oversized queries.
    pub fn validate(&self) -> Result<(), String> {
        if self.q.trim().is_empty() {
            return Err("Query cannot be empty".to_string());
        }
        if self.q.len() > MAX_SEARCH_QUERY_LENGTH {
            return Err(format!(
                "Query exceeds maximum length of {} characters",
                MAX_SEARCH_QUERY_LENGTH
            ));
        }
        Ok(())
    }
}

/// Query parameters for page ingestion.
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct FetchAndStoreQuery {
    /// Catalog page to ingest, starting at 1 (default: 1)
    #[serde(default = "default_page")]
    #[param(example = 1)]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

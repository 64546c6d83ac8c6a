//! Database schema for the `movies` table.
//!
//! Embeddings are stored as `REAL[]`. A movie that has not been embedded yet
//! carries an empty array, and arrays of different lengths may coexist.

use reel_core::error::AppError;
use sqlx::PgPool;

/// Schema statements, applied in order. Every statement is idempotent.
///
/// Each statement must be executed separately due to sqlx limitations.
pub const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS movies (
        external_id BIGINT PRIMARY KEY,
        title TEXT NOT NULL DEFAULT '',
        overview TEXT NOT NULL DEFAULT '',
        poster_path TEXT NOT NULL DEFAULT '',
        release_date TEXT NOT NULL DEFAULT '',
        vote_average DOUBLE PRECISION NOT NULL DEFAULT 0,
        embedding REAL[] NOT NULL DEFAULT '{}',
        first_seen_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_movies_first_seen ON movies (first_seen_at, external_id)",
];

/// Creates the `movies` table and its index if they do not exist.
pub async fn apply_schema(pool: &PgPool) -> Result<(), AppError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(AppError::DatabaseError)?;
    }
    tracing::info!(statements = SCHEMA.len(), "Database schema applied");
    Ok(())
}

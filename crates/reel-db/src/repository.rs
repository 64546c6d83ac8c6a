//! Movie repository for PostgreSQL.

use chrono::{DateTime, Utc};
use reel_core::error::AppError;
use reel_core::models::{MovieRecord, NewMovie, StoreStats};
use sqlx::{PgPool, Pool, Postgres};

/// Column list for SELECT queries.
const MOVIE_COLUMNS: &str = "external_id, title, overview, poster_path, release_date, vote_average, embedding, first_seen_at, updated_at";

/// Repository for movie persistence in PostgreSQL.
///
/// # Examples
///
/// ```no_run
/// use sqlx::postgres::PgPoolOptions;
/// use reel_db::MovieRepository;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = PgPoolOptions::new()
///     .max_connections(5)
///     .connect("postgresql://localhost/reel")
///     .await?;
///
/// let repo = MovieRepository::new(pool);
/// let stats = repo.get_stats().await?;
/// println!("{} movies stored", stats.total_movies);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MovieRepository {
    pool: Pool<Postgres>,
}

impl MovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a movie unless one with the same external id exists.
    ///
    /// Returns `true` if a row was created. An existing row is never
    /// modified.
    pub async fn insert(&self, movie: &NewMovie) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO movies (
                external_id,
                title,
                overview,
                poster_path,
                release_date,
                vote_average,
                embedding
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (external_id) DO NOTHING
            "#,
        )
        .bind(movie.external_id)
        .bind(&movie.title)
        .bind(&movie.overview)
        .bind(&movie.poster_path)
        .bind(&movie.release_date)
        .bind(movie.vote_average)
        .bind(&movie.embedding)
        .execute(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        Ok(result.rows_affected() == 1)
    }

    /// Retrieves a movie by its catalog id.
    pub async fn get(&self, external_id: i64) -> Result<Option<MovieRecord>, AppError> {
        let query = format!("SELECT {} FROM movies WHERE external_id = $1", MOVIE_COLUMNS);
        sqlx::query_as::<_, MovieRecord>(&query)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Lists every movie, oldest first; ties are broken by external id.
    pub async fn list_all(&self) -> Result<Vec<MovieRecord>, AppError> {
        let query = format!(
            "SELECT {} FROM movies ORDER BY first_seen_at ASC, external_id ASC",
            MOVIE_COLUMNS
        );
        sqlx::query_as::<_, MovieRecord>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Sets the embedding of a movie whose stored embedding is empty.
    ///
    /// Returns `true` if a row was updated.
    pub async fn update_embedding_if_empty(
        &self,
        external_id: i64,
        embedding: &[f32],
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET embedding = $2, updated_at = NOW()
            WHERE external_id = $1 AND cardinality(embedding) = 0
            "#,
        )
        .bind(external_id)
        .bind(embedding)
        .execute(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        Ok(result.rows_affected() == 1)
    }

    /// Checks database connectivity by executing a simple query.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;
        Ok(())
    }

    /// Returns movie counts and the most recent write time.
    pub async fn get_stats(&self) -> Result<StoreStats, AppError> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE cardinality(embedding) > 0) as with_embeddings,
                MAX(updated_at) as last_update
            FROM movies
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::DatabaseError)?;

        Ok(StoreStats {
            total_movies: row.total.unwrap_or(0),
            movies_with_embeddings: row.with_embeddings.unwrap_or(0),
            last_update: row.last_update,
        })
    }
}

/// Helper struct for deserializing stats query results
#[derive(sqlx::FromRow)]
struct StatsRow {
    total: Option<i64>,
    with_embeddings: Option<i64>,
    last_update: Option<DateTime<Utc>>,
}

// =============================================================================
// Trait Implementation: MovieStore
// =============================================================================

impl reel_core::traits::MovieStore for MovieRepository {
    async fn find_by_id(&self, external_id: i64) -> Result<Option<MovieRecord>, AppError> {
        MovieRepository::get(self, external_id).await
    }

    async fn find_all(&self) -> Result<Vec<MovieRecord>, AppError> {
        MovieRepository::list_all(self).await
    }

    async fn create(&self, movie: &NewMovie) -> Result<bool, AppError> {
        MovieRepository::insert(self, movie).await
    }

    async fn set_embedding_if_empty(
        &self,
        external_id: i64,
        embedding: &[f32],
    ) -> Result<bool, AppError> {
        MovieRepository::update_embedding_if_empty(self, external_id, embedding).await
    }

    async fn stats(&self) -> Result<StoreStats, AppError> {
        MovieRepository::get_stats(self).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        MovieRepository::health_check(self).await
    }
}

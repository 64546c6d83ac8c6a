//! Catalog browsing: popular listing and grouping by genre.

use crate::traits::CatalogClient;
use crate::{AppError, CatalogMovie, Genre, GenreGroup};

/// Page of the popular listing used for browsing.
const BROWSE_PAGE: u32 = 1;

/// Service for read-only catalog browsing.
///
/// Nothing is stored: every call goes to the catalog.
#[derive(Clone)]
pub struct CatalogService<C>
where
    C: CatalogClient,
{
    catalog: C,
}

impl<C> CatalogService<C>
where
    C: CatalogClient,
{
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Returns the first page of popular movies as delivered by the catalog.
    pub async fn popular_movies(&self) -> Result<Vec<CatalogMovie>, AppError> {
        self.catalog.popular_movies(BROWSE_PAGE).await
    }

    /// Groups the first page of popular movies by genre.
    ///
    /// The popular page and the genre list are fetched once each.
    pub async fn grouped_by_genre(&self) -> Result<Vec<GenreGroup>, AppError> {
        let movies = self.catalog.popular_movies(BROWSE_PAGE).await?;
        let genres = self.catalog.genres().await?;
        Ok(group_by_genre(&genres, &movies))
    }
}

/// Builds one group per genre, in genre-list order.
///
/// A movie is placed in every group whose genre id it carries, so it can
/// appear several times. Genres without movies get an empty group.
///
/// # Examples
///
/// ```
/// use reel_core::catalog::group_by_genre;
/// use reel_core::{CatalogMovie, Genre};
///
/// let genres = vec![
///     Genre { id: 28, name: "Action".into() },
///     Genre { id: 99, name: "Documentary".into() },
/// ];
/// let movie: CatalogMovie =
///     serde_json::from_str(r#"{"id": 1, "title": "Heat", "genre_ids": [28, 80]}"#).unwrap();
///
/// let groups = group_by_genre(&genres, &[movie]);
/// assert_eq!(groups[0].movies.len(), 1);
/// assert!(groups[1].movies.is_empty());
/// ```
pub fn group_by_genre(genres: &[Genre], movies: &[CatalogMovie]) -> Vec<GenreGroup> {
    genres
        .iter()
        .map(|genre| GenreGroup {
            genre_id: genre.id,
            genre: genre.name.clone(),
            movies: movies
                .iter()
                .filter(|movie| movie.has_genre(genre.id))
                .cloned()
                .collect(),
        })
        .collect()
}

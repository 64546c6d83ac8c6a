//! Integration tests for MovieRepository.
//!
//! These tests verify the repository layer against a real PostgreSQL
//! database. Each test runs in an isolated container.

use reel_core::models::NewMovie;
use reel_core::traits::MovieStore;
use reel_db::MovieRepository;

use crate::integration::common::{random_vector, sample_movie, setup_test_db};

#[tokio::test]
async fn test_insert_new_movie() {
    let (pool, _container) = setup_test_db().await;
    let repo = MovieRepository::new(pool);

    let movie = sample_movie(550, "Dövüş Kulübü");
    let created = repo.insert(&movie).await.expect("insert should succeed");
    assert!(created, "first insert should create a row");

    let stored = repo
        .get(550)
        .await
        .expect("get should succeed")
        .expect("movie should exist");

    assert_eq!(stored.title, "Dövüş Kulübü");
    assert_eq!(stored.overview, movie.overview);
    assert_eq!(stored.poster_path, movie.poster_path);
    assert_eq!(stored.release_date, "2024-05-01");
    assert_eq!(stored.embedding, vec![0.1, 0.2, 0.3]);
    assert!(stored.first_seen_at <= stored.updated_at);
}

#[tokio::test]
async fn test_insert_existing_id_leaves_row_untouched() {
    let (pool, _container) = setup_test_db().await;
    let repo = MovieRepository::new(pool);

    repo.insert(&sample_movie(1, "Original")).await.unwrap();
    let duplicate = NewMovie {
        title: "Changed".to_string(),
        embedding: vec![9.0],
        ..sample_movie(1, "Changed")
    };
    let created = repo.insert(&duplicate).await.unwrap();

    assert!(!created, "duplicate insert must report no row created");
    let stored = repo.get(1).await.unwrap().unwrap();
    assert_eq!(stored.title, "Original");
    assert_eq!(stored.embedding, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn test_get_missing_movie_returns_none() {
    let (pool, _container) = setup_test_db().await;
    let repo = MovieRepository::new(pool);

    assert!(repo.get(404).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all_in_first_seen_order() {
    let (pool, _container) = setup_test_db().await;
    let repo = MovieRepository::new(pool);

    for id in [30, 10, 20] {
        repo.insert(&sample_movie(id, &format!("Movie {}", id)))
            .await
            .unwrap();
    }

    let ids: Vec<i64> = repo
        .list_all()
        .await
        .unwrap()
        .iter()
        .map(|m| m.external_id)
        .collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

#[tokio::test]
async fn test_vectors_of_different_lengths_coexist() {
    let (pool, _container) = setup_test_db().await;
    let repo = MovieRepository::new(pool);

    let short = NewMovie {
        embedding: random_vector(4),
        ..sample_movie(1, "Short")
    };
    let long = NewMovie {
        embedding: random_vector(1536),
        ..sample_movie(2, "Long")
    };
    repo.insert(&short).await.unwrap();
    repo.insert(&long).await.unwrap();

    assert_eq!(repo.get(1).await.unwrap().unwrap().embedding.len(), 4);
    assert_eq!(repo.get(2).await.unwrap().unwrap().embedding.len(), 1536);
}

#[tokio::test]
async fn test_update_embedding_only_when_empty() {
    let (pool, _container) = setup_test_db().await;
    let repo = MovieRepository::new(pool);

    let pending = NewMovie {
        embedding: Vec::new(),
        ..sample_movie(1, "Pending")
    };
    repo.insert(&pending).await.unwrap();
    repo.insert(&sample_movie(2, "Embedded")).await.unwrap();

    assert!(repo.update_embedding_if_empty(1, &[0.5, 0.5]).await.unwrap());
    assert!(!repo.update_embedding_if_empty(2, &[0.5, 0.5]).await.unwrap());
    assert!(!repo.update_embedding_if_empty(3, &[0.5, 0.5]).await.unwrap());

    assert_eq!(repo.get(1).await.unwrap().unwrap().embedding, vec![0.5, 0.5]);
    assert_eq!(
        repo.get(2).await.unwrap().unwrap().embedding,
        vec![0.1, 0.2, 0.3]
    );
}

#[tokio::test]
async fn test_stats_counts_embedded_movies() {
    let (pool, _container) = setup_test_db().await;
    let repo = MovieRepository::new(pool);

    let empty = repo.get_stats().await.unwrap();
    assert_eq!(empty.total_movies, 0);
    assert!(empty.last_update.is_none());

    repo.insert(&sample_movie(1, "A")).await.unwrap();
    let pending = NewMovie {
        embedding: Vec::new(),
        ..sample_movie(2, "B")
    };
    repo.insert(&pending).await.unwrap();

    let stats = repo.get_stats().await.unwrap();
    assert_eq!(stats.total_movies, 2);
    assert_eq!(stats.movies_with_embeddings, 1);
    assert!(stats.last_update.is_some());
}

#[tokio::test]
async fn test_store_trait_delegates_to_repository() {
    let (pool, _container) = setup_test_db().await;
    let repo = MovieRepository::new(pool);

    assert!(repo.create(&sample_movie(7, "Trait")).await.unwrap());
    assert!(repo.find_by_id(7).await.unwrap().is_some());
    assert_eq!(repo.find_all().await.unwrap().len(), 1);
    repo.health_check().await.expect("database should be healthy");
}

#[tokio::test]
async fn test_apply_schema_is_idempotent() {
    let (pool, _container) = setup_test_db().await;

    reel_db::apply_schema(&pool)
        .await
        .expect("second apply should succeed");
}

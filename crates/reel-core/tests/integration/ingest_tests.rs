//! Integration tests for IngestService.
//!
//! These tests verify page ingestion and embedding backfill using mock
//! implementations.

use crate::integration::common::{
    MockCatalogClient, MockEmbeddingProvider, MockMovieStore, catalog_movie,
};
use reel_core::ingest::IngestService;
use reel_core::models::embedding_text;
use reel_core::{AppError, CatalogConfig};

/// Ingesting a page stores every new movie with its embedding.
#[tokio::test]
async fn test_ingest_stores_new_movies() {
    // Arrange
    let catalog = MockCatalogClient::new().with_page(
        1,
        vec![
            catalog_movie(550, "Dövüş Kulübü", "Bir sigorta çalışanı..."),
            catalog_movie(680, "Ucuz Roman", "Birbirine bağlı hikayeler"),
        ],
    );
    let store = MockMovieStore::new();
    let service = IngestService::new(store.clone(), MockEmbeddingProvider::new(), catalog);

    // Act
    let summary = service.fetch_and_store(1).await.unwrap();

    // Assert
    assert_eq!(summary.total_saved, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.message(), "Page 1 movies saved successfully!");
    assert_eq!(store.len(), 2);

    let stored = store.get(550).unwrap();
    assert_eq!(stored.title, "Dövüş Kulübü");
    assert_eq!(stored.release_date, "2024-01-01");
    assert!(stored.has_embedding(), "Movie should have an embedding");
}

/// The embedding is requested for "title overview".
#[tokio::test]
async fn test_ingest_embeds_title_and_overview() {
    let catalog =
        MockCatalogClient::new().with_page(1, vec![catalog_movie(1, "Heat", "Los Angeles")]);
    let embedding =
        MockEmbeddingProvider::new().with_vector("Heat Los Angeles", vec![0.25, 0.75, 0.0, 0.5]);
    let store = MockMovieStore::new();
    let service = IngestService::new(store.clone(), embedding, catalog);

    service.fetch_and_store(1).await.unwrap();

    assert_eq!(embedding_text("Heat", "Los Angeles"), "Heat Los Angeles");
    assert_eq!(store.get(1).unwrap().embedding, vec![0.25, 0.75, 0.0, 0.5]);
}

/// Re-ingesting an unchanged page saves nothing and requests no embeddings.
#[tokio::test]
async fn test_reingest_same_page_saves_nothing() {
    let catalog = MockCatalogClient::new().with_page(
        3,
        vec![catalog_movie(1, "A", "a"), catalog_movie(2, "B", "b")],
    );
    let store = MockMovieStore::new();
    let embedding = MockEmbeddingProvider::new();
    let service = IngestService::new(store.clone(), embedding.clone(), catalog);

    let first = service.fetch_and_store(3).await.unwrap();
    let calls_after_first = embedding.calls();
    let second = service.fetch_and_store(3).await.unwrap();

    assert_eq!(first.total_saved, 2);
    assert_eq!(second.total_saved, 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(second.message(), "Page 3 movies saved successfully!");
    assert_eq!(embedding.calls(), calls_after_first);
    assert_eq!(store.len(), 2);
}

/// One failing embedding does not stop the rest of the page.
#[tokio::test]
async fn test_failing_embedding_is_isolated() {
    let catalog = MockCatalogClient::new().with_page(
        1,
        vec![
            catalog_movie(1, "Good", "one"),
            catalog_movie(2, "Bad", "two"),
            catalog_movie(3, "Also good", "three"),
        ],
    );
    let embedding = MockEmbeddingProvider::new().failing_on("Bad two");
    let store = MockMovieStore::new();
    let service = IngestService::new(store.clone(), embedding, catalog);

    let summary = service.fetch_and_store(1).await.unwrap();

    assert_eq!(summary.total_saved, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total(), 3);
    assert!(store.get(2).is_none(), "Failed movie must not be stored");
    assert!(store.get(3).is_some());
}

/// An empty embedding counts as a failure and nothing is stored for it.
#[tokio::test]
async fn test_empty_embedding_is_not_stored() {
    let catalog = MockCatalogClient::new().with_page(1, vec![catalog_movie(9, "Void", "")]);
    let embedding = MockEmbeddingProvider::new().empty_on("Void ");
    let store = MockMovieStore::new();
    let service = IngestService::new(store.clone(), embedding, catalog);

    let summary = service.fetch_and_store(1).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(store.len(), 0);
}

/// A vector of the wrong dimension is a per-movie failure and is not stored.
#[tokio::test]
async fn test_wrong_dimension_embedding_is_rejected() {
    let catalog = MockCatalogClient::new().with_page(
        1,
        vec![catalog_movie(1, "A", "B"), catalog_movie(2, "C", "D")],
    );
    let embedding = MockEmbeddingProvider::new().with_vector("A B", vec![0.1, 0.2, 0.3]);
    let store = MockMovieStore::new();
    let service = IngestService::new(store.clone(), embedding, catalog);

    let summary = service.fetch_and_store(1).await.unwrap();

    assert_eq!(summary.total_saved, 1);
    assert_eq!(summary.failed, 1);
    assert!(store.get(1).is_none(), "Mismatched vector must not be stored");
    assert_eq!(store.get(2).unwrap().embedding.len(), 4);
}

/// A failing insert is counted and the next movie is still processed.
#[tokio::test]
async fn test_failing_insert_is_isolated() {
    let catalog = MockCatalogClient::new().with_page(
        1,
        vec![catalog_movie(1, "Rejected", "x"), catalog_movie(2, "Kept", "y")],
    );
    let store = MockMovieStore::failing_inserts_for(&[1]);
    let service = IngestService::new(store.clone(), MockEmbeddingProvider::new(), catalog);

    let summary = service.fetch_and_store(1).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total_saved, 1);
    assert!(store.get(2).is_some());
}

#[tokio::test]
async fn test_catalog_failure_aborts_ingest() {
    let service = IngestService::new(
        MockMovieStore::new(),
        MockEmbeddingProvider::new(),
        MockCatalogClient::unavailable(),
    );

    let result = service.fetch_and_store(1).await;

    assert!(matches!(result, Err(AppError::CatalogUnavailable(_))));
}

/// Relative poster paths become absolute; missing ones become empty.
#[tokio::test]
async fn test_poster_paths_are_rewritten() {
    let mut no_poster = catalog_movie(2, "No poster", "");
    no_poster.poster_path = None;
    let mut absolute = catalog_movie(3, "Absolute", "");
    absolute.poster_path = Some("https://cdn.example.com/p.jpg".to_string());

    let catalog = MockCatalogClient::new().with_page(
        1,
        vec![catalog_movie(1, "Relative", ""), no_poster, absolute],
    );
    let store = MockMovieStore::new();
    let config = CatalogConfig::default().with_image_base_url("https://img.example.com/w500/");
    let service =
        IngestService::with_config(store.clone(), MockEmbeddingProvider::new(), catalog, config);

    service.fetch_and_store(1).await.unwrap();

    assert_eq!(
        store.get(1).unwrap().poster_path,
        "https://img.example.com/w500/poster1.jpg"
    );
    assert_eq!(store.get(2).unwrap().poster_path, "");
    assert_eq!(
        store.get(3).unwrap().poster_path,
        "https://cdn.example.com/p.jpg"
    );
}

#[tokio::test]
async fn test_empty_page_saves_nothing() {
    let service = IngestService::new(
        MockMovieStore::new(),
        MockEmbeddingProvider::new(),
        MockCatalogClient::new(),
    );

    let summary = service.fetch_and_store(42).await.unwrap();

    assert_eq!(summary.total(), 0);
    assert_eq!(summary.message(), "Page 42 movies saved successfully!");
}

/// Backfill fills only empty embeddings and leaves existing ones untouched.
#[tokio::test]
async fn test_backfill_only_fills_empty_embeddings() {
    let store = MockMovieStore::new();
    store.seed(1, "Embedded", vec![9.0, 9.0]);
    store.seed(2, "Missing", Vec::new());
    store.seed(3, "Also missing", Vec::new());
    let embedding = MockEmbeddingProvider::new();
    let service = IngestService::new(store.clone(), embedding.clone(), MockCatalogClient::new());

    let summary = service.backfill_embeddings().await.unwrap();

    assert_eq!(summary.total_updated, 2);
    assert_eq!(summary.already_embedded, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.message(), "Embeddings generated for all movies!");
    assert_eq!(embedding.calls(), 2);
    assert_eq!(store.get(1).unwrap().embedding, vec![9.0, 9.0]);
    assert!(store.get(2).unwrap().has_embedding());
    assert!(store.get(3).unwrap().has_embedding());
}

#[tokio::test]
async fn test_backfill_twice_updates_nothing_second_time() {
    let store = MockMovieStore::new();
    store.seed(1, "Missing", Vec::new());
    let service = IngestService::new(
        store.clone(),
        MockEmbeddingProvider::new(),
        MockCatalogClient::new(),
    );

    service.backfill_embeddings().await.unwrap();
    let second = service.backfill_embeddings().await.unwrap();

    assert_eq!(second.total_updated, 0);
    assert_eq!(second.already_embedded, 1);
}

#[tokio::test]
async fn test_backfill_rejects_wrong_dimension() {
    let store = MockMovieStore::new();
    store.seed(1, "Short", Vec::new());
    let embedding =
        MockEmbeddingProvider::new().with_vector("Short Overview of Short", vec![1.0, 0.0]);
    let service = IngestService::new(store.clone(), embedding, MockCatalogClient::new());

    let summary = service.backfill_embeddings().await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total_updated, 0);
    assert!(!store.get(1).unwrap().has_embedding());
}

#[tokio::test]
async fn test_backfill_counts_failures() {
    let store = MockMovieStore::new();
    store.seed(1, "Broken", Vec::new());
    let service = IngestService::new(
        store.clone(),
        MockEmbeddingProvider::unavailable(),
        MockCatalogClient::new(),
    );

    let summary = service.backfill_embeddings().await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total_updated, 0);
    assert!(!store.get(1).unwrap().has_embedding());
}

//! Integration tests for SearchService.

use crate::integration::common::{MockEmbeddingProvider, MockMovieStore};
use reel_core::search::SearchService;
use reel_core::{AppError, SearchConfig};

/// Two orthogonal movies: the query matching the first ranks it at 1.0 and
/// the second at 0.0.
#[tokio::test]
async fn test_semantic_search_ranks_by_cosine_similarity() {
    // Arrange
    let store = MockMovieStore::new();
    store.seed(1, "Alpha", vec![1.0, 0.0]);
    store.seed(2, "Beta", vec![0.0, 1.0]);
    let embedding = MockEmbeddingProvider::new().with_vector("alpha-like", vec![1.0, 0.0]);
    let service = SearchService::new(store, embedding);

    // Act
    let hits = service.semantic_search("alpha-like").await.unwrap();

    // Assert
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, 1);
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert_eq!(hits[1].id, 2);
    assert_eq!(hits[1].score, 0.0);
}

#[tokio::test]
async fn test_semantic_search_returns_at_most_ten_sorted_hits() {
    let store = MockMovieStore::new();
    for i in 0..25 {
        store.seed(i, &format!("Movie {}", i), vec![1.0, i as f32 / 10.0]);
    }
    let embedding = MockEmbeddingProvider::new().with_vector("q", vec![0.0, 1.0]);
    let service = SearchService::new(store, embedding);

    let hits = service.semantic_search("q").await.unwrap();

    assert_eq!(hits.len(), 10);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score, "hits must be descending");
    }
    // Larger second component means closer to [0, 1].
    assert_eq!(hits[0].id, 24);
}

#[tokio::test]
async fn test_semantic_search_respects_configured_limit() {
    let store = MockMovieStore::new();
    for i in 0..5 {
        store.seed(i, &format!("Movie {}", i), vec![1.0, 1.0]);
    }
    let service = SearchService::with_config(
        store,
        MockEmbeddingProvider::new(),
        SearchConfig { limit: 3 },
    );

    let hits = service.semantic_search("anything").await.unwrap();
    assert_eq!(hits.len(), 3);
}

#[tokio::test]
async fn test_semantic_search_on_empty_store_returns_nothing() {
    let service = SearchService::new(MockMovieStore::new(), MockEmbeddingProvider::new());
    let hits = service.semantic_search("anything").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_empty_query_embedding_is_unavailable() {
    let store = MockMovieStore::new();
    store.seed(1, "Alpha", vec![1.0, 0.0]);
    let embedding = MockEmbeddingProvider::new().empty_on("nothing");
    let service = SearchService::new(store, embedding);

    let result = service.semantic_search("nothing").await;

    assert!(matches!(result, Err(AppError::EmbeddingUnavailable(_))));
}

#[tokio::test]
async fn test_provider_failure_is_unavailable() {
    let store = MockMovieStore::new();
    store.seed(1, "Alpha", vec![1.0, 0.0]);
    let service = SearchService::new(store, MockEmbeddingProvider::unavailable());

    let result = service.semantic_search("alpha").await;

    assert!(matches!(result, Err(AppError::EmbeddingUnavailable(_))));
}

#[tokio::test]
async fn test_search_calls_provider_exactly_once() {
    let store = MockMovieStore::new();
    for i in 0..4 {
        store.seed(i, &format!("Movie {}", i), vec![1.0, 0.5]);
    }
    let embedding = MockEmbeddingProvider::new();
    let service = SearchService::new(store, embedding.clone());

    service.semantic_search("space opera").await.unwrap();

    assert_eq!(embedding.calls(), 1);
}

#[tokio::test]
async fn test_equal_scores_keep_store_order() {
    let store = MockMovieStore::new();
    store.seed(30, "First", vec![2.0, 0.0]);
    store.seed(10, "Second", vec![1.0, 0.0]);
    store.seed(20, "Third", vec![3.0, 0.0]);
    let embedding = MockEmbeddingProvider::new().with_vector("x", vec![1.0, 0.0]);
    let service = SearchService::new(store, embedding);

    let hits = service.semantic_search("x").await.unwrap();

    let ids: Vec<i64> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

#[tokio::test]
async fn test_movies_without_embedding_score_zero() {
    let store = MockMovieStore::new();
    store.seed(1, "Embedded", vec![0.5, 0.5]);
    store.seed(2, "Not yet embedded", Vec::new());
    let embedding = MockEmbeddingProvider::new().with_vector("q", vec![1.0, 1.0]);
    let service = SearchService::new(store, embedding);

    let hits = service.semantic_search("q").await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, 1);
    assert_eq!(hits[1].id, 2);
    assert_eq!(hits[1].score, 0.0);
}

#[tokio::test]
async fn test_mismatched_dimensions_compare_shared_prefix() {
    let store = MockMovieStore::new();
    store.seed(1, "Long vector", vec![1.0, 0.0, 5.0, 5.0]);
    let embedding = MockEmbeddingProvider::new().with_vector("q", vec![1.0, 0.0]);
    let service = SearchService::new(store, embedding);

    let hits = service.semantic_search("q").await.unwrap();

    assert!((hits[0].score - 1.0).abs() < 1e-6);
}

/// A corrupt stored embedding scores 0 and never outranks a real match.
#[tokio::test]
async fn test_nan_embedding_scores_zero_and_ranks_below_match() {
    let store = MockMovieStore::new();
    store.seed(1, "Low", vec![0.0, 1.0]);
    store.seed(2, "Corrupt", vec![f32::NAN, 1.0]);
    store.seed(3, "High", vec![1.0, 0.0]);
    let embedding = MockEmbeddingProvider::new().with_vector("q", vec![1.0, 0.0]);
    let service = SearchService::new(store, embedding);

    let hits = service.semantic_search("q").await.unwrap();

    let ids: Vec<i64> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert_eq!(hits[2].score, 0.0);
}

#[tokio::test]
async fn test_text_search_excludes_cjk_titles() {
    let store = MockMovieStore::new();
    store.seed(1, "千と千尋の神隠し", vec![1.0, 0.0]);
    store.seed(2, "Spirited Away", vec![0.9, 0.1]);
    store.seed(3, "기생충", vec![1.0, 0.0]);
    store.seed(4, "Yüzüklerin Efendisi", vec![0.0, 1.0]);
    let embedding = MockEmbeddingProvider::new().with_vector("ghibli", vec![1.0, 0.0]);
    let service = SearchService::new(store, embedding);

    let hits = service.text_search("ghibli").await.unwrap();

    let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Spirited Away", "Yüzüklerin Efendisi"]);
}

#[tokio::test]
async fn test_text_search_empty_embedding_is_unavailable() {
    let service = SearchService::new(
        MockMovieStore::new(),
        MockEmbeddingProvider::new().empty_on("q"),
    );

    let result = service.text_search("q").await;

    assert!(matches!(result, Err(AppError::EmbeddingUnavailable(_))));
}

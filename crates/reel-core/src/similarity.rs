//! Vector similarity and ranking.

/// Cosine similarity between two embeddings.
///
/// Only the shared prefix of the two vectors is compared: when the lengths
/// differ, the longer vector is truncated to the length of the shorter one.
/// An empty vector on either side, or a zero magnitude over the compared
/// prefix, yields `0.0` rather than `NaN`. A non-finite component (`NaN`
/// or infinity) in either vector also yields `0.0`.
///
/// Sums are accumulated in `f64`.
///
/// # Examples
///
/// ```
/// use reel_core::similarity::cosine_similarity;
///
/// assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-6);
/// assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
/// assert_eq!(cosine_similarity(&[], &[1.0]), 0.0);
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    // zip stops at the shorter vector
    for (&x, &y) in a.iter().zip(b.iter()) {
        let x = f64::from(x);
        let y = f64::from(y);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !score.is_finite() {
        return 0.0;
    }

    score as f32
}

/// Scores every candidate against `query`, keeps the best `limit`.
///
/// The sort is stable, so candidates with equal scores keep the order in
/// which they were supplied.
pub fn rank<T>(
    query: &[f32],
    candidates: impl IntoIterator<Item = (T, Vec<f32>)>,
    limit: usize,
) -> Vec<(T, f32)> {
    let mut scored: Vec<(T, f32)> = candidates
        .into_iter()
        .map(|(item, embedding)| {
            let score = cosine_similarity(query, &embedding);
            (item, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}

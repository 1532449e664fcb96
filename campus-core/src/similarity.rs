//! Cosine similarity between tag vectors.
//!
//! Both vectors must come from the same [`TagSpace`](crate::TagSpace). A
//! zero vector carries no information and scores `0.0` against anything.

use thiserror::Error;

use crate::TagVector;

/// Errors returned by [`cosine_similarity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimilarityError {
    /// The vectors were built from tag spaces of different sizes.
    #[error("cannot compare vectors of dimension {left} and {right}")]
    DimensionMismatch {
        /// Dimension of the left-hand vector.
        left: usize,
        /// Dimension of the right-hand vector.
        right: usize,
    },
}

/// Compute `dot(a, b) / (‖a‖·‖b‖)`.
///
/// Returns exactly `0.0` when either vector has no tags set. One-hot inputs
/// are non-negative, so the result lies in `0.0..=1.0`; it is clamped to
/// absorb rounding.
///
/// # Errors
/// Returns [`SimilarityError::DimensionMismatch`] when the vectors differ in
/// length.
///
/// # Examples
/// ```
/// use campus_core::{TagId, TagSpace, cosine_similarity};
///
/// let space = TagSpace::new([TagId(1), TagId(2)]);
/// let a = space.vectorize([TagId(1), TagId(2)]);
/// let b = space.vectorize([TagId(1)]);
/// let score = cosine_similarity(&a, &b).expect("same space");
/// assert!((score - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity is a ratio of a dot product and norms"
)]
pub fn cosine_similarity(a: &TagVector, b: &TagVector) -> Result<f64, SimilarityError> {
    if a.dimension() != b.dimension() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.dimension(),
            right: b.dimension(),
        });
    }
    if a.is_zero() || b.is_zero() {
        return Ok(0.0);
    }

    let dot: f64 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(left, right)| left * right)
        .sum();
    // One-hot squared norms are whole numbers, so taking a single root of
    // their product keeps self-similarity at exactly 1.0.
    let similarity = dot / (a.squared_norm() * b.squared_norm()).sqrt();
    if similarity.is_finite() {
        Ok(similarity.clamp(0.0, 1.0))
    } else {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TagId, TagSpace};
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-12;

    fn space() -> TagSpace {
        TagSpace::new([TagId(1), TagId(2), TagId(3)])
    }

    #[rstest]
    #[case(&[1, 2], &[1, 2], 1.0)]
    #[case(&[1, 2], &[1], std::f64::consts::FRAC_1_SQRT_2)]
    #[case(&[1, 2], &[3], 0.0)]
    #[case(&[1], &[1, 2, 3], 1.0 / 3.0_f64.sqrt())]
    #[case(&[], &[1, 2], 0.0)]
    #[case(&[], &[], 0.0)]
    fn scores_tag_overlap(#[case] left: &[u64], #[case] right: &[u64], #[case] expected: f64) {
        let space = space();
        let a = space.vectorize(left.iter().copied().map(TagId));
        let b = space.vectorize(right.iter().copied().map(TagId));
        let score = cosine_similarity(&a, &b).expect("vectors share a space");
        assert!((score - expected).abs() <= TOLERANCE, "got {score}, expected {expected}");
    }

    #[rstest]
    #[case(&[1])]
    #[case(&[1, 2])]
    #[case(&[1, 2, 3])]
    fn self_similarity_is_exactly_one(#[case] tags: &[u64]) {
        let space = space();
        let a = space.vectorize(tags.iter().copied().map(TagId));
        let b = space.vectorize(tags.iter().copied().map(TagId));
        assert_eq!(cosine_similarity(&a, &b), Ok(1.0));
    }

    #[rstest]
    fn similarity_is_symmetric() {
        let space = space();
        let a = space.vectorize([TagId(1), TagId(3)]);
        let b = space.vectorize([TagId(3)]);
        let forward = cosine_similarity(&a, &b).expect("same space");
        let backward = cosine_similarity(&b, &a).expect("same space");
        assert!((forward - backward).abs() <= TOLERANCE);
    }

    #[rstest]
    fn rejects_vectors_from_different_spaces() {
        let small = TagSpace::new([TagId(1), TagId(2)]).vectorize([TagId(1)]);
        let large = space().vectorize([TagId(1)]);
        let err = cosine_similarity(&small, &large).expect_err("dimensions differ");
        assert_eq!(err, SimilarityError::DimensionMismatch { left: 2, right: 3 });
    }

    #[rstest]
    fn zero_dimension_vectors_score_zero() {
        let empty = TagSpace::new([]);
        let a = empty.vectorize([TagId(1)]);
        let b = empty.vectorize([]);
        assert_eq!(cosine_similarity(&a, &b), Ok(0.0));
    }
}

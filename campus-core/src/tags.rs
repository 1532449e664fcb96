//! One-hot encoding of tag sets.
//!
//! A [`TagSpace`] fixes the vector dimension and the position of every tag in
//! the universe. It is immutable once built, so a single instance can be
//! shared read-only across threads or rebuilt per request.
//!
//! # Examples
//! ```
//! use campus_core::{TagId, TagSpace};
//!
//! let space = TagSpace::new([TagId(30), TagId(10), TagId(20)]);
//! assert_eq!(space.index_of(TagId(10)), Some(0));
//! assert_eq!(space.index_of(TagId(30)), Some(2));
//!
//! let vector = space.vectorize([TagId(20), TagId(99)]);
//! assert_eq!(vector.as_slice(), &[0.0, 1.0, 0.0]);
//! ```

use log::trace;

use crate::TagId;

/// Bijection from the tag universe to zero-based vector indices.
///
/// Tags are sorted ascending and indexed in that order; duplicates in the
/// input collapse to a single entry. The same set of tags always produces
/// the same indexing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSpace {
    tags: Vec<TagId>,
}

impl TagSpace {
    /// Build a space over the supplied universe of tags.
    ///
    /// An empty universe yields a zero-dimensional space.
    pub fn new(all_tag_ids: impl IntoIterator<Item = TagId>) -> Self {
        let mut tags: Vec<TagId> = all_tag_ids.into_iter().collect();
        tags.sort_unstable();
        tags.dedup();
        Self { tags }
    }

    /// Number of tags in the universe, which is also the vector length.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.tags.len()
    }

    /// Report whether the universe is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Return the vector index assigned to `tag`, if it is part of the universe.
    #[must_use]
    pub fn index_of(&self, tag: TagId) -> Option<usize> {
        self.tags.binary_search(&tag).ok()
    }

    /// Report whether `tag` is part of the universe.
    #[must_use]
    pub fn contains(&self, tag: TagId) -> bool {
        self.index_of(tag).is_some()
    }

    /// Iterate over the universe in index order.
    pub fn tag_ids(&self) -> impl ExactSizeIterator<Item = TagId> + '_ {
        self.tags.iter().copied()
    }

    /// Encode a set of tags as a one-hot vector over this space.
    ///
    /// Tags outside the universe contribute nothing and never cause an
    /// error. Repeated tags set the same entry once.
    pub fn vectorize(&self, tag_ids: impl IntoIterator<Item = TagId>) -> TagVector {
        let mut values = vec![0.0_f64; self.dimension()];
        for tag in tag_ids {
            let Some(index) = self.index_of(tag) else {
                trace!("ignoring tag {tag} outside the tag space");
                continue;
            };
            if let Some(slot) = values.get_mut(index) {
                *slot = 1.0_f64;
            }
        }
        TagVector { values }
    }
}

/// Dense one-hot vector produced by [`TagSpace::vectorize`].
///
/// Entries are `1.0` for present tags and `0.0` elsewhere.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagVector {
    values: Vec<f64>,
}

impl TagVector {
    /// Length of the vector, equal to the dimension of its space.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Borrow the raw entries.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of tags set in the vector.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.values.iter().filter(|value| **value > 0.0_f64).count()
    }

    /// Report whether no tag is set, i.e. the Euclidean norm is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|value| *value == 0.0_f64)
    }

    /// Sum of squared entries.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the squared norm is a sum of squares"
    )]
    pub fn squared_norm(&self) -> f64 {
        self.values.iter().map(|value| value * value).sum()
    }

    /// Euclidean norm of the vector.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }
}

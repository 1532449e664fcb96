//! Core domain types for the Campus recommendation engine.
//!
//! The crate turns tag identifiers into one-hot vectors over a fixed
//! [`TagSpace`], compares them with cosine similarity, and ranks candidate
//! events for a student through the [`Recommender`]. Everything here is
//! synchronous and free of I/O: data arrives through the [`EventCatalogue`]
//! seam or directly from the caller.
//!
//! # Examples
//!
//! ```
//! use campus_core::{CandidateEvent, EventId, Recommender, TagId, TagSpace};
//!
//! # fn main() -> Result<(), campus_core::RecommendError> {
//! let space = TagSpace::new([TagId(1), TagId(2), TagId(3)]);
//! let recommender = Recommender::new(space);
//! let events = vec![
//!     CandidateEvent::new(EventId(10), "Robotics night", [TagId(1), TagId(2)]),
//!     CandidateEvent::new(EventId(11), "Poetry slam", [TagId(3)]),
//! ];
//!
//! let ranked = recommender.score_all(&[TagId(1), TagId(2)], &events)?;
//! assert_eq!(ranked.first().map(|event| event.event_id), Some(EventId(10)));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod access;
pub mod catalogue;
mod event;
mod ids;
pub mod recommender;
pub mod service;
pub mod similarity;
pub mod tags;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use access::{AuthError, Role, SessionVerifier, UserContext, UserDirectory, authorize};
pub use catalogue::EventCatalogue;
pub use event::{CandidateEvent, EventSummary, ScoredEvent};
pub use ids::{EventId, StudentId, TagId};
pub use recommender::{
    DEFAULT_COLD_START_LIMIT, RecommendError, Recommendations, Recommender, RecommenderConfig,
};
pub use service::{RecommendationService, ServiceError};
pub use similarity::{SimilarityError, cosine_similarity};
pub use tags::{TagSpace, TagVector};

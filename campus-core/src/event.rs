//! Event shapes consumed and produced by the recommender.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EventId, TagId};

/// An event eligible for recommendation, with the tags attached to it.
///
/// # Examples
///
/// ```
/// use campus_core::{CandidateEvent, EventId, TagId};
///
/// let event = CandidateEvent::new(EventId(1), "Hackathon", [TagId(4), TagId(4)]);
/// assert_eq!(event.title, "Hackathon");
/// assert_eq!(event.tags.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateEvent {
    /// Event identifier.
    pub id: EventId,
    /// Display title.
    pub title: String,
    /// Tags attached to the event. Duplicates are tolerated.
    pub tags: Vec<TagId>,
}

impl CandidateEvent {
    /// Build a candidate from its parts.
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        tags: impl IntoIterator<Item = TagId>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            tags: tags.into_iter().collect(),
        }
    }
}

/// Identifier and title of an event, as listed on cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventSummary {
    /// Event identifier.
    pub id: EventId,
    /// Display title.
    pub title: String,
}

impl EventSummary {
    /// Build a summary from its parts.
    pub fn new(id: EventId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A recommended event and its similarity to the student's interests.
///
/// `score` is `None` when no similarity was computed (cold start). That
/// sentinel is distinct from `Some(0.0)` and serialises as `null`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredEvent {
    /// Event identifier.
    pub event_id: EventId,
    /// Display title.
    pub title: String,
    /// Cosine similarity in `0.0..=1.0`, or `None` on cold start.
    pub score: Option<f64>,
}

impl ScoredEvent {
    /// Attach a computed similarity to a candidate.
    #[must_use]
    pub fn scored(event: &CandidateEvent, score: f64) -> Self {
        Self {
            event_id: event.id,
            title: event.title.clone(),
            score: Some(score),
        }
    }

    /// Wrap a recency summary without a score.
    #[must_use]
    pub fn unscored(summary: &EventSummary) -> Self {
        Self {
            event_id: summary.id,
            title: summary.title.clone(),
            score: None,
        }
    }
}

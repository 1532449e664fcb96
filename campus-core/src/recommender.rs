//! Rank candidate events against a student's interests.
//!
//! The [`Recommender`] vectorizes the student's interest tags once, scores
//! every candidate with [`cosine_similarity`], and sorts the results by score
//! descending. The sort is stable: events with equal scores keep the order
//! in which the caller supplied them.
//!
//! Two entry points exist:
//! - [`Recommender::score_all`] keeps every candidate, including those with
//!   no tag overlap. It is intended for inspection and testing.
//! - [`Recommender::recommend`] is the serving variant. It falls back to the
//!   most recent events when the student has no interests, and otherwise
//!   drops candidates that score `0.0`.

use std::cmp::Ordering;

use log::{debug, warn};
use thiserror::Error;

use crate::{
    CandidateEvent, EventSummary, ScoredEvent, SimilarityError, TagId, TagSpace,
    cosine_similarity,
};

/// Number of recent events returned on cold start unless configured otherwise.
pub const DEFAULT_COLD_START_LIMIT: usize = 5;

/// Tunables for [`Recommender`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommenderConfig {
    /// Maximum number of recent events listed when a student has no interests.
    pub cold_start_limit: usize,
}

impl RecommenderConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`RecommendError::Configuration`] when `cold_start_limit` is
    /// zero.
    pub const fn validate(self) -> Result<Self, RecommendError> {
        if self.cold_start_limit == 0 {
            return Err(RecommendError::Configuration {
                reason: "cold start limit must be at least one",
            });
        }
        Ok(self)
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            cold_start_limit: DEFAULT_COLD_START_LIMIT,
        }
    }
}

/// Errors raised while configuring or running the recommender.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The recommender was configured with unusable settings.
    #[error("invalid recommender configuration: {reason}")]
    Configuration {
        /// Description of the rejected setting.
        reason: &'static str,
    },
    /// Two vectors could not be compared.
    #[error(transparent)]
    Similarity(#[from] SimilarityError),
}

/// Outcome of [`Recommender::recommend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    /// Events ranked by similarity, each with a positive score.
    Ranked(Vec<ScoredEvent>),
    /// Most recent events without scores, used when no interests are known.
    ColdStart(Vec<ScoredEvent>),
}

impl Recommendations {
    /// Report whether the cold-start fallback produced these results.
    #[must_use]
    pub const fn is_cold_start(&self) -> bool {
        matches!(self, Self::ColdStart(_))
    }

    /// Borrow the events in serving order.
    #[must_use]
    pub fn events(&self) -> &[ScoredEvent] {
        match self {
            Self::Ranked(events) | Self::ColdStart(events) => events,
        }
    }

    /// Consume the outcome and return the events in serving order.
    #[must_use]
    pub fn into_events(self) -> Vec<ScoredEvent> {
        match self {
            Self::Ranked(events) | Self::ColdStart(events) => events,
        }
    }
}

/// Content-based recommender over a fixed [`TagSpace`].
///
/// The recommender holds no mutable state. It can be rebuilt per request or
/// shared between threads.
///
/// # Examples
///
/// ```
/// use campus_core::{
///     CandidateEvent, EventId, EventSummary, Recommender, TagId, TagSpace,
/// };
///
/// # fn main() -> Result<(), campus_core::RecommendError> {
/// let recommender = Recommender::new(TagSpace::new([TagId(1), TagId(2)]));
/// let events = vec![CandidateEvent::new(EventId(1), "Film night", [TagId(2)])];
/// let recent = vec![EventSummary::new(EventId(9), "Welcome fair")];
///
/// let outcome = recommender.recommend(&[], &events, &recent)?;
/// assert!(outcome.is_cold_start());
/// assert_eq!(outcome.events()[0].score, None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Recommender {
    space: TagSpace,
    config: RecommenderConfig,
}

impl Recommender {
    /// Build a recommender with the default configuration.
    #[must_use]
    pub fn new(space: TagSpace) -> Self {
        Self {
            space,
            config: RecommenderConfig::default(),
        }
    }

    /// Build a recommender with an explicit configuration.
    ///
    /// # Errors
    /// Returns [`RecommendError::Configuration`] when the configuration is
    /// rejected by [`RecommenderConfig::validate`].
    pub fn with_config(space: TagSpace, config: RecommenderConfig) -> Result<Self, RecommendError> {
        let validated = config.validate()?;
        Ok(Self {
            space,
            config: validated,
        })
    }

    /// Borrow the tag space used for vectorization.
    #[must_use]
    pub const fn space(&self) -> &TagSpace {
        &self.space
    }

    /// Return the active configuration.
    #[must_use]
    pub const fn config(&self) -> RecommenderConfig {
        self.config
    }

    /// Score every candidate and sort by score descending.
    ///
    /// Candidates with no tag overlap are kept with a score of `0.0`.
    ///
    /// # Errors
    /// Returns [`RecommendError::Similarity`] if two vectors cannot be
    /// compared. Vectors built here share one space, so this signals a
    /// broken invariant rather than bad input.
    pub fn score_all(
        &self,
        student_tags: &[TagId],
        events: &[CandidateEvent],
    ) -> Result<Vec<ScoredEvent>, RecommendError> {
        let student = self.space.vectorize(student_tags.iter().copied());
        let mut scored = events
            .iter()
            .map(|event| {
                let vector = self.space.vectorize(event.tags.iter().copied());
                cosine_similarity(&student, &vector).map(|score| ScoredEvent::scored(event, score))
            })
            .collect::<Result<Vec<_>, _>>()?;
        scored.sort_by(descending_score);
        debug!(
            "scored {} events against {} interest tags",
            scored.len(),
            student.active_count()
        );
        Ok(scored)
    }

    /// List the most recent events without scores.
    ///
    /// `recent` must already be ordered newest first; at most
    /// [`RecommenderConfig::cold_start_limit`] entries are returned.
    #[must_use]
    pub fn cold_start(&self, recent: &[EventSummary]) -> Vec<ScoredEvent> {
        if recent.is_empty() {
            warn!("cold start requested but no recent events were supplied");
        }
        recent
            .iter()
            .take(self.config.cold_start_limit)
            .map(ScoredEvent::unscored)
            .collect()
    }

    /// Produce the recommendations served to a student.
    ///
    /// Without interest tags the result is [`Recommendations::ColdStart`],
    /// built from `recent` alone; `events` is ignored. Otherwise the
    /// candidates are ranked with [`Recommender::score_all`] and every event
    /// scoring `0.0` or less is dropped.
    ///
    /// # Errors
    /// Propagates failures from [`Recommender::score_all`].
    pub fn recommend(
        &self,
        student_tags: &[TagId],
        events: &[CandidateEvent],
        recent: &[EventSummary],
    ) -> Result<Recommendations, RecommendError> {
        if student_tags.is_empty() {
            return Ok(Recommendations::ColdStart(self.cold_start(recent)));
        }
        let mut ranked = self.score_all(student_tags, events)?;
        ranked.retain(has_positive_score);
        Ok(Recommendations::Ranked(ranked))
    }
}

fn has_positive_score(event: &ScoredEvent) -> bool {
    event.score.is_some_and(|score| score > 0.0)
}

/// Order by score descending; unscored entries sort last.
fn descending_score(left: &ScoredEvent, right: &ScoredEvent) -> Ordering {
    match (left.score, right.score) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

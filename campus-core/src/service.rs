//! Request-level orchestration over an [`EventCatalogue`].
//!
//! [`RecommendationService`] fetches the inputs for one student, builds a
//! fresh [`TagSpace`] from the current tag universe and hands everything to
//! the [`Recommender`]. Candidates are only loaded when the student has
//! interests; recent events are only loaded on cold start.

use log::debug;
use thiserror::Error;

use crate::{
    EventCatalogue, RecommendError, Recommendations, Recommender, RecommenderConfig, ScoredEvent,
    StudentId, TagSpace,
};

/// Errors raised by [`RecommendationService`].
#[derive(Debug, Error)]
pub enum ServiceError<E>
where
    E: std::error::Error + 'static,
{
    /// The catalogue failed to supply recommendation inputs.
    #[error("failed to load recommendation inputs: {0}")]
    Catalogue(#[source] E),
    /// The recommender rejected its inputs or configuration.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

/// Serve recommendations for students from a catalogue.
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
/// use campus_core::{
///     CandidateEvent, EventCatalogue, EventId, EventSummary, RecommendationService, StudentId,
///     TagId,
/// };
///
/// struct Clubs;
///
/// impl EventCatalogue for Clubs {
///     type Error = Infallible;
///
///     fn tag_ids(&self) -> Result<Vec<TagId>, Self::Error> {
///         Ok(vec![TagId(1), TagId(2)])
///     }
///
///     fn student_interests(&self, _student: StudentId) -> Result<Vec<TagId>, Self::Error> {
///         Ok(vec![TagId(1)])
///     }
///
///     fn candidate_events(&self, _student: StudentId) -> Result<Vec<CandidateEvent>, Self::Error> {
///         Ok(vec![
///             CandidateEvent::new(EventId(1), "Coding dojo", [TagId(1)]),
///             CandidateEvent::new(EventId(2), "Choir", [TagId(2)]),
///         ])
///     }
///
///     fn recent_events(&self, _limit: usize) -> Result<Vec<EventSummary>, Self::Error> {
///         Ok(Vec::new())
///     }
/// }
///
/// let service = RecommendationService::new(Clubs);
/// let outcome = service.recommend_for(StudentId(7)).expect("infallible catalogue");
/// assert_eq!(outcome.events().len(), 1);
/// assert_eq!(outcome.events()[0].event_id, EventId(1));
/// ```
#[derive(Debug)]
pub struct RecommendationService<C> {
    catalogue: C,
    config: RecommenderConfig,
}

impl<C: EventCatalogue> RecommendationService<C> {
    /// Wrap a catalogue using the default recommender configuration.
    pub fn new(catalogue: C) -> Self {
        Self {
            catalogue,
            config: RecommenderConfig::default(),
        }
    }

    /// Wrap a catalogue with an explicit recommender configuration.
    ///
    /// # Errors
    /// Returns [`RecommendError::Configuration`] when the configuration is
    /// invalid.
    pub fn with_config(
        catalogue: C,
        config: RecommenderConfig,
    ) -> Result<Self, ServiceError<C::Error>> {
        let validated = config.validate()?;
        Ok(Self {
            catalogue,
            config: validated,
        })
    }

    /// Borrow the underlying catalogue.
    pub const fn catalogue(&self) -> &C {
        &self.catalogue
    }

    /// Produce the recommendations served to `student`.
    ///
    /// # Errors
    /// Returns [`ServiceError::Catalogue`] when a query fails and
    /// [`ServiceError::Recommend`] when scoring fails.
    pub fn recommend_for(
        &self,
        student: StudentId,
    ) -> Result<Recommendations, ServiceError<C::Error>> {
        let interests = self
            .catalogue
            .student_interests(student)
            .map_err(ServiceError::Catalogue)?;
        let recommender = self.build_recommender()?;

        if interests.is_empty() {
            debug!("student {student} has no interests; serving recent events");
            let recent = self
                .catalogue
                .recent_events(self.config.cold_start_limit)
                .map_err(ServiceError::Catalogue)?;
            return Ok(recommender.recommend(&interests, &[], &recent)?);
        }

        let candidates = self
            .catalogue
            .candidate_events(student)
            .map_err(ServiceError::Catalogue)?;
        let outcome = recommender.recommend(&interests, &candidates, &[])?;
        debug!(
            "student {student}: {} of {} candidates recommended",
            outcome.events().len(),
            candidates.len()
        );
        Ok(outcome)
    }

    /// Score every candidate for `student`, keeping zero scores.
    ///
    /// Unlike [`recommend_for`](Self::recommend_for) there is no cold-start
    /// fallback: a student without interests scores `0.0` everywhere.
    ///
    /// # Errors
    /// Returns [`ServiceError::Catalogue`] when a query fails and
    /// [`ServiceError::Recommend`] when scoring fails.
    pub fn score_all_for(
        &self,
        student: StudentId,
    ) -> Result<Vec<ScoredEvent>, ServiceError<C::Error>> {
        let interests = self
            .catalogue
            .student_interests(student)
            .map_err(ServiceError::Catalogue)?;
        let candidates = self
            .catalogue
            .candidate_events(student)
            .map_err(ServiceError::Catalogue)?;
        let recommender = self.build_recommender()?;
        Ok(recommender.score_all(&interests, &candidates)?)
    }

    fn build_recommender(&self) -> Result<Recommender, ServiceError<C::Error>> {
        let universe = self.catalogue.tag_ids().map_err(ServiceError::Catalogue)?;
        Ok(Recommender::with_config(
            TagSpace::new(universe),
            self.config,
        )?)
    }
}

//! Data access seam for recommendation inputs.
//!
//! The `EventCatalogue` trait exposes typed, read-only queries over the
//! tag universe, student interests and events. The recommender only ever
//! sees the plain values these methods return.

use crate::{CandidateEvent, EventSummary, StudentId, TagId};

/// Read-only access to the data a recommendation request needs.
///
/// Implementations decide which events count as candidates for a student
/// (for example all tagged events, or only those the student has not
/// responded to).
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use campus_core::{CandidateEvent, EventCatalogue, EventId, EventSummary, StudentId, TagId};
///
/// struct SingleEvent;
///
/// impl EventCatalogue for SingleEvent {
///     type Error = Infallible;
///
///     fn tag_ids(&self) -> Result<Vec<TagId>, Self::Error> {
///         Ok(vec![TagId(1)])
///     }
///
///     fn student_interests(&self, _student: StudentId) -> Result<Vec<TagId>, Self::Error> {
///         Ok(vec![TagId(1)])
///     }
///
///     fn candidate_events(&self, _student: StudentId) -> Result<Vec<CandidateEvent>, Self::Error> {
///         Ok(vec![CandidateEvent::new(EventId(1), "Open mic", [TagId(1)])])
///     }
///
///     fn recent_events(&self, _limit: usize) -> Result<Vec<EventSummary>, Self::Error> {
///         Ok(Vec::new())
///     }
/// }
///
/// let catalogue = SingleEvent;
/// assert_eq!(catalogue.tag_ids().unwrap(), vec![TagId(1)]);
/// ```
pub trait EventCatalogue {
    /// Error raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every tag identifier currently known.
    fn tag_ids(&self) -> Result<Vec<TagId>, Self::Error>;

    /// Return the interest tags recorded for `student`.
    ///
    /// An unknown student has no interests and yields an empty list.
    fn student_interests(&self, student: StudentId) -> Result<Vec<TagId>, Self::Error>;

    /// Return the events `student` may be recommended, with their tags.
    fn candidate_events(&self, student: StudentId) -> Result<Vec<CandidateEvent>, Self::Error>;

    /// Return at most `limit` events, newest first.
    fn recent_events(&self, limit: usize) -> Result<Vec<EventSummary>, Self::Error>;
}

impl<C: EventCatalogue + ?Sized> EventCatalogue for &C {
    type Error = C::Error;

    fn tag_ids(&self) -> Result<Vec<TagId>, Self::Error> {
        (**self).tag_ids()
    }

    fn student_interests(&self, student: StudentId) -> Result<Vec<TagId>, Self::Error> {
        (**self).student_interests(student)
    }

    fn candidate_events(&self, student: StudentId) -> Result<Vec<CandidateEvent>, Self::Error> {
        (**self).candidate_events(student)
    }

    fn recent_events(&self, limit: usize) -> Result<Vec<EventSummary>, Self::Error> {
        (**self).recent_events(limit)
    }
}

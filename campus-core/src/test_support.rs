//! In-memory implementations of the crate's seams for tests.
//!
//! These types perform linear scans and are intended only for small
//! datasets. They are gated behind the `test-support` feature (and
//! `cfg(test)`).

use std::{
    cell::Cell,
    collections::{HashMap, HashSet},
    convert::Infallible,
};

use crate::{
    AuthError, CandidateEvent, EventCatalogue, EventId, EventSummary, SessionVerifier, StudentId,
    TagId, UserContext, UserDirectory,
};

/// In-memory `EventCatalogue`.
///
/// Events are considered created in insertion order, so the most recently
/// added event is the newest. Candidates exclude events the student has
/// responded to.
#[derive(Debug, Default)]
pub struct MemoryCatalogue {
    tags: Vec<TagId>,
    interests: HashMap<StudentId, Vec<TagId>>,
    events: Vec<CandidateEvent>,
    responses: HashMap<StudentId, HashSet<EventId>>,
    candidate_queries: Cell<usize>,
    recent_queries: Cell<usize>,
}

impl MemoryCatalogue {
    /// Add tags to the universe.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Record interest tags for a student.
    #[must_use]
    pub fn with_interests(
        mut self,
        student: StudentId,
        tags: impl IntoIterator<Item = TagId>,
    ) -> Self {
        self.interests.entry(student).or_default().extend(tags);
        self
    }

    /// Append an event; later events are newer.
    #[must_use]
    pub fn with_event(
        mut self,
        id: EventId,
        title: &str,
        tags: impl IntoIterator<Item = TagId>,
    ) -> Self {
        self.events.push(CandidateEvent::new(id, title, tags));
        self
    }

    /// Record that `student` has responded to `event`.
    #[must_use]
    pub fn with_response(mut self, student: StudentId, event: EventId) -> Self {
        self.responses.entry(student).or_default().insert(event);
        self
    }

    /// Number of times candidate events were requested.
    #[must_use]
    pub fn candidate_queries(&self) -> usize {
        self.candidate_queries.get()
    }

    /// Number of times recent events were requested.
    #[must_use]
    pub fn recent_queries(&self) -> usize {
        self.recent_queries.get()
    }
}

impl EventCatalogue for MemoryCatalogue {
    type Error = Infallible;

    fn tag_ids(&self) -> Result<Vec<TagId>, Self::Error> {
        Ok(self.tags.clone())
    }

    fn student_interests(&self, student: StudentId) -> Result<Vec<TagId>, Self::Error> {
        Ok(self.interests.get(&student).cloned().unwrap_or_default())
    }

    fn candidate_events(&self, student: StudentId) -> Result<Vec<CandidateEvent>, Self::Error> {
        self.candidate_queries
            .set(self.candidate_queries.get().saturating_add(1));
        let responded = self.responses.get(&student);
        Ok(self
            .events
            .iter()
            .filter(|event| responded.is_none_or(|ids| !ids.contains(&event.id)))
            .cloned()
            .collect())
    }

    fn recent_events(&self, limit: usize) -> Result<Vec<EventSummary>, Self::Error> {
        self.recent_queries
            .set(self.recent_queries.get().saturating_add(1));
        Ok(self
            .events
            .iter()
            .rev()
            .take(limit)
            .map(|event| EventSummary::new(event.id, event.title.clone()))
            .collect())
    }
}

/// `SessionVerifier` accepting a fixed set of tokens.
#[derive(Debug, Default, Clone)]
pub struct StaticVerifier {
    sessions: HashMap<String, String>,
}

impl StaticVerifier {
    /// Accept `token` as a session for `subject`.
    #[must_use]
    pub fn with_session(mut self, token: &str, subject: &str) -> Self {
        self.sessions.insert(token.to_owned(), subject.to_owned());
        self
    }
}

impl SessionVerifier for StaticVerifier {
    fn verify(&self, token: &str) -> Result<String, AuthError> {
        self.sessions
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

/// `UserDirectory` backed by a map from subject to user.
#[derive(Debug, Default, Clone)]
pub struct MemoryDirectory {
    users: HashMap<String, UserContext>,
}

impl MemoryDirectory {
    /// Register a user under its subject.
    #[must_use]
    pub fn with_user(mut self, user: UserContext) -> Self {
        self.users.insert(user.subject.clone(), user);
        self
    }
}

impl UserDirectory for MemoryDirectory {
    fn find_by_subject(&self, subject: &str) -> Result<Option<UserContext>, AuthError> {
        Ok(self.users.get(subject).cloned())
    }
}

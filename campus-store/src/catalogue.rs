//! SQLite-backed event catalogue.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use campus_core::{
    AuthError, CandidateEvent, EventCatalogue, EventId, EventSummary, Role, StudentId, TagId,
    UserContext, UserDirectory,
};
use log::debug;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use thiserror::Error;

const TAG_IDS_SQL: &str = "SELECT tag_id FROM tag ORDER BY tag_id";

const INTERESTS_SQL: &str =
    "SELECT tag_id FROM student_interests WHERE student_id = ?1 ORDER BY tag_id";

const ALL_CANDIDATES_SQL: &str = "SELECT e.event_id, e.title, et.tag_id
    FROM event e
    JOIN event_tags et ON et.event_id = e.event_id
    ORDER BY e.event_id, et.tag_id";

const UNANSWERED_CANDIDATES_SQL: &str = "SELECT e.event_id, e.title, et.tag_id
    FROM event e
    JOIN event_tags et ON et.event_id = e.event_id
    WHERE NOT EXISTS (
        SELECT 1 FROM rsvps r WHERE r.event_id = e.event_id AND r.student_id = ?1
    )
    ORDER BY e.event_id, et.tag_id";

const RECENT_EVENTS_SQL: &str = "SELECT event_id, title FROM event
    ORDER BY created_at DESC, event_id DESC
    LIMIT ?1";

const USER_BY_SUBJECT_SQL: &str =
    "SELECT user_id, subject, role, student_id FROM users WHERE subject = ?1";

/// Which events count as candidates for a student.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CandidatePolicy {
    /// Every event carrying at least one tag.
    #[default]
    AllEvents,
    /// Tagged events the student has not yet responded to.
    ExcludeResponded,
}

/// Errors raised by [`SqliteCatalogue`].
#[derive(Debug, Error)]
pub enum SqliteCatalogueError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A catalogue query failed.
    #[error("failed to {operation}: {source}")]
    Query {
        /// What the catalogue was doing when the query failed.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored identifier was negative.
    #[error("column {column} holds {value}, which is not a valid identifier")]
    StoredIdOutOfRange {
        /// Column the identifier was read from.
        column: &'static str,
        /// Offending value.
        value: i64,
    },
    /// A student identifier does not fit SQLite's signed integers.
    #[error("student id {id} exceeds the SQLite integer range")]
    StudentIdOutOfRange {
        /// Offending identifier.
        id: u64,
    },
}

/// Read-only catalogue over a campus SQLite database.
///
/// The database must already carry the campus schema; see
/// [`initialise_schema`](crate::initialise_schema).
pub struct SqliteCatalogue {
    connection: Connection,
    policy: CandidatePolicy,
}

impl fmt::Debug for SqliteCatalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalogue")
            .field("path", &self.connection.path())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SqliteCatalogue {
    /// Open the database at `path` read-only.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogueError::OpenDatabase`] when SQLite cannot open
    /// the file.
    pub fn open<P: AsRef<Path>>(
        path: P,
        policy: CandidatePolicy,
    ) -> Result<Self, SqliteCatalogueError> {
        let database_path = path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| SqliteCatalogueError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;
        Ok(Self::from_connection(connection, policy))
    }

    /// Wrap an existing connection.
    #[must_use]
    pub const fn from_connection(connection: Connection, policy: CandidatePolicy) -> Self {
        Self { connection, policy }
    }

    /// Candidate policy in effect.
    #[must_use]
    pub const fn policy(&self) -> CandidatePolicy {
        self.policy
    }

    fn query_tag_column(
        &self,
        operation: &'static str,
        sql: &str,
        student: Option<i64>,
    ) -> Result<Vec<TagId>, SqliteCatalogueError> {
        let query_error = |source| SqliteCatalogueError::Query { operation, source };
        let mut statement = self.connection.prepare_cached(sql).map_err(query_error)?;
        let mut rows = match student {
            Some(id) => statement.query([id]),
            None => statement.query([]),
        }
        .map_err(query_error)?;

        let mut tags = Vec::new();
        while let Some(row) = rows.next().map_err(query_error)? {
            tags.push(TagId(read_id(row, 0, "tag_id", operation)?));
        }
        Ok(tags)
    }
}

impl EventCatalogue for SqliteCatalogue {
    type Error = SqliteCatalogueError;

    fn tag_ids(&self) -> Result<Vec<TagId>, Self::Error> {
        self.query_tag_column("load tag ids", TAG_IDS_SQL, None)
    }

    fn student_interests(&self, student: StudentId) -> Result<Vec<TagId>, Self::Error> {
        let id = student_param(student)?;
        self.query_tag_column("load student interests", INTERESTS_SQL, Some(id))
    }

    fn candidate_events(&self, student: StudentId) -> Result<Vec<CandidateEvent>, Self::Error> {
        const OPERATION: &str = "load candidate events";
        let query_error = |source| SqliteCatalogueError::Query {
            operation: OPERATION,
            source,
        };

        let mut statement;
        let mut rows = match self.policy {
            CandidatePolicy::AllEvents => {
                statement = self
                    .connection
                    .prepare_cached(ALL_CANDIDATES_SQL)
                    .map_err(query_error)?;
                statement.query([])
            }
            CandidatePolicy::ExcludeResponded => {
                let id = student_param(student)?;
                statement = self
                    .connection
                    .prepare_cached(UNANSWERED_CANDIDATES_SQL)
                    .map_err(query_error)?;
                statement.query([id])
            }
        }
        .map_err(query_error)?;

        let mut events: Vec<CandidateEvent> = Vec::new();
        while let Some(row) = rows.next().map_err(query_error)? {
            let event_id = EventId(read_id(row, 0, "event_id", OPERATION)?);
            let tag_id = TagId(read_id(row, 2, "tag_id", OPERATION)?);
            // Rows arrive grouped by event.
            match events.last_mut() {
                Some(current) if current.id == event_id => current.tags.push(tag_id),
                _ => {
                    let title: String = row.get(1).map_err(query_error)?;
                    events.push(CandidateEvent::new(event_id, title, [tag_id]));
                }
            }
        }

        debug!(
            "loaded {} candidate events for student {student} ({:?})",
            events.len(),
            self.policy
        );
        Ok(events)
    }

    fn recent_events(&self, limit: usize) -> Result<Vec<EventSummary>, Self::Error> {
        const OPERATION: &str = "load recent events";
        let query_error = |source| SqliteCatalogueError::Query {
            operation: OPERATION,
            source,
        };

        let bound = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut statement = self
            .connection
            .prepare_cached(RECENT_EVENTS_SQL)
            .map_err(query_error)?;
        let mut rows = statement.query([bound]).map_err(query_error)?;

        let mut events = Vec::new();
        while let Some(row) = rows.next().map_err(query_error)? {
            let id = EventId(read_id(row, 0, "event_id", OPERATION)?);
            let title: String = row.get(1).map_err(query_error)?;
            events.push(EventSummary::new(id, title));
        }
        Ok(events)
    }
}

impl UserDirectory for SqliteCatalogue {
    fn find_by_subject(&self, subject: &str) -> Result<Option<UserContext>, AuthError> {
        let directory_error = |err: rusqlite::Error| AuthError::Directory(err.to_string());
        let mut statement = self
            .connection
            .prepare_cached(USER_BY_SUBJECT_SQL)
            .map_err(directory_error)?;
        let raw = statement
            .query_row([subject], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<i64>>(3)?,
                ))
            })
            .optional()
            .map_err(directory_error)?;

        let Some((raw_user_id, stored_subject, raw_role, raw_student_id)) = raw else {
            return Ok(None);
        };
        let role: Role = raw_role.parse().map_err(AuthError::Directory)?;
        let user_id = u64::try_from(raw_user_id)
            .map_err(|_| AuthError::Directory(format!("invalid user id {raw_user_id}")))?;
        let student_id = raw_student_id
            .map(|id| {
                u64::try_from(id)
                    .map(StudentId)
                    .map_err(|_| AuthError::Directory(format!("invalid student id {id}")))
            })
            .transpose()?;

        Ok(Some(UserContext {
            user_id,
            subject: stored_subject,
            role,
            student_id,
        }))
    }
}

fn student_param(student: StudentId) -> Result<i64, SqliteCatalogueError> {
    i64::try_from(student.0)
        .map_err(|_| SqliteCatalogueError::StudentIdOutOfRange { id: student.0 })
}

fn read_id(
    row: &Row<'_>,
    index: usize,
    column: &'static str,
    operation: &'static str,
) -> Result<u64, SqliteCatalogueError> {
    let value: i64 = row
        .get(index)
        .map_err(|source| SqliteCatalogueError::Query { operation, source })?;
    u64::try_from(value).map_err(|_| SqliteCatalogueError::StoredIdOutOfRange { column, value })
}

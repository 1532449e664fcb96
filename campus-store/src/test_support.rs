//! Fixture helpers that populate a campus database for tests and demos.
//!
//! Each helper issues a single `INSERT` against a connection that already
//! carries the campus schema. The module is compiled for this crate's own
//! tests and behind the `test-support` feature.

use rusqlite::{Connection, params};

/// Insert a tag.
///
/// # Errors
/// Propagates SQLite failures, including unique-name violations.
pub fn insert_tag(connection: &Connection, tag_id: i64, name: &str) -> rusqlite::Result<()> {
    connection
        .execute(
            "INSERT INTO tag (tag_id, tag_name) VALUES (?1, ?2)",
            params![tag_id, name],
        )
        .map(|_| ())
}

/// Insert an event with an explicit creation timestamp.
///
/// # Errors
/// Propagates SQLite failures.
pub fn insert_event(
    connection: &Connection,
    event_id: i64,
    title: &str,
    created_at: &str,
) -> rusqlite::Result<()> {
    connection
        .execute(
            "INSERT INTO event (event_id, title, created_at) VALUES (?1, ?2, ?3)",
            params![event_id, title, created_at],
        )
        .map(|_| ())
}

/// Attach a tag to an event.
///
/// # Errors
/// Propagates SQLite failures, including foreign key violations.
pub fn tag_event(connection: &Connection, event_id: i64, tag_id: i64) -> rusqlite::Result<()> {
    connection
        .execute(
            "INSERT INTO event_tags (event_id, tag_id) VALUES (?1, ?2)",
            params![event_id, tag_id],
        )
        .map(|_| ())
}

/// Insert a student.
///
/// # Errors
/// Propagates SQLite failures, including duplicate e-mail addresses.
pub fn insert_student(connection: &Connection, student_id: i64, email: &str) -> rusqlite::Result<()> {
    connection
        .execute(
            "INSERT INTO student (student_id, email) VALUES (?1, ?2)",
            params![student_id, email],
        )
        .map(|_| ())
}

/// Record an interest tag for a student.
///
/// # Errors
/// Propagates SQLite failures.
pub fn add_interest(connection: &Connection, student_id: i64, tag_id: i64) -> rusqlite::Result<()> {
    connection
        .execute(
            "INSERT INTO student_interests (student_id, tag_id) VALUES (?1, ?2)",
            params![student_id, tag_id],
        )
        .map(|_| ())
}

/// Record a student's response to an event. `status` is `YES`, `NO` or `MAYBE`.
///
/// # Errors
/// Propagates SQLite failures, including unknown statuses.
pub fn record_rsvp(
    connection: &Connection,
    student_id: i64,
    event_id: i64,
    status: &str,
) -> rusqlite::Result<()> {
    connection
        .execute(
            "INSERT INTO rsvps (student_id, event_id, rsvp_status) VALUES (?1, ?2, ?3)",
            params![student_id, event_id, status],
        )
        .map(|_| ())
}

/// Insert a user linked to an identity-provider subject.
///
/// # Errors
/// Propagates SQLite failures.
pub fn insert_user(
    connection: &Connection,
    user_id: i64,
    subject: &str,
    role: &str,
    student_id: Option<i64>,
) -> rusqlite::Result<()> {
    connection
        .execute(
            "INSERT INTO users (user_id, subject, role, student_id) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, subject, role, student_id],
        )
        .map(|_| ())
}

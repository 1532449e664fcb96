//! Schema initialisation for the campus database.
#![forbid(unsafe_code)]

use rusqlite::{Connection, Error as SqliteError, OptionalExtension, Transaction};
use thiserror::Error;

/// Version recorded in `campus_schema_version` by [`initialise_schema`].
pub const SCHEMA_VERSION: i64 = 1;

/// Initialise the campus schema inside an SQLite database.
///
/// The function enables foreign keys, creates the tables and indexes the
/// catalogue reads from, and records the schema version. Running it again on
/// an initialised database is a no-op; a database at a different version is
/// rejected so migrations can be applied explicitly.
///
/// # Errors
/// Returns [`SchemaError`] when a migration step fails or the recorded
/// version does not match [`SCHEMA_VERSION`].
///
/// # Examples
/// ```
/// use rusqlite::Connection;
/// use campus_store::initialise_schema;
///
/// let mut conn = Connection::open_in_memory().expect("create in-memory database");
/// initialise_schema(&mut conn).expect("create campus schema");
///
/// let version: i64 = conn
///     .query_row("SELECT version FROM campus_schema_version LIMIT 1", [], |row| row.get(0))
///     .expect("read schema version");
/// assert_eq!(version, 1);
/// ```
pub fn initialise_schema(connection: &mut Connection) -> Result<(), SchemaError> {
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|source| SchemaError::ForeignKeys { source })?;

    let transaction = connection
        .transaction()
        .map_err(|source| SchemaError::Migration {
            step: "begin schema transaction",
            source,
        })?;

    create_catalogue_tables(&transaction)?;
    create_student_tables(&transaction)?;
    create_indexes(&transaction)?;
    ensure_schema_version(&transaction)?;

    transaction.commit().map_err(|source| SchemaError::Migration {
        step: "commit schema transaction",
        source,
    })?;

    Ok(())
}

fn create_catalogue_tables(transaction: &Transaction<'_>) -> Result<(), SchemaError> {
    run_migration_step(
        transaction,
        "create tag",
        "CREATE TABLE IF NOT EXISTS tag (
            tag_id INTEGER PRIMARY KEY,
            tag_name TEXT NOT NULL UNIQUE CHECK (length(trim(tag_name)) > 0)
        )",
    )?;
    run_migration_step(
        transaction,
        "create event",
        "CREATE TABLE IF NOT EXISTS event (
            event_id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            location TEXT,
            event_date TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        )",
    )?;
    run_migration_step(
        transaction,
        "create event_tags",
        "CREATE TABLE IF NOT EXISTS event_tags (
            event_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (event_id, tag_id),
            FOREIGN KEY (event_id) REFERENCES event(event_id) ON DELETE CASCADE,
            FOREIGN KEY (tag_id) REFERENCES tag(tag_id) ON DELETE CASCADE
        ) WITHOUT ROWID",
    )
}

fn create_student_tables(transaction: &Transaction<'_>) -> Result<(), SchemaError> {
    run_migration_step(
        transaction,
        "create student",
        "CREATE TABLE IF NOT EXISTS student (
            student_id INTEGER PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            fname TEXT,
            lname TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        )",
    )?;
    run_migration_step(
        transaction,
        "create student_interests",
        "CREATE TABLE IF NOT EXISTS student_interests (
            student_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (student_id, tag_id),
            FOREIGN KEY (student_id) REFERENCES student(student_id) ON DELETE CASCADE,
            FOREIGN KEY (tag_id) REFERENCES tag(tag_id) ON DELETE CASCADE
        ) WITHOUT ROWID",
    )?;
    run_migration_step(
        transaction,
        "create rsvps",
        "CREATE TABLE IF NOT EXISTS rsvps (
            student_id INTEGER NOT NULL,
            event_id INTEGER NOT NULL,
            rsvp_status TEXT NOT NULL DEFAULT 'YES'
                CHECK (rsvp_status IN ('YES', 'NO', 'MAYBE')),
            rsvp_time TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
            PRIMARY KEY (student_id, event_id),
            FOREIGN KEY (student_id) REFERENCES student(student_id) ON DELETE CASCADE,
            FOREIGN KEY (event_id) REFERENCES event(event_id) ON DELETE CASCADE
        ) WITHOUT ROWID",
    )?;
    run_migration_step(
        transaction,
        "create users",
        "CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY,
            subject TEXT NOT NULL UNIQUE CHECK (length(trim(subject)) > 0),
            role TEXT NOT NULL CHECK (lower(role) IN ('student', 'admin')),
            student_id INTEGER UNIQUE,
            FOREIGN KEY (student_id) REFERENCES student(student_id) ON DELETE SET NULL
        )",
    )
}

fn create_indexes(transaction: &Transaction<'_>) -> Result<(), SchemaError> {
    run_migration_step(
        transaction,
        "index event recency",
        "CREATE INDEX IF NOT EXISTS idx_event_created_at
            ON event(created_at DESC, event_id DESC)",
    )?;
    run_migration_step(
        transaction,
        "index event_tags by tag",
        "CREATE INDEX IF NOT EXISTS idx_event_tags_tag
            ON event_tags(tag_id, event_id)",
    )?;
    run_migration_step(
        transaction,
        "index rsvps by event",
        "CREATE INDEX IF NOT EXISTS idx_rsvps_event
            ON rsvps(event_id, student_id)",
    )
}

fn ensure_schema_version(transaction: &Transaction<'_>) -> Result<(), SchemaError> {
    run_migration_step(
        transaction,
        "create schema version table",
        "CREATE TABLE IF NOT EXISTS campus_schema_version (
            version INTEGER PRIMARY KEY CHECK (version > 0),
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        ) WITHOUT ROWID",
    )?;

    let existing_version: Option<i64> = transaction
        .query_row(
            "SELECT version FROM campus_schema_version LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|source| SchemaError::Migration {
            step: "read schema version",
            source,
        })?;

    match existing_version {
        Some(version) if version == SCHEMA_VERSION => {}
        Some(found) => {
            return Err(SchemaError::VersionMismatch {
                expected: SCHEMA_VERSION,
                found,
            });
        }
        None => {
            transaction
                .execute(
                    "INSERT INTO campus_schema_version (version) VALUES (?1)",
                    [SCHEMA_VERSION],
                )
                .map_err(|source| SchemaError::Migration {
                    step: "record schema version",
                    source,
                })?;
        }
    }

    Ok(())
}

fn run_migration_step(
    transaction: &Transaction<'_>,
    step: &'static str,
    sql: &str,
) -> Result<(), SchemaError> {
    transaction
        .execute(sql, [])
        .map(|_| ())
        .map_err(|source| SchemaError::Migration { step, source })
}

/// Errors raised when initialising the campus schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Enabling foreign key enforcement failed.
    #[error("failed to enable SQLite foreign keys")]
    ForeignKeys {
        /// Source error from `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A migration statement failed.
    #[error("failed to execute migration step '{step}'")]
    Migration {
        /// Label of the failed step.
        step: &'static str,
        /// Source error from `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// The database was initialised by a different schema version.
    #[error(
        "expected campus schema version {expected} but found {found}; apply migrations before retrying"
    )]
    VersionMismatch {
        /// Version this build understands.
        expected: i64,
        /// Version recorded in the database.
        found: i64,
    },
}

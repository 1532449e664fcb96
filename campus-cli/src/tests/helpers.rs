//! Test helpers for building campus databases on disk.

use camino::Utf8Path;
use campus_store::initialise_schema;
use campus_store::test_support::{
    add_interest, insert_event, insert_student, insert_tag, tag_event,
};
use rusqlite::Connection;

pub(super) const JAZZ_NIGHT: u64 = 10;
pub(super) const HACKATHON: u64 = 11;
pub(super) const FOOTBALL_MATCH: u64 = 12;
pub(super) const UNTAGGED_SOCIAL: u64 = 13;

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).unwrap_or_else(|err| {
        panic!("failed to write {path}: {err}");
    });
}

/// Create a campus database with four events and two students.
///
/// Student 1 likes music and tech; student 2 has no interests.
pub(super) fn seed_campus_database(path: &Utf8Path) {
    let mut connection = Connection::open(path).expect("create database");
    initialise_schema(&mut connection).expect("initialise schema");
    for (id, name) in [(1, "music"), (2, "tech"), (3, "sports")] {
        insert_tag(&connection, id, name).expect("insert tag");
    }
    for (id, title, created_at) in [
        (10, "Jazz night", "2026-03-01T18:00:00Z"),
        (11, "Hackathon", "2026-03-02T09:00:00Z"),
        (12, "Football match", "2026-03-03T15:00:00Z"),
        (13, "Untagged social", "2026-03-04T17:00:00Z"),
    ] {
        insert_event(&connection, id, title, created_at).expect("insert event");
    }
    for (event, tag) in [(10, 1), (11, 1), (11, 2), (12, 3)] {
        tag_event(&connection, event, tag).expect("tag event");
    }
    insert_student(&connection, 1, "ada@example.edu").expect("insert student");
    insert_student(&connection, 2, "grace@example.edu").expect("insert student");
    add_interest(&connection, 1, 1).expect("add interest");
    add_interest(&connection, 1, 2).expect("add interest");
}

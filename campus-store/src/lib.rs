//! SQLite persistence for the Campus recommendation engine.
//!
//! The crate provides two capabilities:
//! - **Schema initialisation** creates the student-event tables the engine
//!   reads from (tags, events, event tags, students, interests, RSVPs and
//!   users) and records a schema version.
//! - **Read access** through [`SqliteCatalogue`], which implements
//!   [`EventCatalogue`](campus_core::EventCatalogue) for recommendation
//!   requests and [`UserDirectory`](campus_core::UserDirectory) for
//!   authorisation.
//!
//! # Examples
//!
//! ```no_run
//! use campus_core::{RecommendationService, StudentId};
//! use campus_store::{CandidatePolicy, SqliteCatalogue};
//!
//! let catalogue = SqliteCatalogue::open("artifacts/campus.db", CandidatePolicy::AllEvents)
//!     .expect("open catalogue");
//! let service = RecommendationService::new(catalogue);
//! let outcome = service.recommend_for(StudentId(1)).expect("recommend");
//! println!("{} events", outcome.events().len());
//! ```

#![forbid(unsafe_code)]

mod catalogue;
mod schema;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalogue::{CandidatePolicy, SqliteCatalogue, SqliteCatalogueError};
pub use schema::{SCHEMA_VERSION, SchemaError, initialise_schema};

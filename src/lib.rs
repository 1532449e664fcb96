//! Facade crate for the Campus recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the SQLite
//! catalogue behind the `store-sqlite` feature flag.

#![forbid(unsafe_code)]

pub use campus_core::{
    AuthError, CandidateEvent, DEFAULT_COLD_START_LIMIT, EventCatalogue, EventId, EventSummary,
    RecommendError, RecommendationService, Recommendations, Recommender, RecommenderConfig, Role,
    ScoredEvent, ServiceError, SessionVerifier, SimilarityError, StudentId, TagId, TagSpace,
    TagVector, UserContext, UserDirectory, authorize, cosine_similarity,
};

#[cfg(feature = "store-sqlite")]
pub use campus_store::{
    CandidatePolicy, SCHEMA_VERSION, SchemaError, SqliteCatalogue, SqliteCatalogueError,
    initialise_schema,
};

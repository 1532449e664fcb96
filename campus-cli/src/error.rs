//! Error types emitted by the Campus CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` throughout.

use std::sync::Arc;

use camino::Utf8PathBuf;
use campus_core::ServiceError;
use campus_store::SqliteCatalogueError;
use thiserror::Error;

/// Errors emitted by the Campus CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the campus database failed.
    #[error(transparent)]
    OpenCatalogue(Box<SqliteCatalogueError>),
    /// Producing recommendations failed.
    #[error("failed to recommend events: {0}")]
    Recommend(#[source] Box<ServiceError<SqliteCatalogueError>>),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Serialising the recommendations failed.
    #[error("failed to serialise recommendations: {0}")]
    SerialiseRecommendations(#[source] serde_json::Error),
    /// Writing the recommendations failed.
    #[error("failed to write recommendations: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<SqliteCatalogueError> for CliError {
    fn from(source: SqliteCatalogueError) -> Self {
        Self::OpenCatalogue(Box::new(source))
    }
}

impl From<ServiceError<SqliteCatalogueError>> for CliError {
    fn from(source: ServiceError<SqliteCatalogueError>) -> Self {
        Self::Recommend(Box::new(source))
    }
}

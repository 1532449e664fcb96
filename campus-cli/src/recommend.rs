//! Recommend command implementation for the Campus CLI.

use camino::{Utf8Path, Utf8PathBuf};
use campus_core::{
    DEFAULT_COLD_START_LIMIT, RecommendationService, RecommenderConfig, ScoredEvent, StudentId,
};
use campus_store::{CandidatePolicy, SqliteCatalogue};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_COLD_START_LIMIT, ARG_DATABASE, ARG_EXCLUDE_RESPONDED, ARG_INCLUDE_ZERO_SCORES,
    ARG_OUTPUT, ARG_STUDENT, CliError, ENV_DATABASE, ENV_STUDENT, fs,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the events in a campus database for one student by \
                 cosine similarity between the student's interest tags and \
                 each event's tags. Students without interests receive the \
                 most recently created events instead.",
    about = "Recommend events for a student"
)]
#[ortho_config(prefix = "CAMPUS")]
pub(crate) struct RecommendArgs {
    /// Path to the campus SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Identifier of the student to recommend events for.
    #[arg(long = ARG_STUDENT, value_name = "id")]
    #[serde(default)]
    pub(crate) student: Option<u64>,
    /// Number of recent events listed when the student has no interests.
    #[arg(long = ARG_COLD_START_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) cold_start_limit: Option<usize>,
    /// Skip events the student has already responded to.
    #[arg(long = ARG_EXCLUDE_RESPONDED)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) exclude_responded: bool,
    /// List every candidate, including those scoring zero.
    #[arg(long = ARG_INCLUDE_ZERO_SCORES)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) include_zero_scores: bool,
    /// Write the JSON output to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    /// Path to the campus SQLite database.
    pub(crate) database: Utf8PathBuf,
    /// Student receiving recommendations.
    pub(crate) student: StudentId,
    /// Recommender settings.
    pub(crate) recommender: RecommenderConfig,
    /// Candidate selection policy.
    pub(crate) policy: CandidatePolicy,
    /// Keep zero-scored candidates in the output.
    pub(crate) include_zero_scores: bool,
    /// Destination file, or stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.database, ARG_DATABASE)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_DATABASE,
        })?;
        let student = args.student.map(StudentId).ok_or(CliError::MissingArgument {
            field: ARG_STUDENT,
            env: ENV_STUDENT,
        })?;
        let policy = if args.exclude_responded {
            CandidatePolicy::ExcludeResponded
        } else {
            CandidatePolicy::AllEvents
        };

        Ok(Self {
            database,
            student,
            recommender: RecommenderConfig {
                cold_start_limit: args.cold_start_limit.unwrap_or(DEFAULT_COLD_START_LIMIT),
            },
            policy,
            include_zero_scores: args.include_zero_scores,
            output: args.output,
        })
    }
}

/// Run `recommend`, writing to the configured output or stdout.
pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let config = resolve_recommend_config(args)?;
    let events = execute_recommend(&config)?;
    match &config.output {
        Some(path) => {
            let mut file =
                fs::create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                    path: path.clone(),
                    source,
                })?;
            write_recommendations(&mut file, &events)
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_recommendations(&mut stdout, &events)
        }
    }
}

/// Run `recommend`, writing to `writer` regardless of `--output`.
pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_recommend_config(args)?;
    let events = execute_recommend(&config)?;
    write_recommendations(writer, &events)
}

fn resolve_recommend_config(args: RecommendArgs) -> Result<RecommendConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_recommend(config: &RecommendConfig) -> Result<Vec<ScoredEvent>, CliError> {
    let catalogue = SqliteCatalogue::open(config.database.as_std_path(), config.policy)?;
    let service = RecommendationService::with_config(catalogue, config.recommender)?;
    let events = if config.include_zero_scores {
        service.score_all_for(config.student)?
    } else {
        service.recommend_for(config.student)?.into_events()
    };
    info!(
        "recommended {} events for student {}",
        events.len(),
        config.student
    );
    Ok(events)
}

fn write_recommendations(writer: &mut dyn Write, events: &[ScoredEvent]) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(events).map_err(CliError::SerialiseRecommendations)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}

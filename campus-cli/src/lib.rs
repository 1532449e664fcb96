//! Command-line interface for the Campus recommendation engine.
#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

mod error;
mod fs;
mod recommend;

pub use error::CliError;
use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_STUDENT: &str = "student";
pub(crate) const ARG_COLD_START_LIMIT: &str = "cold-start-limit";
pub(crate) const ARG_EXCLUDE_RESPONDED: &str = "exclude-responded";
pub(crate) const ARG_INCLUDE_ZERO_SCORES: &str = "include-zero-scores";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_DATABASE: &str = "CAMPUS_CMDS_RECOMMEND_DATABASE";
pub(crate) const ENV_STUDENT: &str = "CAMPUS_CMDS_RECOMMEND_STUDENT";

/// Environment variable holding the log filter directive.
pub const ENV_LOG: &str = "CAMPUS_LOG";

/// Run the Campus CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, the database
/// or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.verbose);
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Also routes `log` records from the library crates.
    if let Err(err) = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("campus: logging unavailable: {err}");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "campus",
    about = "Tag-based event recommendations for campus students",
    version
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend events for a student from a campus database.
    Recommend(RecommendArgs),
}

#[cfg(test)]
mod tests;

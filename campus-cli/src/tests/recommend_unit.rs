//! Focused unit tests covering recommend CLI configuration and output.

use super::helpers::{HACKATHON, JAZZ_NIGHT, seed_campus_database, write_utf8};
use super::*;
use crate::recommend::{
    RecommendArgs, RecommendConfig, config_from_layers_for_test, run_recommend_with,
};
use camino::Utf8PathBuf;
use campus_core::{DEFAULT_COLD_START_LIMIT, EventId, RecommenderConfig, ScoredEvent, StudentId};
use campus_store::CandidatePolicy;
use rstest::rstest;
use tempfile::TempDir;

fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

#[rstest]
#[case(None, Some(1), ARG_DATABASE, ENV_DATABASE)]
#[case(Some(Utf8PathBuf::from("campus.db")), None, ARG_STUDENT, ENV_STUDENT)]
fn converting_without_required_fields_errors(
    #[case] database: Option<Utf8PathBuf>,
    #[case] student: Option<u64>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = RecommendArgs {
        database,
        student,
        ..RecommendArgs::default()
    };
    let err = RecommendConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn conversion_applies_defaults() {
    let args = RecommendArgs {
        database: Some(Utf8PathBuf::from("campus.db")),
        student: Some(4),
        ..RecommendArgs::default()
    };
    let config = RecommendConfig::try_from(args).expect("config should build");
    assert_eq!(
        config,
        RecommendConfig {
            database: Utf8PathBuf::from("campus.db"),
            student: StudentId(4),
            recommender: RecommenderConfig {
                cold_start_limit: DEFAULT_COLD_START_LIMIT,
            },
            policy: CandidatePolicy::AllEvents,
            include_zero_scores: false,
            output: None,
        }
    );
}

#[rstest]
fn exclude_responded_selects_policy() {
    let args = RecommendArgs {
        database: Some(Utf8PathBuf::from("campus.db")),
        student: Some(4),
        exclude_responded: true,
        cold_start_limit: Some(3),
        ..RecommendArgs::default()
    };
    let config = RecommendConfig::try_from(args).expect("config should build");
    assert_eq!(config.policy, CandidatePolicy::ExcludeResponded);
    assert_eq!(config.recommender.cold_start_limit, 3);
}

#[rstest]
fn validate_sources_reports_missing_database() {
    let (_tmp, root) = workspace();
    let config = RecommendConfig::try_from(RecommendArgs {
        database: Some(root.join("missing.db")),
        student: Some(1),
        ..RecommendArgs::default()
    })
    .expect("config should build");

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_DATABASE);
            assert_eq!(path, root.join("missing.db"));
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let (_tmp, root) = workspace();
    let database = root.join("campus.db");
    std::fs::create_dir(&database).expect("database directory");
    let config = RecommendConfig::try_from(RecommendArgs {
        database: Some(database),
        student: Some(1),
        ..RecommendArgs::default()
    })
    .expect("config should build");

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_DATABASE),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn zero_cold_start_limit_is_rejected() {
    let (_tmp, root) = workspace();
    let database = root.join("campus.db");
    seed_campus_database(&database);
    let args = RecommendArgs {
        database: Some(database),
        student: Some(2),
        cold_start_limit: Some(0),
        ..RecommendArgs::default()
    };

    let mut buffer = Vec::new();
    let err = run_recommend_with(args, &mut buffer).expect_err("limit must be positive");
    match err {
        CliError::Recommend(_) => {}
        other => panic!("expected Recommend, found {other:?}"),
    }
    assert!(buffer.is_empty());
}

#[rstest]
fn corrupt_database_reports_catalogue_error() {
    let (_tmp, root) = workspace();
    let database = root.join("campus.db");
    write_utf8(&database, b"not a database");
    let args = RecommendArgs {
        database: Some(database),
        student: Some(1),
        ..RecommendArgs::default()
    };

    let mut buffer = Vec::new();
    let err = run_recommend_with(args, &mut buffer).expect_err("corrupt database");
    assert!(
        matches!(err, CliError::Recommend(_)),
        "unexpected error {err:?}"
    );
    let message = err.to_string();
    assert!(
        message.contains("not a database"),
        "message should carry the SQLite cause: {message}"
    );
    assert!(buffer.is_empty());
}

#[rstest]
fn database_without_campus_tables_names_missing_table() {
    let (_tmp, root) = workspace();
    let database = root.join("other.db");
    let connection = rusqlite::Connection::open(database.as_std_path()).expect("open database");
    connection
        .execute_batch("CREATE TABLE unrelated (value INTEGER);")
        .expect("create unrelated table");
    drop(connection);
    let args = RecommendArgs {
        database: Some(database),
        student: Some(1),
        ..RecommendArgs::default()
    };

    let mut buffer = Vec::new();
    let err = run_recommend_with(args, &mut buffer).expect_err("missing campus tables");
    let message = err.to_string();
    assert!(
        message.starts_with("failed to recommend events: failed to load recommendation inputs"),
        "unexpected message: {message}"
    );
    assert!(
        message.contains("no such table"),
        "message should carry the SQLite cause: {message}"
    );
}

#[rstest]
fn output_is_pretty_json_array() {
    let (_tmp, root) = workspace();
    let database = root.join("campus.db");
    seed_campus_database(&database);
    let args = RecommendArgs {
        database: Some(database),
        student: Some(1),
        ..RecommendArgs::default()
    };

    let mut buffer = Vec::new();
    run_recommend_with(args, &mut buffer).expect("recommend should succeed");
    let stdout = String::from_utf8(buffer).expect("stdout utf-8");
    assert!(stdout.ends_with("]\n"));
    let events: Vec<ScoredEvent> = serde_json::from_str(&stdout).expect("JSON output");
    let ids: Vec<EventId> = events.iter().map(|event| event.event_id).collect();
    assert_eq!(ids, vec![EventId(HACKATHON), EventId(JAZZ_NIGHT)]);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "student": "not-a-number" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "database": "from-file.db",
            "student": 3,
            "cold_start_limit": 8,
        }),
        None,
    );
    composer.push_environment(json!({
        "database": "from-env.db",
    }));
    composer.push_cli(json!({
        "student": 9,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.database, Utf8PathBuf::from("from-env.db"));
    assert_eq!(config.student, StudentId(9));
    assert_eq!(config.recommender.cold_start_limit, 8);
}

#[rstest]
fn parses_recommend_flags() {
    let cli = Cli::try_parse_from([
        "campus",
        "-v",
        "recommend",
        "--database",
        "campus.db",
        "--student",
        "7",
        "--exclude-responded",
        "--include-zero-scores",
        "--output",
        "out.json",
    ])
    .expect("arguments should parse");
    assert_eq!(cli.verbose, 1);
    let Command::Recommend(args) = cli.command;
    assert_eq!(args.database, Some(Utf8PathBuf::from("campus.db")));
    assert_eq!(args.student, Some(7));
    assert!(args.exclude_responded);
    assert!(args.include_zero_scores);
    assert_eq!(args.output, Some(Utf8PathBuf::from("out.json")));
}

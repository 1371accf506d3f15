//! Focused unit tests covering CLI parsing, configuration and command output.

use super::helpers::{SAMPLE_MENU_CSV, Workspace, recommended_ids};
use super::*;
use crate::analyze::{self, AnalyzeConfig, run_analyze_with};
use crate::import::{self, ImportConfig, run_import_with};
use crate::recommend::{self, RecommendConfig, run_recommend_with};
use camino::Utf8PathBuf;
use mealwise_catalog::{UserSession, load_menu, save_session};
use mealwise_core::{RecommendError, Strategy};
use ortho_config::MergeComposer;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

fn recommend_args(catalog: Utf8PathBuf) -> RecommendArgs {
    RecommendArgs {
        catalog: Some(catalog),
        ..RecommendArgs::default()
    }
}

fn capture(run: impl FnOnce(&mut Vec<u8>) -> Result<(), CliError>) -> String {
    let mut buffer = Vec::new();
    run(&mut buffer).expect("command should succeed");
    String::from_utf8(buffer).expect("stdout utf-8")
}

#[rstest]
fn parses_repeated_and_comma_separated_history() {
    let cli = Cli::try_parse_from([
        "mealwise",
        "recommend",
        "--catalog",
        "menu.json",
        "--history",
        "1,3",
        "--history",
        "4",
        "--top-k",
        "2",
    ])
    .expect("arguments should parse");
    let Command::Recommend(args) = cli.command else {
        panic!("expected recommend command");
    };
    assert_eq!(args.history, ["1", "3", "4"]);
    assert_eq!(args.top_k, Some(2));
}

#[rstest]
fn rejects_unknown_subcommands() {
    let err = Cli::try_parse_from(["mealwise", "cook"]).expect_err("unknown subcommand");
    assert!(matches!(CliError::from(err), CliError::ArgumentParsing(_)));
}

#[rstest]
#[case::csv(ImportArgs { csv: None, output: Some("menu.json".into()) }, ARG_IMPORT_CSV, ENV_IMPORT_CSV)]
#[case::output(ImportArgs { csv: Some("menu.csv".into()), output: None }, ARG_IMPORT_OUTPUT, ENV_IMPORT_OUTPUT)]
fn import_requires_both_paths(
    #[case] args: ImportArgs,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let err = ImportConfig::try_from(args).expect_err("missing path should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn recommend_config_applies_defaults() {
    let config = RecommendConfig::try_from(recommend_args("menu.json".into()))
        .expect("config should build");
    assert_eq!(config.top_k, 3);
    assert_eq!(config.strategy, Strategy::Best);
    assert!(config.history.is_empty());
    assert_eq!(config.budget, None);
    assert_eq!(config.seed, None);
}

#[rstest]
fn recommend_config_requires_a_catalog() {
    let err = RecommendConfig::try_from(RecommendArgs::default()).expect_err("missing catalog");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_RECOMMEND_CATALOG);
            assert_eq!(env, ENV_RECOMMEND_CATALOG);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn recommend_config_rejects_unknown_strategies() {
    let args = RecommendArgs {
        strategy: Some(String::from("cheapest")),
        ..recommend_args("menu.json".into())
    };
    let err = RecommendConfig::try_from(args).expect_err("unknown strategy");
    assert!(matches!(err, CliError::InvalidStrategy(_)));
}

#[rstest]
fn analyze_config_defaults_top_n() {
    let args = AnalyzeArgs {
        catalog: Some("menu.json".into()),
        top_n: None,
    };
    let config = AnalyzeConfig::try_from(args).expect("config should build");
    assert_eq!(config.top_n, 3);
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "top_k": "many" }));

    let err = recommend::config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "catalog": "from-file.json",
            "top_k": 5,
            "strategy": "random",
        }),
        None,
    );
    composer.push_environment(json!({ "catalog": "from-env.json" }));
    composer.push_cli(json!({ "strategy": "hybrid" }));

    let config = recommend::config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.catalog, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.top_k, 5);
    assert_eq!(config.strategy, Strategy::Hybrid);
}

#[rstest]
fn import_and_analyze_layers_resolve_paths() {
    let mut composer = MergeComposer::new();
    composer.push_environment(json!({ "csv": "menu.csv", "output": "menu.json" }));
    let config =
        import::config_from_layers_for_test(composer.layers()).expect("import config");
    assert_eq!(config.csv, Utf8PathBuf::from("menu.csv"));
    assert_eq!(config.output, Utf8PathBuf::from("menu.json"));

    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "catalog": "menu.json", "top_n": 1 }), None);
    let config =
        analyze::config_from_layers_for_test(composer.layers()).expect("analyze config");
    assert_eq!(config.top_n, 1);
}

#[rstest]
fn import_writes_catalog_and_reports_skipped_rows(workspace: Workspace) {
    let csv = workspace.write(
        "menu.csv",
        &format!("{SAMPLE_MENU_CSV}7,Mystery Stew,free,300,meat,rich,\n"),
    );
    let output = workspace.path("out/menu.json");
    let args = ImportArgs {
        csv: Some(csv),
        output: Some(output.clone()),
    };

    let stdout = capture(|buffer| run_import_with(args, buffer));
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("report JSON");
    assert_eq!(report["imported"], 6);
    assert_eq!(report["skipped"][0]["row"], 8);
    assert_eq!(load_menu(&output).expect("saved catalog").len(), 6);
}

#[rstest]
fn analyze_summarises_a_csv_catalog(workspace: Workspace) {
    let args = AnalyzeArgs {
        catalog: Some(workspace.sample_csv()),
        top_n: Some(2),
    };
    let stdout = capture(|buffer| run_analyze_with(args, buffer));
    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("summary JSON");
    assert_eq!(summary["total_meals"], 6);
    assert_eq!(summary["avg_price"], 13.0);
    assert_eq!(summary["top_rated"][0]["id"], "1");
    assert_eq!(summary["top_rated"][1]["id"], "3");
    assert_eq!(summary["flavor_counts"]["savory"], 2);
}

#[rstest]
fn analyze_rejects_zero_top_n(workspace: Workspace) {
    let args = AnalyzeArgs {
        catalog: Some(workspace.sample_csv()),
        top_n: Some(0),
    };
    let err = run_analyze_with(args, &mut Vec::new()).expect_err("zero top_n");
    assert!(matches!(err, CliError::Analyze(_)));
}

#[rstest]
fn recommend_ranks_meals_like_the_history(workspace: Workspace) {
    let args = RecommendArgs {
        history: vec![String::from("3")],
        top_k: Some(2),
        ..recommend_args(workspace.sample_csv())
    };
    let stdout = capture(|buffer| run_recommend_with(args, buffer));
    assert_eq!(recommended_ids(&stdout), ["3", "1"]);

    let output: serde_json::Value = serde_json::from_str(&stdout).expect("output JSON");
    assert_eq!(output["strategy"], "best");
    assert!(output["profile"].get("smoky").is_some());
}

#[rstest]
fn recommend_reads_history_and_budget_from_a_session(workspace: Workspace) {
    let session_path = workspace.path("session.json");
    let session = UserSession::new(vec![String::from("2")], Some(10.0)).expect("valid session");
    save_session(&session_path, &session).expect("save session");
    let args = RecommendArgs {
        session: Some(session_path),
        top_k: Some(2),
        ..recommend_args(workspace.sample_csv())
    };
    let stdout = capture(|buffer| run_recommend_with(args, buffer));
    assert_eq!(recommended_ids(&stdout), ["2", "6"]);
}

#[rstest]
fn seeded_random_recommendations_repeat(workspace: Workspace) {
    let csv = workspace.sample_csv();
    let run_once = || {
        let args = RecommendArgs {
            strategy: Some(String::from("random")),
            seed: Some(42),
            top_k: Some(4),
            ..recommend_args(csv.clone())
        };
        capture(|buffer| run_recommend_with(args, buffer))
    };
    let first = run_once();
    assert_eq!(recommended_ids(&first).len(), 4);
    assert_eq!(first, run_once());
}

#[rstest]
#[case::zero_top_k(Some(0), None, RecommendError::InvalidTopK)]
#[case::negative_budget(None, Some(-5.0), RecommendError::NegativeBudget { budget: -5.0 })]
fn recommend_surfaces_request_errors(
    workspace: Workspace,
    #[case] top_k: Option<usize>,
    #[case] budget: Option<f64>,
    #[case] expected: RecommendError,
) {
    let args = RecommendArgs {
        top_k,
        budget,
        ..recommend_args(workspace.sample_csv())
    };
    let err = run_recommend_with(args, &mut Vec::new()).expect_err("invalid request");
    match err {
        CliError::Recommend(source) => assert_eq!(source, expected),
        other => panic!("expected Recommend error, found {other:?}"),
    }
}

#[rstest]
fn missing_catalog_files_are_reported(workspace: Workspace) {
    let args = recommend_args(workspace.path("absent.json"));
    let err = run_recommend_with(args, &mut Vec::new()).expect_err("missing catalog");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_RECOMMEND_CATALOG),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn malformed_json_catalogs_are_reported(workspace: Workspace) {
    let catalog = workspace.write("menu.json", "{ not json");
    let err = run_recommend_with(recommend_args(catalog), &mut Vec::new())
        .expect_err("malformed catalog");
    assert!(matches!(err, CliError::Persist(_)));
}

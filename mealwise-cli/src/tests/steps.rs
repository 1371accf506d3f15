//! Behaviour-driven step definitions driving the CLI scenarios.

use super::helpers::{SAMPLE_MENU_CSV, Workspace, recommended_ids};
use super::*;
use camino::Utf8PathBuf;
use mealwise_catalog::load_menu;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use std::cell::RefCell;

/// Aggregates scenario state so each step only needs the world argument.
#[derive(Debug)]
struct CliWorld {
    workspace: Workspace,
    menu_csv: Utf8PathBuf,
    catalog_json: Utf8PathBuf,
    outputs: RefCell<Vec<String>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CliWorld {
    fn new() -> Self {
        let workspace = Workspace::new();
        let menu_csv = workspace.path("menu.csv");
        let catalog_json = workspace.path("catalog.json");
        Self {
            workspace,
            menu_csv,
            catalog_json,
            outputs: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, argv: &[&str]) {
        let mut invocation = vec![String::from("mealwise")];
        invocation.extend(argv.iter().map(|arg| (*arg).to_owned()));

        let mut buffer = Vec::new();
        let outcome = Cli::try_parse_from(invocation)
            .map_err(CliError::from)
            .and_then(|cli| match cli.command {
                Command::Import(args) => import::run_import_with(args, &mut buffer),
                Command::Recommend(args) => recommend::run_recommend_with(args, &mut buffer),
                Command::Analyze(args) => analyze::run_analyze_with(args, &mut buffer),
            });
        self.outputs
            .borrow_mut()
            .push(String::from_utf8(buffer).expect("stdout utf-8"));
        self.result.replace(Some(outcome));
    }

    fn last_output(&self) -> String {
        self.assert_succeeded();
        self.outputs.borrow().last().cloned().expect("command output")
    }

    fn assert_succeeded(&self) {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
    }

    fn assert_failed(&self, expected: impl FnOnce(&CliError) -> bool) {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        assert!(expected(error), "unexpected error {error:?}");
    }
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::new()
}

#[given("a menu CSV with one unpriced meal")]
fn menu_csv_with_unpriced_meal(#[from(world)] world: &CliWorld) {
    world.workspace.write(
        "menu.csv",
        &format!("{SAMPLE_MENU_CSV}7,Mystery Stew,,300,meat,rich,\n"),
    );
}

#[given("the sample menu CSV")]
fn sample_menu_csv(#[from(world)] world: &CliWorld) {
    world.workspace.sample_csv();
}

#[when("I run the import command")]
fn run_import_command(#[from(world)] world: &CliWorld) {
    world.run(&[
        "import",
        "--csv",
        world.menu_csv.as_str(),
        "--output",
        world.catalog_json.as_str(),
    ]);
}

#[when("I request the two best meals after ordering brisket")]
fn request_best_meals(#[from(world)] world: &CliWorld) {
    world.run(&[
        "recommend",
        "--catalog",
        world.menu_csv.as_str(),
        "--history",
        "3",
        "--top-k",
        "2",
    ]);
}

#[when("I request seeded random meals twice")]
fn request_seeded_random_meals(#[from(world)] world: &CliWorld) {
    for _ in 0..2 {
        world.run(&[
            "recommend",
            "--catalog",
            world.menu_csv.as_str(),
            "--strategy",
            "random",
            "--seed",
            "7",
        ]);
        world.assert_succeeded();
    }
}

#[when("I request meals with an unknown strategy")]
fn request_unknown_strategy(#[from(world)] world: &CliWorld) {
    world.run(&[
        "recommend",
        "--catalog",
        world.menu_csv.as_str(),
        "--strategy",
        "cheapest",
    ]);
}

#[when("I run the analyze command")]
fn run_analyze_command(#[from(world)] world: &CliWorld) {
    world.run(&["analyze", "--catalog", world.menu_csv.as_str()]);
}

#[then("the import report skips one row")]
fn import_report_skips_one_row(#[from(world)] world: &CliWorld) {
    let report: serde_json::Value =
        serde_json::from_str(&world.last_output()).expect("report JSON");
    assert_eq!(report["imported"], 6);
    let skipped = report["skipped"].as_array().expect("skipped rows");
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped.first().map(|row| &row["row"]), Some(&json!(8)));
}

#[then("the saved catalog holds the six valid meals")]
fn saved_catalog_holds_valid_meals(#[from(world)] world: &CliWorld) {
    let menu = load_menu(&world.catalog_json).expect("saved catalog");
    assert_eq!(menu.len(), 6);
    assert!(!menu.contains("7"));
}

#[then("the recommendations are the brisket then the risotto")]
fn recommendations_are_brisket_then_risotto(#[from(world)] world: &CliWorld) {
    assert_eq!(recommended_ids(&world.last_output()), ["3", "1"]);
}

#[then("both runs print the same meals")]
fn both_runs_print_the_same_meals(#[from(world)] world: &CliWorld) {
    let outputs = world.outputs.borrow();
    let [first, second] = outputs.as_slice() else {
        panic!("expected two runs, found {}", outputs.len());
    };
    assert_eq!(recommended_ids(first).len(), 3);
    assert_eq!(first, second);
}

#[then("the command fails because the strategy is unknown")]
fn fails_for_unknown_strategy(#[from(world)] world: &CliWorld) {
    world.assert_failed(|error| matches!(error, CliError::InvalidStrategy(_)));
}

#[then("the summary counts six meals with the risotto rated highest")]
fn summary_counts_meals(#[from(world)] world: &CliWorld) {
    let summary: serde_json::Value =
        serde_json::from_str(&world.last_output()).expect("summary JSON");
    assert_eq!(summary["total_meals"], 6);
    assert_eq!(summary["top_rated"][0]["name"], "Mushroom Risotto");
    assert_eq!(summary["top_rated"].as_array().map(Vec::len), Some(3));
}

#[then("the command fails because the catalog file is missing")]
fn fails_for_missing_catalog(#[from(world)] world: &CliWorld) {
    world.assert_failed(|error| {
        matches!(
            error,
            CliError::MissingSourceFile {
                field: ARG_ANALYZE_CATALOG,
                ..
            }
        )
    });
}

macro_rules! register_cli_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/cli.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CliWorld) {
            let _ = world;
        }
    };
}

register_cli_scenario!(import_menu, "importing a menu CSV with a broken row");
register_cli_scenario!(recommend_best, "recommending meals for a brisket order");
register_cli_scenario!(recommend_seeded, "repeating seeded random recommendations");
register_cli_scenario!(reject_strategy, "rejecting an unknown strategy");
register_cli_scenario!(analyze_menu, "summarising a menu");
register_cli_scenario!(reject_missing_catalog, "rejecting a missing catalog");

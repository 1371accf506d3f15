//! Recommend command implementation for the Mealwise CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::{debug, warn};
use mealwise_catalog::{Menu, load_session};
use mealwise_core::{
    DEFAULT_TOP_K, MenuItem, PreferenceProfile, RecommendRequest, Strategy, learn, recommend,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::catalog::{load_catalog, require_existing};
use crate::output::write_json;
use crate::{
    ARG_RECOMMEND_BUDGET, ARG_RECOMMEND_CATALOG, ARG_RECOMMEND_HISTORY, ARG_RECOMMEND_SEED,
    ARG_RECOMMEND_SESSION, ARG_RECOMMEND_STRATEGY, ARG_RECOMMEND_TOP_K, CliError,
    ENV_RECOMMEND_CATALOG,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Learn a taste profile from previously ordered meal ids and \
                 rank the catalog against it. The random and hybrid \
                 strategies draw from a generator seeded by --seed, so runs \
                 with the same seed repeat exactly.",
    about = "Recommend meals for an order history"
)]
#[ortho_config(prefix = "MEALWISE")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON catalog or menu CSV.
    #[arg(long = ARG_RECOMMEND_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Saved session supplying history and budget when the flags are absent.
    #[arg(long = ARG_RECOMMEND_SESSION, value_name = "path")]
    #[serde(default)]
    pub(crate) session: Option<Utf8PathBuf>,
    /// Previously ordered meal ids, repeated or comma separated.
    #[arg(long = ARG_RECOMMEND_HISTORY, value_name = "id", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) history: Vec<String>,
    /// Spending target per meal.
    #[arg(long = ARG_RECOMMEND_BUDGET, value_name = "amount")]
    #[serde(default)]
    pub(crate) budget: Option<f64>,
    /// Maximum number of meals to return.
    #[arg(long = ARG_RECOMMEND_TOP_K, value_name = "count")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Ranking strategy: best, random or hybrid.
    #[arg(long = ARG_RECOMMEND_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
    /// Seed for the random and hybrid strategies.
    #[arg(long = ARG_RECOMMEND_SEED, value_name = "number")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
///
/// The budget stays unvalidated here because a session file may still
/// supply it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) session: Option<Utf8PathBuf>,
    pub(crate) history: Vec<String>,
    pub(crate) budget: Option<f64>,
    pub(crate) top_k: usize,
    pub(crate) strategy: Strategy,
    pub(crate) seed: Option<u64>,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_RECOMMEND_CATALOG,
            env: ENV_RECOMMEND_CATALOG,
        })?;
        let strategy = args
            .strategy
            .as_deref()
            .map(str::parse::<Strategy>)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            catalog,
            session: args.session,
            history: args.history,
            budget: args.budget,
            top_k: args.top_k.unwrap_or(DEFAULT_TOP_K),
            strategy,
            seed: args.seed,
        })
    }
}

#[derive(Debug, Serialize)]
struct RecommendOutput<'a> {
    strategy: Strategy,
    profile: &'a PreferenceProfile,
    recommendations: Vec<&'a MenuItem>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut config = args.into_config()?;
    require_existing(&config.catalog, ARG_RECOMMEND_CATALOG)?;
    apply_session(&mut config)?;

    let menu = load_catalog(&config.catalog)?;
    warn_unknown_history(&menu, &config.history);
    let profile = learn(menu.items(), &config.history);
    debug!("learned {} preference tokens", profile.len());

    let request = RecommendRequest {
        budget: config.budget,
        top_k: config.top_k,
        strategy: config.strategy,
    };
    let mut rng = config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let recommendations = recommend(menu.items(), &profile, &request, &mut rng)?;

    let output = RecommendOutput {
        strategy: config.strategy,
        profile: &profile,
        recommendations,
    };
    write_json(writer, &output)
}

/// Fill history and budget from the session file where flags left them unset.
fn apply_session(config: &mut RecommendConfig) -> Result<(), CliError> {
    let Some(path) = config.session.as_deref() else {
        return Ok(());
    };
    require_existing(path, ARG_RECOMMEND_SESSION)?;
    let session = load_session(path)?;
    if config.history.is_empty() {
        config.history = session.history;
    }
    if config.budget.is_none() {
        config.budget = session.budget;
    }
    Ok(())
}

fn warn_unknown_history(menu: &Menu, history: &[String]) {
    for id in history.iter().filter(|id| !menu.contains(id)) {
        warn!("ordered meal {id} is not in the catalog; ignoring it");
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}

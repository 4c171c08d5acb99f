/// Dashboard Report - Prints the headline figures for the configured user
///
/// Usage: cargo run --bin dashboard_report [config.toml] <fixtures.json>
///
/// With a single argument the config path is read from CASEBOOK_CONFIG.

use casebook_core::{CasebookConfig, CasebookError, CasebookResult};
use casebook_storage::{FixtureSet, InMemoryStore};
use casebook_views::Workbench;
use chrono::Utc;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("casebook=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&str>) -> CasebookResult<CasebookConfig> {
    let config = match path {
        Some(path) => CasebookConfig::from_path(Path::new(path))?,
        None => CasebookConfig::from_env()?,
    };
    Ok(config)
}

fn run(config_path: Option<&str>, fixtures_path: &str) -> CasebookResult<String> {
    let config = load_config(config_path)?;
    let fixtures = FixtureSet::from_path(Path::new(fixtures_path))?;
    let store = InMemoryStore::from_fixtures(fixtures)?;
    let bench = Workbench::new(store, config)?;

    if bench.current_user().is_none() {
        tracing::warn!(
            user = %bench.config().current_user_id,
            "Configured user is not present in fixtures"
        );
    }

    let report = bench.report(Utc::now());
    serde_json::to_string_pretty(&report)
        .map_err(|e| CasebookError::Fixture(e.into()))
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let (config_path, fixtures_path) = match args.as_slice() {
        [_, fixtures] => (None, fixtures.as_str()),
        [_, config, fixtures] => (Some(config.as_str()), fixtures.as_str()),
        _ => {
            eprintln!("Usage: cargo run --bin dashboard_report [config.toml] <fixtures.json>");
            eprintln!();
            eprintln!("Example:");
            eprintln!("  cargo run --bin dashboard_report casebook.toml fixtures.json");
            std::process::exit(1);
        }
    };

    match run(config_path, fixtures_path) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(error = %e, "Dashboard report failed");
            eprintln!("Failed to build dashboard report: {}", e);
            std::process::exit(1);
        }
    }
}

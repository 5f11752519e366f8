use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};

use cpdocs::api::CodeforcesApi;
use cpdocs::cache::{DifficultyCache, LoadOutcome};
use cpdocs::catalog::{CatalogIndex, CatalogStatus};
use cpdocs::config::Cli;
use cpdocs::docs;
use cpdocs::logging;
use cpdocs::resolve::Resolver;

fn main() {
    if let Err(e) = run() {
        eprintln!("cpdocs error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = &cli.config;
    logging::init(config.log_level)?;

    let files = docs::collect_solutions(&config.solutions_dir)?;
    info!(count = files.len(), dir = %config.solutions_dir.display(), "found solutions");

    let catalog = if config.offline {
        CatalogIndex::unavailable("offline mode")
    } else {
        CatalogIndex::load(&CodeforcesApi::new(config.catalog_url.clone()))
    };
    if let CatalogStatus::Unavailable { reason } = catalog.status() {
        warn!(%reason, "continuing without catalog; unknown problems get search links");
    }

    let (mut cache, outcome) = DifficultyCache::load(&config.cache_file);
    if let LoadOutcome::Loaded { records } = outcome {
        info!(records, "difficulty cache loaded");
    }

    let today = Local::now().date_naive();
    let resolver = Resolver::new(&catalog, today).with_expiry_days(config.expiry_days);

    docs::update_documents(
        &config.targets(cli.cmd),
        &files,
        &resolver,
        &mut cache,
        &config.cache_file,
    )
}

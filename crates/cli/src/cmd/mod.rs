//! CLI command implementations

pub mod adhoc;
pub mod list_expired;
pub mod nightly;

use anyhow::{Context, Result};
use cli_lib::{report, util, Config};
use std::path::Path;
use tsm_core::Cutoffs;

/// Load the config and print the run header
///
/// Cutoffs are fixed here, once per invocation.
fn prepare(config_path: &Path) -> Result<(Config, Cutoffs)> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let cutoffs = config.retention.cutoffs(util::now());
    report::print_header(&cutoffs);

    Ok((config, cutoffs))
}

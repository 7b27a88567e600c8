//! CLI command handlers for `timetabler`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod config;
pub mod pool;
pub mod recommend;

use crate::args::PoolArgs;
use std::path::PathBuf;
use timetabler::config::Config;
use timetabler::core::ingest::parse_offerings_csv;
use timetabler::core::models::CourseOffering;
use timetabler::{error, info};

/// Load the offerings file and apply the pool filters
///
/// The file comes from `config.paths.offerings_file`, which already holds the
/// positional FILE argument when one was given.
pub(crate) fn load_pool(pool_args: &PoolArgs, config: &Config) -> Result<Vec<CourseOffering>, String> {
    if config.paths.offerings_file.is_empty() {
        return Err("✗ No offerings file given and none configured (set `offerings_file`)".to_string());
    }
    let path = PathBuf::from(&config.paths.offerings_file);

    let records = parse_offerings_csv(&path).map_err(|e| {
        error!("Failed to load offerings {}: {e}", path.display());
        format!("✗ Failed to load {}: {e}", path.display())
    })?;
    info!("Loaded {} offering(s) from {}", records.len(), path.display());

    let pool = pool_args.to_filter().apply(&records);
    info!("{} offering(s) left after filtering", pool.len());
    Ok(pool)
}

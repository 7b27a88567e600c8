//! Pool command handler

use crate::args::PoolArgs;
use crate::commands::load_pool;
use timetabler::config::Config;

/// List the offerings a search would run over
///
/// # Errors
/// Returns a printable message if the offerings cannot be loaded
pub fn run(pool_args: &PoolArgs, config: &Config) -> Result<(), String> {
    let pool = load_pool(pool_args, config)?;

    if pool.is_empty() {
        println!("No offerings match the selected filters.");
        return Ok(());
    }

    println!("\n=== Offering Pool ({}) ===\n", pool.len());
    for (idx, offering) in pool.iter().enumerate() {
        println!("{:>3}. {offering}", idx + 1);
    }
    Ok(())
}

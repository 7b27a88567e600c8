//! Recommend command handler
//!
//! Loads offerings, narrows them to the requested pool and renders every
//! conflict-free timetable through the selected strategy.

use crate::args::PoolArgs;
use crate::commands::load_pool;
use std::path::{Path, PathBuf};
use timetabler::config::Config;
use timetabler::core::recommend::Recommender;
use timetabler::core::report::{reporter_for, ReportContext, ReportFormat};
use timetabler::{debug, error, info, verbose};

/// Run the recommend command.
///
/// Search settings (count, strategy, limit, parallel) come from `config`, which
/// already carries this run's CLI overrides.
///
/// # Arguments
/// * `pool_args` - Offering file and pool filters
/// * `format` - Report format
/// * `output` - Optional output file (bare file names land in `paths.out_dir`)
/// * `config` - Effective configuration
///
/// # Errors
/// Returns a printable message when the request is invalid or any step fails
pub fn run(
    pool_args: &PoolArgs,
    format: ReportFormat,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let count = config.search.count;
    if count == 0 {
        return Err("✗ Course count must be at least 1".to_string());
    }
    let kind = config.strategy_kind().map_err(|e| format!("✗ {e}"))?;

    let pool = load_pool(pool_args, config)?;
    verbose!("Searching {} offering(s) for {count}-course timetables", pool.len());

    let recommender = Recommender::new(kind.build(), count)
        .with_limit(config.result_limit())
        .parallel(config.search.parallel);
    let results = recommender.recommend(&pool);
    debug!(
        "Strategy '{}' returned {} result(s)",
        recommender.strategy().name(),
        results.len()
    );

    let ctx = ReportContext::new(&results, recommender.strategy(), count, pool.len());
    let reporter = reporter_for(format);

    match output {
        Some(path) => {
            let path = resolve_output_path(path, &config.paths.out_dir);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    format!("✗ Failed to create output directory {}: {e}", parent.display())
                })?;
            }
            reporter.generate(&ctx, &path).map_err(|e| {
                error!("Report export failed for {}: {e}", path.display());
                format!("✗ Failed to write report {}: {e}", path.display())
            })?;
            info!("Report written to {}", path.display());
            println!("✓ {} ({format}): {}", ctx.summary_line(), path.display());
        }
        None => {
            let rendered = reporter
                .render(&ctx)
                .map_err(|e| format!("✗ Failed to render report: {e}"))?;
            print!("{rendered}");
        }
    }

    Ok(())
}

/// Place bare file names under the configured output directory
fn resolve_output_path(path: &Path, out_dir: &str) -> PathBuf {
    let is_bare = path.parent().map_or(true, |p| p.as_os_str().is_empty());
    if is_bare && !out_dir.is_empty() {
        Path::new(out_dir).join(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_output_goes_to_out_dir() {
        let resolved = resolve_output_path(Path::new("week.md"), "/tmp/out");
        assert_eq!(resolved, PathBuf::from("/tmp/out/week.md"));
    }

    #[test]
    fn test_output_with_directory_is_kept() {
        let resolved = resolve_output_path(Path::new("reports/week.md"), "/tmp/out");
        assert_eq!(resolved, PathBuf::from("reports/week.md"));
    }

    #[test]
    fn test_empty_out_dir_keeps_path() {
        let resolved = resolve_output_path(Path::new("week.md"), "");
        assert_eq!(resolved, PathBuf::from("week.md"));
    }
}

//! Report generation for recommended timetables
//!
//! This module renders search results in several formats (plain text,
//! Markdown, JSON). Rendering a weekly grid is left to external tools; the
//! reports here list each timetable's offerings in selection order.

pub mod formats;

use crate::core::models::ScoredResult;
use crate::core::strategy::Strategy;
use std::error::Error;
use std::fs;
use std::path::Path;

pub use formats::{JsonReporter, MarkdownReporter, ReportFormat, TextReporter};

/// Message shown when a search produced nothing
pub const NO_RESULTS_MESSAGE: &str =
    "No timetable satisfies the selected conditions. Try changing them.";

/// Data context for report generation
///
/// Aggregates everything a report needs so every format renders from the same
/// source.
#[derive(Clone, Copy)]
pub struct ReportContext<'a> {
    /// Results in presentation order
    pub results: &'a [ScoredResult],
    /// Strategy that scored the results
    pub strategy: &'a dyn Strategy,
    /// Courses per timetable
    pub count: usize,
    /// Number of offerings the search ran over
    pub pool_size: usize,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub fn new(
        results: &'a [ScoredResult],
        strategy: &'a dyn Strategy,
        count: usize,
        pool_size: usize,
    ) -> Self {
        Self {
            results,
            strategy,
            count,
            pool_size,
        }
    }

    /// Whether scores are meaningful enough to print
    #[must_use]
    pub fn shows_scores(&self) -> bool {
        self.strategy.ranks_results()
    }

    /// Heading for the result at `idx` (0-based), e.g. "Timetable 1 (total credits: 10)"
    #[must_use]
    pub fn heading(&self, idx: usize) -> String {
        let number = idx + 1;
        match self.results.get(idx) {
            Some(result) if self.shows_scores() => format!(
                "Timetable {number} ({}: {})",
                self.strategy.score_label(),
                result.score
            ),
            _ => format!("Timetable {number}"),
        }
    }

    /// One-line summary of the search
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Found {} timetable(s) of {} course(s) from a pool of {} offering(s) (strategy: {}).",
            self.results.len(),
            self.count,
            self.pool_size,
            self.strategy.name()
        )
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;

    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Text => Box::new(TextReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

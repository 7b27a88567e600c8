//! Plain-text report generator
//!
//! Lists each timetable under a numbered heading with one line per offering,
//! the way results are shown in a terminal.

use crate::core::report::{ReportContext, ReportGenerator, NO_RESULTS_MESSAGE};
use std::error::Error;
use std::fmt::Write;

/// Plain-text report generator
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut out = String::new();

        if ctx.results.is_empty() {
            writeln!(out, "{NO_RESULTS_MESSAGE}")?;
            return Ok(out);
        }

        writeln!(out, "{}", ctx.summary_line())?;
        for (idx, result) in ctx.results.iter().enumerate() {
            writeln!(out, "\n{}", ctx.heading(idx))?;
            write!(out, "{}", result.timetable)?;
        }

        Ok(out)
    }
}

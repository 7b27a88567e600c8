//! JSON report generator
//!
//! Serializes each timetable as the ordered list of its offerings' identifying
//! fields (name, meetings, credit, room, section, professor) with its score.

use crate::core::models::ScoredResult;
use crate::core::report::{ReportContext, ReportGenerator};
use serde::Serialize;
use std::error::Error;

/// Top-level JSON document
#[derive(Serialize)]
struct JsonReport<'a> {
    strategy: &'a str,
    count: usize,
    pool_size: usize,
    results: &'a [ScoredResult],
}

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let report = JsonReport {
            strategy: ctx.strategy.name(),
            count: ctx.count,
            pool_size: ctx.pool_size,
            results: ctx.results,
        };
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}

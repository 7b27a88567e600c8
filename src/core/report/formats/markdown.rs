//! Markdown report generator
//!
//! Generates timetable reports in Markdown format, one table per timetable.
//! These render well in GitHub, GitLab, and VS Code.

use crate::core::models::{CourseOffering, Timetable};
use crate::core::report::{ReportContext, ReportGenerator, NO_RESULTS_MESSAGE};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{strategy}}", ctx.strategy.name());
        output = output.replace("{{count}}", &ctx.count.to_string());
        output = output.replace("{{pool_size}}", &ctx.pool_size.to_string());
        output = output.replace("{{result_count}}", &ctx.results.len().to_string());

        let timetables = if ctx.results.is_empty() {
            format!("_{NO_RESULTS_MESSAGE}_\n")
        } else {
            let mut sections = String::new();
            for (idx, result) in ctx.results.iter().enumerate() {
                let _ = writeln!(sections, "## {}\n", ctx.heading(idx));
                sections.push_str(&Self::generate_timetable_table(&result.timetable));
                sections.push('\n');
            }
            sections
        };
        output = output.replace("{{timetables}}", &timetables);

        output
    }

    /// Generate the offering table for one timetable
    fn generate_timetable_table(timetable: &Timetable) -> String {
        let mut table = String::new();

        table.push_str("| Course | Section | Meetings | Professor | Room | Credit |\n");
        table.push_str("|---|---|---|---|---|---|\n");

        for offering in timetable {
            let _ = writeln!(table, "{}", Self::offering_row(offering));
        }

        table
    }

    fn offering_row(offering: &CourseOffering) -> String {
        let meetings: Vec<String> = offering.meetings.iter().map(ToString::to_string).collect();
        format!(
            "| {} | {} | {} | {} | {} | {} |",
            escape_cell(&offering.name),
            escape_cell(offering.section.as_deref().unwrap_or("-")),
            meetings.join(", "),
            escape_cell(offering.professor.as_deref().unwrap_or("-")),
            escape_cell(offering.room.as_deref().unwrap_or("-")),
            offering.credit
        )
    }
}

/// Escape characters that would break a Markdown table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

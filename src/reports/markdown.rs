//! Markdown report generator.

use super::{GradingReport, ReportError, ReportFormat, ReportGenerator};
use std::fmt::Write;

/// Markdown reporter, suitable for pull request comments
pub struct MarkdownReporter {
    /// Append the console log in a collapsed section
    include_log: bool,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { include_log: true }
    }

    /// Leave out the console log
    #[must_use]
    pub const fn without_log(mut self) -> Self {
        self.include_log = false;
        self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, report: &GradingReport) -> Result<String, ReportError> {
        let score = &report.score;
        let mut md = String::new();

        writeln!(
            md,
            "# Autograding score: {} of {} ({}%)",
            score.total(),
            score.max_total(),
            score.ratio()
        )?;
        writeln!(md)?;

        if let Some(error) = &report.error {
            writeln!(md, "> **Grading aborted:** {error}")?;
            writeln!(md)?;
        }

        if score.is_empty() {
            writeln!(md, "_No category was graded._")?;
        } else {
            writeln!(md, "| Category | Score | Max | Delta |")?;
            writeln!(md, "|----------|------:|----:|------:|")?;
            for result in score.per_category() {
                writeln!(
                    md,
                    "| {} | {} | {} | {:+} |",
                    result.category.title(),
                    result.score,
                    result.max_score,
                    result.delta
                )?;
            }
        }

        if self.include_log && !report.log.is_empty() {
            writeln!(md)?;
            writeln!(md, "<details>")?;
            writeln!(md, "<summary>Console log</summary>")?;
            writeln!(md)?;
            writeln!(md, "```text")?;
            for line in &report.log {
                writeln!(md, "{}", line.replace("```", "'''"))?;
            }
            writeln!(md, "```")?;
            writeln!(md, "</details>")?;
        }

        writeln!(md)?;
        writeln!(md, "_Generated by autograder {}_", report.metadata.tool_version)?;
        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

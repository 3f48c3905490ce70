//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{GradingReport, ReportError, ReportFormat, ReportGenerator};
use crate::grading::ScoreStatus;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Color of a score depending on the achieved percentage.
const fn ratio_color(ratio: i64) -> &'static str {
    if ratio >= 80 {
        "green"
    } else if ratio >= 50 {
        "yellow"
    } else {
        "red"
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &GradingReport) -> Result<String, ReportError> {
        let score = &report.score;
        let mut lines = Vec::new();

        lines.push(self.color("Autograding Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        let achieved = format!(
            "{} / {} ({}%)",
            score.total(),
            score.max_total(),
            score.ratio()
        );
        lines.push(format!(
            "{}  {}",
            self.color("Score:", "cyan"),
            self.color(&achieved, ratio_color(score.ratio()))
        ));

        let status = match score.status() {
            ScoreStatus::Completed => self.color("completed", "green"),
            ScoreStatus::Aborted => self.color("aborted", "red"),
            ScoreStatus::Running => "running".to_string(),
        };
        lines.push(format!("{} {status}", self.color("Status:", "cyan")));

        if score.is_empty() {
            lines.push(String::new());
            lines.push(self.color("No category was graded", "dim"));
        } else {
            lines.push(String::new());
            for result in score.per_category() {
                let name = result.category.title();
                lines.push(format!(
                    "  {name:<20} {:>5} / {:<5} {}",
                    result.score,
                    result.max_score,
                    self.color(&format!("({:+})", result.delta), "dim")
                ));
            }
        }

        if let Some(error) = &report.error {
            lines.push(String::new());
            lines.push(format!("{} {error}", self.color("Error:", "red")));
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::sample_report;

    #[test]
    fn test_summary_lists_categories() {
        let output = SummaryReporter::new()
            .no_color()
            .generate(&sample_report(true))
            .unwrap();

        assert!(output.starts_with("Autograding Summary"));
        assert!(output.contains("Score:  135 / 200 (67%)"));
        assert!(output.contains("Status: completed"));
        assert!(output.contains("Static analysis"));
        assert!(output.contains("(-60)"));
        assert!(output.contains("(-5)"));
        assert!(!output.contains("Error:"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_summary_of_aborted_run() {
        let output = SummaryReporter::new()
            .no_color()
            .generate(&sample_report(false))
            .unwrap();
        assert!(output.contains("Status: aborted"));
        assert!(output.contains(
            "Error: Test scoring has been enabled, but no test results have been found"
        ));
    }

    #[test]
    fn test_colored_output() {
        let output = SummaryReporter::new().generate(&sample_report(true)).unwrap();
        assert!(output.contains("\x1b[33m135 / 200 (67%)\x1b[0m"));
    }
}

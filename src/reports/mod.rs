//! Report generation for grading runs.
//!
//! This module renders a finished (or aborted) grading run:
//! - Summary: Compact shell-friendly output
//! - JSON: Structured data for programmatic integration
//! - Markdown: Pull request comments and job summaries

mod json;
mod markdown;
mod summary;
mod types;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ReportFormat, ReportMetadata};

use crate::grading::{AggregatedScore, GradingRun};
use serde::{Deserialize, Serialize};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Everything a report shows about one grading run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingReport {
    /// Score, complete or partial
    pub score: AggregatedScore,
    /// Console log lines of the run
    #[serde(default)]
    pub log: Vec<String>,
    /// Message of the error that aborted the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Run metadata
    pub metadata: ReportMetadata,
}

impl GradingReport {
    /// Bundle a run with its captured console log.
    #[must_use]
    pub fn from_run(run: GradingRun, log: Vec<String>, metadata: ReportMetadata) -> Self {
        Self {
            error: run.error.as_ref().map(ToString::to_string),
            score: run.score,
            log,
            metadata,
        }
    }

    /// Whether the run was aborted.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.error.is_some()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the report
    fn generate(&self, report: &GradingReport) -> Result<String, ReportError>;

    /// Write report to a writer
    fn write_report(
        &self,
        report: &GradingReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let rendered = self.generate(report)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter(format: ReportFormat, use_color: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    }
}

/// Render a report in the given format without colors.
pub fn render_report(format: ReportFormat, report: &GradingReport) -> Result<String, ReportError> {
    create_reporter(format, false).generate(report)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{GradingReport, ReportMetadata};
    use crate::config::{AnalysisConfiguration, GradingConfig, TestConfiguration};
    use crate::grading::Grader;
    use crate::model::{AnalysisCounts, BaselineSnapshot, SnapshotSet, TestCounts};

    /// Analysis 40/100 and tests 95/100; drop the tests snapshot to abort.
    pub fn sample_report(with_tests: bool) -> GradingReport {
        let config = GradingConfig::builder()
            .analysis(AnalysisConfiguration::default())
            .tests(TestConfiguration::default())
            .build();
        let mut snapshots = SnapshotSet::new().with(
            BaselineSnapshot::analysis("checkstyle", AnalysisCounts::new(6, 0, 0, 0))
                .with_name("CheckStyle"),
        );
        if with_tests {
            snapshots.push(BaselineSnapshot::tests("junit", TestCounts::new(1, 1, 1)));
        }

        let mut log: Vec<String> = Vec::new();
        let run = Grader::new(config).unwrap().run(&snapshots, &mut log);
        GradingReport::from_run(run, log, ReportMetadata::new())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sample_report;
    use super::*;

    #[test]
    fn test_from_run_keeps_error_message() {
        let report = sample_report(false);
        assert!(report.is_aborted());
        assert_eq!(
            report.error.as_deref(),
            Some("Test scoring has been enabled, but no test results have been found")
        );
        assert_eq!(report.score.total(), 40);
    }

    #[test]
    fn test_create_reporter_formats() {
        for format in [ReportFormat::Summary, ReportFormat::Json, ReportFormat::Markdown] {
            assert_eq!(create_reporter(format, false).format(), format);
        }
    }

    #[test]
    fn test_write_report_to_writer() {
        let report = sample_report(true);
        let mut out = Vec::new();
        JsonReporter::new().write_report(&report, &mut out).unwrap();
        let parsed: GradingReport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, report);
    }
}

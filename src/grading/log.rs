//! Console log of a grading run.
//!
//! Downstream tooling greps the build console for these lines, so their
//! format is fixed. Every line starts with [`LOG_PREFIX`].

use crate::model::{AnalysisCounts, Category, MutationCounts, TestCounts};
use std::io::Write;

/// Prefix of every grading log line.
pub const LOG_PREFIX: &str = "[Autograding]";

/// Destination for grading log lines.
pub trait LogSink {
    /// Record one complete line (without trailing newline).
    fn log(&mut self, line: &str);
}

impl<T: LogSink + ?Sized> LogSink for &mut T {
    fn log(&mut self, line: &str) {
        (**self).log(line);
    }
}

/// Captures the lines, e.g. to embed them into a report.
impl LogSink for Vec<String> {
    fn log(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Sends every line to both sinks.
impl<A: LogSink, B: LogSink> LogSink for (A, B) {
    fn log(&mut self, line: &str) {
        self.0.log(line);
        self.1.log(line);
    }
}

/// Forwards lines to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, line: &str) {
        tracing::info!(target: "autograding", "{line}");
    }
}

/// Writes lines to any [`Write`] implementation, such as the build console.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Return the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn log(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            tracing::warn!("Failed to write grading log line: {e}");
        }
    }
}

// ============================================================================
// Line formats
// ============================================================================

pub(crate) fn skipping(category: Category) -> String {
    format!("{LOG_PREFIX} Skipping {category} results")
}

pub(crate) fn grading(category: Category, tool: Option<&str>) -> String {
    match tool {
        Some(tool) => format!("{LOG_PREFIX} Grading {category} results for {tool}"),
        None => format!("{LOG_PREFIX} Grading {category} results"),
    }
}

pub(crate) fn total(category: Category, score: i32) -> String {
    format!("{LOG_PREFIX} Total score for {category} results: {score}")
}

pub(crate) fn analysis_detail(delta: i64, counts: &AnalysisCounts) -> String {
    format!(
        "{LOG_PREFIX} -> Score {delta} (warnings distribution err:{}, high:{}, normal:{}, low:{})",
        counts.error_count, counts.high_count, counts.normal_count, counts.low_count
    )
}

pub(crate) fn tests_detail(delta: i64, counts: &TestCounts) -> String {
    format!(
        "{LOG_PREFIX} -> Score {delta} - from recorded test results: {}, {}, {}, {}",
        counts.total, counts.passed, counts.failed, counts.skipped
    )
}

pub(crate) fn coverage_detail(kind: &str, score: i64, percentage: u32) -> String {
    format!("{LOG_PREFIX} -> Score {score} - from recorded {kind} coverage results: {percentage}%")
}

pub(crate) fn mutation_detail(delta: i64, counts: &MutationCounts, percentage: u32) -> String {
    format!(
        "{LOG_PREFIX} -> Score {delta} - from recorded mutation results: {}, {} ({percentage}% killed)",
        counts.killed, counts.survived
    )
}

//! Grading engine.
//!
//! A [`Grader`] turns a [`SnapshotSet`](crate::model::SnapshotSet) into an
//! [`AggregatedScore`], one [`CategoryResult`] per enabled category, and
//! narrates every step to a [`LogSink`]:
//!
//! ```text
//! [Autograding] Grading static analysis results for CheckStyle
//! [Autograding] -> Score -60 (warnings distribution err:6, high:0, normal:0, low:0)
//! [Autograding] Total score for static analysis results: 40
//! [Autograding] Skipping test results
//! ```

mod aggregate;
mod grader;
mod log;
mod scorer;

pub use aggregate::{AggregatedScore, CategoryResult, ScoreStatus, clamp_score};
pub use grader::{Grader, GradingRun, GradingState};
pub use log::{LOG_PREFIX, LogSink, TracingSink, WriterSink};
pub use scorer::{CategoryScorer, analysis_delta, coverage_score, mutation_delta, tests_delta};

//! **Grade CI builds from their quality signals.**
//!
//! `autograder` turns the normalized results of a build (static analysis
//! warnings, test results, line and branch coverage, mutation coverage) into
//! one integer score, weighted by a user-supplied configuration. Producers
//! reduce their report formats to plain counts; the library never reads
//! checkstyle, JUnit or JaCoCo files itself.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Category`], the per-category count structures and the
//!   [`SnapshotSet`] handed to a grading run.
//! - **[`config`]**: [`GradingConfig`] with the signed impact of every
//!   counted item, loaded from inline JSON or a `.autograding.yaml` file.
//! - **[`grading`]**: the [`Grader`], which scores the categories in a fixed
//!   order into an [`AggregatedScore`] and logs every step.
//! - **[`reports`]**: summary, JSON and Markdown renderings of a run.
//! - **[`pipeline`]**: snapshot loading, output targets and exit codes.
//!
//! ## Getting Started
//!
//! ```
//! use autograder::{AggregatedScore, Grader, GradingConfig};
//! use autograder::model::{AnalysisCounts, BaselineSnapshot, SnapshotSet};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GradingConfig::from_json(
//!         r#"{"analysis": {"maxScore": 100, "errorImpact": -10, "highImpact": -5,
//!                          "normalImpact": -2, "lowImpact": -1}}"#,
//!     )?;
//!     let snapshots = SnapshotSet::new().with(
//!         BaselineSnapshot::analysis("checkstyle", AnalysisCounts::new(6, 0, 0, 0))
//!             .with_name("CheckStyle"),
//!     );
//!
//!     let mut log: Vec<String> = Vec::new();
//!     let score: AggregatedScore = Grader::new(config)?.grade(&snapshots, &mut log)?;
//!
//!     assert_eq!(score.total(), 40);
//!     assert_eq!(log[0], "[Autograding] Grading static analysis results for CheckStyle");
//!     assert_eq!(log[2], "[Autograding] Total score for static analysis results: 40");
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod grading;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{ConfigError, GradingConfig, GradingConfigBuilder, GradingMode, Validatable};
pub use error::{ErrorContext, GradingError, Result};
pub use grading::{
    AggregatedScore, CategoryResult, Grader, GradingRun, GradingState, LogSink, ScoreStatus,
    TracingSink, WriterSink,
};
pub use model::{BaselineSnapshot, Category, RawCounts, SnapshotSet};
pub use pipeline::load_snapshots;
pub use reports::{GradingReport, ReportFormat, ReportGenerator, render_report};

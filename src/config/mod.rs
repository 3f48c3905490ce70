//! Configuration module for autograder.
//!
//! This module provides the grading configuration with:
//! - Type-safe per-category weights
//! - Validation of every numeric field before grading starts
//! - JSON (inline CI argument) and YAML (checked-in file) loading
//! - Config file discovery
//!
//! # Quick Start
//!
//! ```
//! use autograder::config::{GradingConfig, TestConfiguration};
//!
//! // Inline JSON, as passed to the CI step
//! let config = GradingConfig::from_json(
//!     r#"{"tests":{"maxScore":100,"passedImpact":1,"failureImpact":-5,"skippedImpact":-1}}"#,
//! ).unwrap();
//!
//! // Builder
//! let built = GradingConfig::builder()
//!     .tests(TestConfiguration {
//!         passed_impact: 1,
//!         ..TestConfiguration::default()
//!     })
//!     .build();
//!
//! assert_eq!(config, built);
//! ```
//!
//! # Configuration File
//!
//! Place a `.autograding.yaml` file in your project root or
//! `~/.config/autograder/`:
//!
//! ```yaml
//! analysis:
//!   maxScore: 100
//!   errorImpact: -10
//! tests:
//!   maxScore: 100
//!   failureImpact: -5
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AnalysisConfiguration, CategorySettings, CoverageConfiguration, GradingConfig,
    GradingConfigBuilder, GradingMode, MutationConfiguration, TestConfiguration,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    parse_config_str,
};

/// Generate a JSON Schema for the grading configuration format.
///
/// Editors can use it for validation and autocompletion of
/// `.autograding.json` / `.autograding.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(GradingConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

//! Configuration validation for grading runs.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{
    AnalysisConfiguration, CategorySettings, CoverageConfiguration, GradingConfig, GradingMode,
    MutationConfiguration, TestConfiguration,
};
use crate::error::{GradingError, Result};
use serde::Serialize;

// ============================================================================
// Configuration Error
// ============================================================================

/// A single invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    /// Create a validation error for a field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for GradingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(analysis) = &self.analysis {
            errors.extend(analysis.validate());
        }
        if let Some(tests) = &self.tests {
            errors.extend(tests.validate());
        }
        if let Some(coverage) = &self.coverage {
            errors.extend(coverage.validate());
        }
        if let Some(mutation) = &self.mutation {
            errors.extend(mutation.validate());
        }
        errors
    }
}

/// Checks shared by every category.
fn validate_settings(prefix: &str, settings: CategorySettings) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if settings.max_score < 0 {
        errors.push(ConfigError::new(
            format!("{prefix}.maxScore"),
            format!("must not be negative, got {}", settings.max_score),
        ));
    }
    if settings.enabled && settings.grading_mode == GradingMode::Relative {
        tracing::debug!("{prefix}: relative grading requested, scored as absolute");
    }
    errors
}

impl Validatable for AnalysisConfiguration {
    fn validate(&self) -> Vec<ConfigError> {
        validate_settings("analysis", self.settings())
    }
}

impl Validatable for TestConfiguration {
    fn validate(&self) -> Vec<ConfigError> {
        validate_settings("tests", self.settings())
    }
}

impl Validatable for CoverageConfiguration {
    fn validate(&self) -> Vec<ConfigError> {
        validate_settings("coverage", self.settings())
    }
}

impl Validatable for MutationConfiguration {
    fn validate(&self) -> Vec<ConfigError> {
        validate_settings("mutation", self.settings())
    }
}

impl GradingConfig {
    /// Validate and return the configuration, or fail with
    /// [`GradingError::MalformedConfiguration`] listing every invalid field.
    pub fn validated(self) -> Result<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(GradingError::MalformedConfiguration { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        let config = GradingConfig::builder()
            .analysis(AnalysisConfiguration::default())
            .tests(TestConfiguration::default())
            .coverage(CoverageConfiguration::default())
            .mutation(MutationConfiguration::default())
            .build();
        assert!(config.is_valid());
        assert!(config.validated().is_ok());
    }

    #[test]
    fn test_negative_max_score() {
        let config = GradingConfig::builder()
            .tests(TestConfiguration {
                max_score: -1,
                ..TestConfiguration::default()
            })
            .build();

        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "tests.maxScore");
    }

    #[test]
    fn test_validated_collects_all_errors() {
        let config = GradingConfig::builder()
            .analysis(AnalysisConfiguration {
                max_score: -5,
                ..AnalysisConfiguration::default()
            })
            .mutation(MutationConfiguration {
                enabled: false,
                max_score: -1,
                ..MutationConfiguration::default()
            })
            .build();

        match config.validated() {
            Err(GradingError::MalformedConfiguration { errors }) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, ["analysis.maxScore", "mutation.maxScore"]);
            }
            other => panic!("Expected MalformedConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_max_score_is_valid() {
        let config = GradingConfig::builder()
            .coverage(CoverageConfiguration {
                max_score: 0,
                ..CoverageConfiguration::default()
            })
            .build();
        assert!(config.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::new("tests.maxScore", "must not be negative, got -1");
        assert_eq!(err.to_string(), "tests.maxScore: must not be negative, got -1");
    }
}

//! Configuration types for grading runs.
//!
//! The layout mirrors the JSON accepted by the CI step:
//!
//! ```json
//! {"tests": {"maxScore": 100, "passedImpact": 1, "failureImpact": -5, "skippedImpact": -1}}
//! ```
//!
//! A category that is absent from the configuration is disabled. A category
//! key without a value (`tests:` in YAML, `"tests": null` in JSON) enables
//! the category with its default weights.

use crate::error::{GradingError, Result};
use crate::model::Category;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Shared settings
// ============================================================================

/// How a category score is computed from the weighted counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GradingMode {
    /// Score computed against a fixed maximum, independent of earlier builds
    #[default]
    #[serde(alias = "ABSOLUTE", alias = "Absolute")]
    Absolute,
    /// Score relative to a reference build. Accepted, but graded like
    /// [`GradingMode::Absolute`].
    #[serde(alias = "RELATIVE", alias = "Relative")]
    Relative,
}

impl std::fmt::Display for GradingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Relative => write!(f, "relative"),
        }
    }
}

/// Settings every category shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySettings {
    /// Whether the category is graded
    pub enabled: bool,
    /// Upper bound of the category score
    pub max_score: i32,
    /// Grading mode
    pub grading_mode: GradingMode,
}

const fn enabled_by_default() -> bool {
    true
}

// ============================================================================
// Category configurations
// ============================================================================

/// Weights for static analysis warnings. Penalty based: grading starts at
/// `max_score` and applies the impacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnalysisConfiguration {
    /// Grade this category (implicitly true when present)
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Maximum score of the category
    pub max_score: i32,
    /// Impact per warning with error severity
    pub error_impact: i32,
    /// Impact per high severity warning
    pub high_impact: i32,
    /// Impact per normal severity warning
    pub normal_impact: i32,
    /// Impact per low severity warning
    pub low_impact: i32,
    /// Grading mode
    pub grading_mode: GradingMode,
}

impl Default for AnalysisConfiguration {
    fn default() -> Self {
        Self {
            enabled: true,
            max_score: 100,
            error_impact: -10,
            high_impact: -5,
            normal_impact: -2,
            low_impact: -1,
            grading_mode: GradingMode::Absolute,
        }
    }
}

/// Weights for test results. Penalty based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TestConfiguration {
    /// Grade this category (implicitly true when present)
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Maximum score of the category
    pub max_score: i32,
    /// Impact per passed test
    pub passed_impact: i32,
    /// Impact per failed test
    pub failure_impact: i32,
    /// Impact per skipped test
    pub skipped_impact: i32,
    /// Grading mode
    pub grading_mode: GradingMode,
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self {
            enabled: true,
            max_score: 100,
            passed_impact: 0,
            failure_impact: -5,
            skipped_impact: -1,
            grading_mode: GradingMode::Absolute,
        }
    }
}

/// Weights for coverage percentages. Additive: the impacts are applied to
/// the covered and missed percentages of lines and branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CoverageConfiguration {
    /// Grade this category (implicitly true when present)
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Maximum score of the category
    pub max_score: i32,
    /// Impact per covered percent
    pub covered_impact: i32,
    /// Impact per missed percent
    pub missed_impact: i32,
    /// Grading mode
    pub grading_mode: GradingMode,
}

impl Default for CoverageConfiguration {
    fn default() -> Self {
        Self {
            enabled: true,
            max_score: 100,
            covered_impact: 1,
            missed_impact: -1,
            grading_mode: GradingMode::Absolute,
        }
    }
}

/// Weights for mutation results. Additive, applied to the killed and
/// survived percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MutationConfiguration {
    /// Grade this category (implicitly true when present)
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Maximum score of the category
    pub max_score: i32,
    /// Impact per killed percent
    pub killed_impact: i32,
    /// Impact per survived percent
    pub survived_impact: i32,
    /// Grading mode
    pub grading_mode: GradingMode,
}

impl Default for MutationConfiguration {
    fn default() -> Self {
        Self {
            enabled: true,
            max_score: 100,
            killed_impact: 1,
            survived_impact: -1,
            grading_mode: GradingMode::Absolute,
        }
    }
}

macro_rules! impl_settings {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                /// Settings shared by all categories.
                #[must_use]
                pub const fn settings(&self) -> CategorySettings {
                    CategorySettings {
                        enabled: self.enabled,
                        max_score: self.max_score,
                        grading_mode: self.grading_mode,
                    }
                }
            }
        )*
    };
}

impl_settings!(
    AnalysisConfiguration,
    TestConfiguration,
    CoverageConfiguration,
    MutationConfiguration
);

// ============================================================================
// Grading configuration
// ============================================================================

/// User-supplied weighting configuration of a grading run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct GradingConfig {
    /// Static analysis weights
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub analysis: Option<AnalysisConfiguration>,
    /// Test result weights
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub tests: Option<TestConfiguration>,
    /// Coverage weights
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub coverage: Option<CoverageConfiguration>,
    /// Mutation coverage weights
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub mutation: Option<MutationConfiguration>,
}

/// A category key that is present is enabled, even when its value is null.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(|value| Some(value.unwrap_or_default()))
}

impl GradingConfig {
    /// Create an empty configuration (every category disabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `GradingConfig` builder.
    pub fn builder() -> GradingConfigBuilder {
        GradingConfigBuilder::default()
    }

    /// Parse a JSON configuration string as passed to the CI step.
    ///
    /// Syntax errors and unknown keys are reported as
    /// [`GradingError::MalformedConfiguration`].
    pub fn from_json(json: &str) -> Result<Self> {
        let trimmed = json.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(trimmed).map_err(|e| GradingError::malformed("<json>", e.to_string()))
    }

    /// Shared settings of a configured category, `None` if absent.
    #[must_use]
    pub fn settings(&self, category: Category) -> Option<CategorySettings> {
        match category {
            Category::Analysis => self.analysis.as_ref().map(AnalysisConfiguration::settings),
            Category::Tests => self.tests.as_ref().map(TestConfiguration::settings),
            Category::Coverage => self.coverage.as_ref().map(CoverageConfiguration::settings),
            Category::Mutation => self.mutation.as_ref().map(MutationConfiguration::settings),
        }
    }

    /// Whether a category is present and enabled.
    #[must_use]
    pub fn is_enabled(&self, category: Category) -> bool {
        self.settings(category).is_some_and(|s| s.enabled)
    }

    /// Enabled categories in grading order.
    pub fn enabled_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(|category| self.is_enabled(*category))
    }

    /// Sum of the maximum scores of all enabled categories.
    #[must_use]
    pub fn max_total(&self) -> i64 {
        self.enabled_categories()
            .filter_map(|category| self.settings(category))
            .map(|s| i64::from(s.max_score))
            .sum()
    }
}

// ============================================================================
// Builder for GradingConfig
// ============================================================================

/// Builder for constructing `GradingConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct GradingConfigBuilder {
    config: GradingConfig,
}

impl GradingConfigBuilder {
    /// Enable static analysis grading.
    pub fn analysis(mut self, analysis: AnalysisConfiguration) -> Self {
        self.config.analysis = Some(analysis);
        self
    }

    /// Enable test grading.
    pub fn tests(mut self, tests: TestConfiguration) -> Self {
        self.config.tests = Some(tests);
        self
    }

    /// Enable coverage grading.
    pub fn coverage(mut self, coverage: CoverageConfiguration) -> Self {
        self.config.coverage = Some(coverage);
        self
    }

    /// Enable mutation coverage grading.
    pub fn mutation(mut self, mutation: MutationConfiguration) -> Self {
        self.config.mutation = Some(mutation);
        self
    }

    /// Build the `GradingConfig`.
    #[must_use]
    pub fn build(self) -> GradingConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_disables_everything() {
        let config = GradingConfig::from_json("{}").unwrap();
        assert_eq!(config, GradingConfig::default());
        assert_eq!(config.enabled_categories().count(), 0);
        assert_eq!(config.max_total(), 0);
    }

    #[test]
    fn test_null_category_uses_defaults() {
        let config = GradingConfig::from_json(r#"{"tests": null}"#).unwrap();
        assert_eq!(config.tests, Some(TestConfiguration::default()));
        assert!(config.is_enabled(Category::Tests));
        assert!(!config.is_enabled(Category::Analysis));
    }

    #[test]
    fn test_blank_string_is_empty_config() {
        assert_eq!(GradingConfig::from_json("  ").unwrap(), GradingConfig::default());
    }

    #[test]
    fn test_parse_tests_configuration() {
        let config = GradingConfig::from_json(
            r#"{"tests":{"maxScore":100,"passedImpact":1,"failureImpact":-5,"skippedImpact":-1}}"#,
        )
        .unwrap();

        let tests = config.tests.as_ref().unwrap();
        assert!(tests.enabled);
        assert_eq!(tests.max_score, 100);
        assert_eq!(tests.passed_impact, 1);
        assert_eq!(tests.failure_impact, -5);
        assert_eq!(tests.skipped_impact, -1);
        assert_eq!(tests.grading_mode, GradingMode::Absolute);

        assert!(config.is_enabled(Category::Tests));
        assert!(!config.is_enabled(Category::Analysis));
    }

    #[test]
    fn test_missing_impacts_default_to_declared_defaults() {
        let config = GradingConfig::from_json(r#"{"coverage":{"maxScore":50}}"#).unwrap();
        let coverage = config.coverage.unwrap();
        assert_eq!(coverage.max_score, 50);
        assert_eq!(coverage.covered_impact, 1);
        assert_eq!(coverage.missed_impact, -1);
    }

    #[test]
    fn test_explicitly_disabled_category() {
        let config =
            GradingConfig::from_json(r#"{"mutation":{"enabled":false,"maxScore":10}}"#).unwrap();
        assert!(config.settings(Category::Mutation).is_some());
        assert!(!config.is_enabled(Category::Mutation));
    }

    #[test]
    fn test_grading_mode_parsing() {
        let config = GradingConfig::from_json(
            r#"{"analysis":{"maxScore":10,"gradingMode":"relative"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.settings(Category::Analysis).unwrap().grading_mode,
            GradingMode::Relative
        );
    }

    #[test]
    fn test_unknown_keys_are_malformed() {
        let err = GradingConfig::from_json(r#"{"pit":{"maxScore":10}}"#).unwrap_err();
        assert!(matches!(err, GradingError::MalformedConfiguration { .. }));

        let err = GradingConfig::from_json(r#"{"tests":{"failuresImpact":-1}}"#).unwrap_err();
        assert!(err.to_string().contains("failuresImpact"));
    }

    #[test]
    fn test_syntax_error_is_malformed() {
        let err = GradingConfig::from_json(r#"{"tests":"#).unwrap_err();
        assert!(matches!(err, GradingError::MalformedConfiguration { .. }));
    }

    #[test]
    fn test_builder_and_max_total() {
        let config = GradingConfig::builder()
            .analysis(AnalysisConfiguration::default())
            .coverage(CoverageConfiguration {
                max_score: 50,
                ..CoverageConfiguration::default()
            })
            .mutation(MutationConfiguration {
                enabled: false,
                ..MutationConfiguration::default()
            })
            .build();

        let enabled: Vec<_> = config.enabled_categories().collect();
        assert_eq!(enabled, [Category::Analysis, Category::Coverage]);
        assert_eq!(config.max_total(), 150);
    }

    #[test]
    fn test_serialization_omits_absent_categories() {
        let config = GradingConfig::builder()
            .tests(TestConfiguration::default())
            .build();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("tests").is_some());
        assert!(json.get("analysis").is_none());
        assert_eq!(json["tests"]["failureImpact"], -5);
    }
}

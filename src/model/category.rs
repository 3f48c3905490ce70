//! Grading categories.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A quality-signal domain with its own scoring rule.
///
/// The declaration order is the grading order: a run always visits
/// categories as listed in [`Category::ALL`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Static analysis warnings
    Analysis,
    /// Unit/integration test results
    Tests,
    /// Line and branch coverage
    Coverage,
    /// Mutation coverage
    Mutation,
}

impl Category {
    /// All categories in grading order.
    pub const ALL: [Self; 4] = [Self::Analysis, Self::Tests, Self::Coverage, Self::Mutation];

    /// Stable identifier used in configuration and JSON output.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Tests => "tests",
            Self::Coverage => "coverage",
            Self::Mutation => "mutation",
        }
    }

    /// Human-readable name used in console log lines.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Analysis => "static analysis",
            Self::Tests => "test",
            Self::Coverage => "coverage",
            Self::Mutation => "mutation coverage",
        }
    }

    /// Capitalized name for sentence starts in diagnostics.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Analysis => "Static analysis",
            Self::Tests => "Test",
            Self::Coverage => "Coverage",
            Self::Mutation => "Mutation coverage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grading_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert_eq!(Category::ALL[0], Category::Analysis);
        assert_eq!(Category::ALL[3], Category::Mutation);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Category::Analysis.to_string(), "static analysis");
        assert_eq!(Category::Mutation.to_string(), "mutation coverage");
        assert_eq!(Category::Tests.title(), "Test");
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Category::Mutation).unwrap();
        assert_eq!(json, "\"mutation\"");
        let parsed: Category = serde_json::from_str("\"analysis\"").unwrap();
        assert_eq!(parsed, Category::Analysis);
    }
}

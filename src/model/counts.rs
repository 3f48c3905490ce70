//! Normalized raw counts, one shape per grading category.
//!
//! Producers (report parsers, CI plugins) reduce their report formats to
//! these structures before grading. All counts are non-negative and never
//! change once captured.

use super::Category;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

/// Warning distribution of one static analysis report.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnalysisCounts {
    /// Warnings with error severity
    pub error_count: u32,
    /// High severity warnings
    pub high_count: u32,
    /// Normal severity warnings
    pub normal_count: u32,
    /// Low severity warnings
    pub low_count: u32,
    /// Total number of warnings as reported by the tool
    pub total_count: u32,
}

impl AnalysisCounts {
    /// Create a distribution whose total is the sum of all severities.
    #[must_use]
    pub const fn new(errors: u32, high: u32, normal: u32, low: u32) -> Self {
        Self {
            error_count: errors,
            high_count: high,
            normal_count: normal,
            low_count: low,
            total_count: errors.saturating_add(high).saturating_add(normal).saturating_add(low),
        }
    }
}

impl Add for AnalysisCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            error_count: self.error_count.saturating_add(rhs.error_count),
            high_count: self.high_count.saturating_add(rhs.high_count),
            normal_count: self.normal_count.saturating_add(rhs.normal_count),
            low_count: self.low_count.saturating_add(rhs.low_count),
            total_count: self.total_count.saturating_add(rhs.total_count),
        }
    }
}

/// Recorded test results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(default, deny_unknown_fields)]
pub struct TestCounts {
    /// Total number of tests
    pub total: u32,
    /// Passed tests
    pub passed: u32,
    /// Failed tests
    pub failed: u32,
    /// Skipped tests
    pub skipped: u32,
}

impl TestCounts {
    /// Create test counts, deriving the total.
    #[must_use]
    pub const fn new(passed: u32, failed: u32, skipped: u32) -> Self {
        Self {
            total: passed.saturating_add(failed).saturating_add(skipped),
            passed,
            failed,
            skipped,
        }
    }

    /// Whether `total == passed + failed + skipped`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        u64::from(self.passed) + u64::from(self.failed) + u64::from(self.skipped)
            == u64::from(self.total)
    }
}

impl Add for TestCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total: self.total.saturating_add(rhs.total),
            passed: self.passed.saturating_add(rhs.passed),
            failed: self.failed.saturating_add(rhs.failed),
            skipped: self.skipped.saturating_add(rhs.skipped),
        }
    }
}

/// Recorded line and branch coverage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CoverageCounts {
    /// Covered lines
    pub covered_lines: u32,
    /// Missed lines
    pub missed_lines: u32,
    /// Covered branches
    pub covered_branches: u32,
    /// Missed branches
    pub missed_branches: u32,
}

impl CoverageCounts {
    /// Line coverage in percent, `None` if no lines were recorded.
    #[must_use]
    pub fn line_percentage(&self) -> Option<u32> {
        percentage(self.covered_lines, self.missed_lines)
    }

    /// Branch coverage in percent, `None` if no branches were recorded.
    #[must_use]
    pub fn branch_percentage(&self) -> Option<u32> {
        percentage(self.covered_branches, self.missed_branches)
    }
}

impl Add for CoverageCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            covered_lines: self.covered_lines.saturating_add(rhs.covered_lines),
            missed_lines: self.missed_lines.saturating_add(rhs.missed_lines),
            covered_branches: self.covered_branches.saturating_add(rhs.covered_branches),
            missed_branches: self.missed_branches.saturating_add(rhs.missed_branches),
        }
    }
}

/// Recorded mutation testing results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(default, deny_unknown_fields)]
pub struct MutationCounts {
    /// Mutations detected by the test suite
    pub killed: u32,
    /// Mutations that went undetected
    pub survived: u32,
}

impl MutationCounts {
    /// Percentage of killed mutations, `None` if no mutations were generated.
    #[must_use]
    pub fn killed_percentage(&self) -> Option<u32> {
        percentage(self.killed, self.survived)
    }
}

impl Add for MutationCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            killed: self.killed.saturating_add(rhs.killed),
            survived: self.survived.saturating_add(rhs.survived),
        }
    }
}

macro_rules! impl_sum {
    ($($ty:ty),*) => {
        $(
            impl Sum for $ty {
                fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                    iter.fold(Self::default(), Add::add)
                }
            }
        )*
    };
}

impl_sum!(AnalysisCounts, TestCounts, CoverageCounts, MutationCounts);

/// Raw counts of a single report, tagged by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RawCounts {
    /// Static analysis warning distribution
    Analysis(AnalysisCounts),
    /// Test results
    Tests(TestCounts),
    /// Line and branch coverage
    Coverage(CoverageCounts),
    /// Mutation results
    Mutation(MutationCounts),
}

impl RawCounts {
    /// The category these counts belong to.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Analysis(_) => Category::Analysis,
            Self::Tests(_) => Category::Tests,
            Self::Coverage(_) => Category::Coverage,
            Self::Mutation(_) => Category::Mutation,
        }
    }
}

/// Integer percentage of `covered` in `covered + missed`, rounded half up.
///
/// Returns `None` when there is nothing to measure.
#[must_use]
pub fn percentage(covered: u32, missed: u32) -> Option<u32> {
    let total = u64::from(covered) + u64::from(missed);
    if total == 0 {
        return None;
    }
    let scaled = (u64::from(covered) * 200 + total) / (total * 2);
    // covered <= total, so the result is at most 100
    u32::try_from(scaled).ok()
}

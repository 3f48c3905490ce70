//! Per-category scoring.
//!
//! Every category maps its raw counts and weights to a [`CategoryResult`]:
//!
//! ```text
//! delta     = Σ impact_i × count_i
//! raw score = max_score + delta        (analysis, tests: penalty based)
//! raw score = Σ impact_i × percent_i   (coverage, mutation: additive)
//! score     = clamp(raw score, 0, max_score)
//! ```
//!
//! Coverage and mutation weigh percentages instead of counts, so their
//! impacts already encode the full scale and no baseline is added.

use super::aggregate::CategoryResult;
use super::log::{self, LogSink};
use crate::config::{
    AnalysisConfiguration, CategorySettings, CoverageConfiguration, GradingConfig, GradingMode,
    MutationConfiguration, TestConfiguration,
};
use crate::error::{GradingError, Result};
use crate::model::{
    AnalysisCounts, Category, CoverageCounts, MutationCounts, RawCounts, SnapshotSet, TestCounts,
};

/// Scoring rule of one category, paired with its configuration.
#[derive(Debug, Clone, Copy)]
pub enum CategoryScorer<'a> {
    /// Static analysis warnings (penalty based)
    Analysis(&'a AnalysisConfiguration),
    /// Test results (penalty based)
    Tests(&'a TestConfiguration),
    /// Line and branch coverage (additive)
    Coverage(&'a CoverageConfiguration),
    /// Mutation coverage (additive)
    Mutation(&'a MutationConfiguration),
}

impl<'a> CategoryScorer<'a> {
    /// Scorer for a category, `None` if the configuration does not mention it.
    #[must_use]
    pub fn for_category(config: &'a GradingConfig, category: Category) -> Option<Self> {
        match category {
            Category::Analysis => config.analysis.as_ref().map(Self::Analysis),
            Category::Tests => config.tests.as_ref().map(Self::Tests),
            Category::Coverage => config.coverage.as_ref().map(Self::Coverage),
            Category::Mutation => config.mutation.as_ref().map(Self::Mutation),
        }
    }

    /// The category this scorer grades.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Analysis(_) => Category::Analysis,
            Self::Tests(_) => Category::Tests,
            Self::Coverage(_) => Category::Coverage,
            Self::Mutation(_) => Category::Mutation,
        }
    }

    /// Shared settings of the configuration.
    #[must_use]
    pub const fn settings(&self) -> CategorySettings {
        match self {
            Self::Analysis(config) => config.settings(),
            Self::Tests(config) => config.settings(),
            Self::Coverage(config) => config.settings(),
            Self::Mutation(config) => config.settings(),
        }
    }

    /// Score the category from the recorded snapshots.
    ///
    /// Fails with [`GradingError::DataUnavailable`] if no snapshot of the
    /// category was recorded. Header and detail lines go to `sink`; the
    /// category total is logged by the grader.
    pub fn score(&self, snapshots: &SnapshotSet, sink: &mut dyn LogSink) -> Result<CategoryResult> {
        let category = self.category();
        if !snapshots.has(category) {
            return Err(GradingError::data_unavailable(category));
        }
        if self.settings().grading_mode == GradingMode::Relative {
            tracing::warn!(
                "Relative grading is not supported yet, grading {category} results in absolute mode"
            );
        }

        let result = match self {
            Self::Analysis(config) => score_analysis(config, snapshots, sink),
            Self::Tests(config) => score_tests(config, snapshots, sink),
            Self::Coverage(config) => score_coverage(config, snapshots, sink),
            Self::Mutation(config) => score_mutation(config, snapshots, sink),
        };

        if let Some(result) = &result {
            tracing::debug!(
                "{category}: delta {}, score {}/{}",
                result.delta,
                result.score,
                result.max_score
            );
        }
        result.ok_or_else(|| GradingError::data_unavailable(category))
    }
}

// ============================================================================
// Weighting
// ============================================================================

/// Signed contribution of `count` items with the given impact.
fn weighted(impact: i32, count: u32) -> i64 {
    i64::from(impact) * i64::from(count)
}

fn sum(values: impl IntoIterator<Item = i64>) -> i64 {
    values.into_iter().fold(0, i64::saturating_add)
}

/// Delta of one static analysis report.
#[must_use]
pub fn analysis_delta(config: &AnalysisConfiguration, counts: &AnalysisCounts) -> i64 {
    sum([
        weighted(config.error_impact, counts.error_count),
        weighted(config.high_impact, counts.high_count),
        weighted(config.normal_impact, counts.normal_count),
        weighted(config.low_impact, counts.low_count),
    ])
}

/// Delta of recorded test results.
#[must_use]
pub fn tests_delta(config: &TestConfiguration, counts: &TestCounts) -> i64 {
    sum([
        weighted(config.passed_impact, counts.passed),
        weighted(config.failure_impact, counts.failed),
        weighted(config.skipped_impact, counts.skipped),
    ])
}

/// Score of one coverage kind (lines or branches) at the given percentage.
#[must_use]
pub fn coverage_score(config: &CoverageConfiguration, covered_percentage: u32) -> i64 {
    let covered = covered_percentage.min(100);
    sum([
        weighted(config.covered_impact, covered),
        weighted(config.missed_impact, 100 - covered),
    ])
}

/// Delta of mutation results at the given killed percentage.
#[must_use]
pub fn mutation_delta(config: &MutationConfiguration, killed_percentage: u32) -> i64 {
    let killed = killed_percentage.min(100);
    sum([
        weighted(config.killed_impact, killed),
        weighted(config.survived_impact, 100 - killed),
    ])
}

// ============================================================================
// Category rules
// ============================================================================

fn score_analysis(
    config: &AnalysisConfiguration,
    snapshots: &SnapshotSet,
    sink: &mut dyn LogSink,
) -> Option<CategoryResult> {
    let mut delta = 0_i64;
    let mut merged: Option<AnalysisCounts> = None;

    for (snapshot, counts) in snapshots.analysis() {
        let tool_delta = analysis_delta(config, &counts);
        sink.log(&log::grading(Category::Analysis, Some(snapshot.display_name())));
        sink.log(&log::analysis_detail(tool_delta, &counts));

        delta = delta.saturating_add(tool_delta);
        merged = Some(merged.map_or(counts, |total| total + counts));
    }

    let counts = merged?;
    let raw_score = i64::from(config.max_score).saturating_add(delta);
    Some(CategoryResult::new(
        Category::Analysis,
        RawCounts::Analysis(counts),
        delta,
        raw_score,
        config.max_score,
    ))
}

fn score_tests(
    config: &TestConfiguration,
    snapshots: &SnapshotSet,
    sink: &mut dyn LogSink,
) -> Option<CategoryResult> {
    let counts = snapshots.tests()?;
    let delta = tests_delta(config, &counts);
    sink.log(&log::grading(Category::Tests, None));
    sink.log(&log::tests_detail(delta, &counts));

    let raw_score = i64::from(config.max_score).saturating_add(delta);
    Some(CategoryResult::new(
        Category::Tests,
        RawCounts::Tests(counts),
        delta,
        raw_score,
        config.max_score,
    ))
}

fn score_coverage(
    config: &CoverageConfiguration,
    snapshots: &SnapshotSet,
    sink: &mut dyn LogSink,
) -> Option<CategoryResult> {
    let counts: CoverageCounts = snapshots.coverage()?;
    sink.log(&log::grading(Category::Coverage, None));

    let mut raw_score = 0_i64;
    for (kind, percentage) in [
        ("line", counts.line_percentage()),
        ("branch", counts.branch_percentage()),
    ] {
        match percentage {
            Some(percentage) => {
                let score = coverage_score(config, percentage);
                sink.log(&log::coverage_detail(kind, score, percentage));
                raw_score = raw_score.saturating_add(score);
            }
            None => tracing::debug!("No {kind} coverage recorded, nothing to grade"),
        }
    }

    Some(CategoryResult::new(
        Category::Coverage,
        RawCounts::Coverage(counts),
        raw_score,
        raw_score,
        config.max_score,
    ))
}

fn score_mutation(
    config: &MutationConfiguration,
    snapshots: &SnapshotSet,
    sink: &mut dyn LogSink,
) -> Option<CategoryResult> {
    let counts: MutationCounts = snapshots.mutation()?;
    sink.log(&log::grading(Category::Mutation, None));

    let delta = match counts.killed_percentage() {
        Some(percentage) => {
            let delta = mutation_delta(config, percentage);
            sink.log(&log::mutation_detail(delta, &counts, percentage));
            delta
        }
        None => {
            tracing::debug!("No mutations recorded, nothing to grade");
            0
        }
    };

    Some(CategoryResult::new(
        Category::Mutation,
        RawCounts::Mutation(counts),
        delta,
        delta,
        config.max_score,
    ))
}

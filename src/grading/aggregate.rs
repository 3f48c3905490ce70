//! Accumulation of category results into the total score.

use crate::model::{Category, RawCounts};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Score of one graded category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    /// The graded category
    pub category: Category,
    /// Score after clamping, within `[0, max_score]`
    pub score: i32,
    /// Configured maximum score
    pub max_score: i32,
    /// Signed change computed from the weighted counts
    pub delta: i64,
    /// Counts the score was computed from
    pub counts: RawCounts,
}

impl CategoryResult {
    pub(crate) fn new(
        category: Category,
        counts: RawCounts,
        delta: i64,
        raw_score: i64,
        max_score: i32,
    ) -> Self {
        Self {
            category,
            score: clamp_score(raw_score, max_score),
            max_score,
            delta,
            counts,
        }
    }
}

/// Restrict a raw score to `[0, max_score]`.
#[must_use]
pub fn clamp_score(raw_score: i64, max_score: i32) -> i32 {
    let upper = max_score.max(0);
    let clamped = raw_score.clamp(0, i64::from(upper));
    i32::try_from(clamped).unwrap_or(upper)
}

/// Lifecycle of an aggregated score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreStatus {
    /// Still accumulating
    #[default]
    Running,
    /// Every enabled category was graded
    Completed,
    /// Grading stopped at a fatal error; the score is incomplete
    Aborted,
}

/// Running total and per-category breakdown of one grading run.
///
/// Append-only: results are added in grading order and never removed. Once
/// the grader marks the run completed or aborted the score is sealed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedScore {
    total: i64,
    max_total: i64,
    #[serde(default)]
    ratio: i64,
    status: ScoreStatus,
    #[serde(rename = "categories", with = "ordered_results")]
    by_category: IndexMap<Category, CategoryResult>,
}

impl AggregatedScore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a category result and update the running total.
    pub(crate) fn add_category(&mut self, result: CategoryResult) {
        debug_assert_eq!(self.status, ScoreStatus::Running, "score is sealed");
        debug_assert!(
            !self.by_category.contains_key(&result.category),
            "category graded twice"
        );
        self.total += i64::from(result.score);
        self.max_total += i64::from(result.max_score);
        self.ratio = if self.max_total == 0 {
            0
        } else {
            self.total * 100 / self.max_total
        };
        self.by_category.insert(result.category, result);
    }

    pub(crate) fn seal(&mut self, status: ScoreStatus) {
        self.status = status;
    }

    /// Sum of all category scores.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.total
    }

    /// Achieved score, an alias of [`AggregatedScore::total`] for reporting.
    #[must_use]
    pub const fn achieved(&self) -> i64 {
        self.total
    }

    /// Sum of the maximum scores of the graded categories.
    #[must_use]
    pub const fn max_total(&self) -> i64 {
        self.max_total
    }

    /// Achieved score as a percentage of the maximum, 0 if nothing could be achieved.
    #[must_use]
    pub const fn ratio(&self) -> i64 {
        self.ratio
    }

    /// Run status.
    #[must_use]
    pub const fn status(&self) -> ScoreStatus {
        self.status
    }

    /// Whether every enabled category was graded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == ScoreStatus::Completed
    }

    /// Result of a category, `None` if it was not graded.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&CategoryResult> {
        self.by_category.get(&category)
    }

    /// Category results in grading order.
    pub fn per_category(&self) -> impl Iterator<Item = &CategoryResult> {
        self.by_category.values()
    }

    /// Number of graded categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_category.len()
    }

    /// Whether no category was graded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

/// Serializes the breakdown as an ordered list instead of a map.
mod ordered_results {
    use super::{CategoryResult, IndexMap};
    use crate::model::Category;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        results: &IndexMap<Category, CategoryResult>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(results.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<Category, CategoryResult>, D::Error> {
        let results = Vec::<CategoryResult>::deserialize(deserializer)?;
        Ok(results
            .into_iter()
            .map(|result| (result.category, result))
            .collect())
    }
}

//! Baseline snapshots of report results.

use super::{AnalysisCounts, Category, CoverageCounts, MutationCounts, RawCounts, TestCounts};
use crate::error::{GradingError, Result};
use serde::{Deserialize, Serialize};

/// Raw counts captured from one report result at the moment grading runs.
///
/// On the wire a snapshot carries its counts under exactly one category key
/// (`analysis`, `tests`, `coverage` or `mutation`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRecord", into = "SnapshotRecord")]
pub struct BaselineSnapshot {
    /// Identifier of the producing tool or action (e.g. `checkstyle`)
    pub id: String,
    /// Display name of the producing tool (e.g. `CheckStyle`)
    pub name: Option<String>,
    /// The captured counts
    pub counts: RawCounts,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotRecord {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    analysis: Option<AnalysisCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tests: Option<TestCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coverage: Option<CoverageCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mutation: Option<MutationCounts>,
}

impl TryFrom<SnapshotRecord> for BaselineSnapshot {
    type Error = String;

    fn try_from(record: SnapshotRecord) -> std::result::Result<Self, Self::Error> {
        let mut counts = [
            record.analysis.map(RawCounts::Analysis),
            record.tests.map(RawCounts::Tests),
            record.coverage.map(RawCounts::Coverage),
            record.mutation.map(RawCounts::Mutation),
        ]
        .into_iter()
        .flatten();

        match (counts.next(), counts.next()) {
            (Some(counts), None) => Ok(Self {
                id: record.id,
                name: record.name,
                counts,
            }),
            (found, _) => {
                let keys: Vec<_> = Category::ALL.iter().map(Category::id).collect();
                Err(format!(
                    "snapshot `{}` must carry exactly one of {}, found {}",
                    record.id,
                    keys.join(", "),
                    if found.is_some() { "several" } else { "none" }
                ))
            }
        }
    }
}

impl From<BaselineSnapshot> for SnapshotRecord {
    fn from(snapshot: BaselineSnapshot) -> Self {
        let mut record = Self {
            id: snapshot.id,
            name: snapshot.name,
            analysis: None,
            tests: None,
            coverage: None,
            mutation: None,
        };
        match snapshot.counts {
            RawCounts::Analysis(counts) => record.analysis = Some(counts),
            RawCounts::Tests(counts) => record.tests = Some(counts),
            RawCounts::Coverage(counts) => record.coverage = Some(counts),
            RawCounts::Mutation(counts) => record.mutation = Some(counts),
        }
        record
    }
}

impl BaselineSnapshot {
    /// Create a snapshot for the given producer.
    pub fn new(id: impl Into<String>, counts: RawCounts) -> Self {
        Self {
            id: id.into(),
            name: None,
            counts,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Snapshot of a static analysis report.
    pub fn analysis(id: impl Into<String>, counts: AnalysisCounts) -> Self {
        Self::new(id, RawCounts::Analysis(counts))
    }

    /// Snapshot of recorded test results.
    pub fn tests(id: impl Into<String>, counts: TestCounts) -> Self {
        Self::new(id, RawCounts::Tests(counts))
    }

    /// Snapshot of recorded coverage.
    pub fn coverage(id: impl Into<String>, counts: CoverageCounts) -> Self {
        Self::new(id, RawCounts::Coverage(counts))
    }

    /// Snapshot of mutation testing results.
    pub fn mutation(id: impl Into<String>, counts: MutationCounts) -> Self {
        Self::new(id, RawCounts::Mutation(counts))
    }

    /// The category of the captured counts.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.counts.category()
    }

    /// Name shown in log lines, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Check the invariants producers must uphold.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(GradingError::invalid_snapshot(
                &self.id,
                "snapshot id must not be empty",
            ));
        }
        if let RawCounts::Tests(tests) = &self.counts {
            if !tests.is_consistent() {
                return Err(GradingError::invalid_snapshot(
                    &self.id,
                    format!(
                        "test total {} does not match passed + failed + skipped ({} + {} + {})",
                        tests.total, tests.passed, tests.failed, tests.skipped
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// All snapshots handed to a single grading run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSet {
    /// Snapshots in the order the producers recorded them
    #[serde(default)]
    pub snapshots: Vec<BaselineSnapshot>,
}

impl SnapshotSet {
    /// Create an empty snapshot set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a snapshot (builder style).
    #[must_use]
    pub fn with(mut self, snapshot: BaselineSnapshot) -> Self {
        self.snapshots.push(snapshot);
        self
    }

    /// Add a snapshot.
    pub fn push(&mut self, snapshot: BaselineSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshot was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots of a category, in recording order.
    pub fn for_category(&self, category: Category) -> impl Iterator<Item = &BaselineSnapshot> {
        self.snapshots
            .iter()
            .filter(move |snapshot| snapshot.category() == category)
    }

    /// Whether at least one snapshot of the category was recorded.
    #[must_use]
    pub fn has(&self, category: Category) -> bool {
        self.for_category(category).next().is_some()
    }

    /// Static analysis snapshots with their counts.
    pub fn analysis(&self) -> impl Iterator<Item = (&BaselineSnapshot, AnalysisCounts)> {
        self.snapshots.iter().filter_map(|snapshot| match snapshot.counts {
            RawCounts::Analysis(counts) => Some((snapshot, counts)),
            _ => None,
        })
    }

    /// Merged test counts, `None` if no test results were recorded.
    #[must_use]
    pub fn tests(&self) -> Option<TestCounts> {
        self.merged(|counts| match counts {
            RawCounts::Tests(tests) => Some(*tests),
            _ => None,
        })
    }

    /// Merged coverage counts, `None` if no coverage was recorded.
    #[must_use]
    pub fn coverage(&self) -> Option<CoverageCounts> {
        self.merged(|counts| match counts {
            RawCounts::Coverage(coverage) => Some(*coverage),
            _ => None,
        })
    }

    /// Merged mutation counts, `None` if no mutation results were recorded.
    #[must_use]
    pub fn mutation(&self) -> Option<MutationCounts> {
        self.merged(|counts| match counts {
            RawCounts::Mutation(mutation) => Some(*mutation),
            _ => None,
        })
    }

    fn merged<T, F>(&self, select: F) -> Option<T>
    where
        T: std::iter::Sum<T>,
        F: Fn(&RawCounts) -> Option<T>,
    {
        let mut selected = self
            .snapshots
            .iter()
            .filter_map(|snapshot| select(&snapshot.counts))
            .peekable();
        selected.peek()?;
        Some(selected.sum())
    }

    /// Validate every snapshot.
    pub fn validate(&self) -> Result<()> {
        self.snapshots.iter().try_for_each(BaselineSnapshot::validate)
    }
}

impl FromIterator<BaselineSnapshot> for SnapshotSet {
    fn from_iter<I: IntoIterator<Item = BaselineSnapshot>>(iter: I) -> Self {
        Self {
            snapshots: iter.into_iter().collect(),
        }
    }
}

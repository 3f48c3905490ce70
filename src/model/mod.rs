//! Normalized input model for grading.
//!
//! External producers reduce their report formats (checkstyle XML, JUnit XML,
//! JaCoCo XML, PIT) to the count structures defined here. A grading run only
//! ever sees these structures, wrapped into [`BaselineSnapshot`]s and
//! collected in a [`SnapshotSet`].
//!
//! ```
//! use autograder::model::{AnalysisCounts, BaselineSnapshot, Category, SnapshotSet, TestCounts};
//!
//! let snapshots = SnapshotSet::new()
//!     .with(BaselineSnapshot::analysis("checkstyle", AnalysisCounts::new(6, 0, 0, 0)))
//!     .with(BaselineSnapshot::tests("junit", TestCounts::new(2, 0, 0)));
//!
//! assert!(snapshots.has(Category::Tests));
//! assert!(!snapshots.has(Category::Coverage));
//! ```

mod category;
mod counts;
mod snapshot;

pub use category::Category;
pub use counts::{
    AnalysisCounts, CoverageCounts, MutationCounts, RawCounts, TestCounts, percentage,
};
pub use snapshot::{BaselineSnapshot, SnapshotSet};

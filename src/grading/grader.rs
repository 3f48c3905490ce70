//! Grading orchestration.

use super::aggregate::{AggregatedScore, ScoreStatus};
use super::log::{self, LogSink};
use super::scorer::CategoryScorer;
use crate::config::GradingConfig;
use crate::error::{GradingError, Result};
use crate::model::{Category, SnapshotSet};

/// Progress of a grading run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradingState {
    /// Nothing graded yet
    Pending,
    /// Scoring the given category
    Grading(Category),
    /// Every enabled category was graded
    Completed,
    /// Stopped at a fatal error, with its message
    Aborted(String),
}

impl GradingState {
    /// Whether the run reached a final state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted(_))
    }
}

/// Outcome of [`Grader::run`]: the score accumulated so far plus the final
/// state. An aborted run keeps the categories graded before the failure.
#[derive(Debug)]
pub struct GradingRun {
    /// Accumulated score
    pub score: AggregatedScore,
    /// Final state, always terminal
    pub state: GradingState,
    /// The error that aborted the run
    pub error: Option<GradingError>,
}

impl GradingRun {
    /// Whether the run stopped at a fatal error.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.error.is_some()
    }

    /// The score of a completed run, or the error that aborted it.
    pub fn into_result(self) -> Result<AggregatedScore> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.score),
        }
    }
}

/// Grades snapshot sets against a validated configuration.
///
/// Categories are graded in the fixed order of [`Category::ALL`]. A category
/// that is absent or disabled is skipped; an enabled category without
/// recorded results aborts the whole run.
///
/// # Example
///
/// ```
/// use autograder::config::{GradingConfig, TestConfiguration};
/// use autograder::grading::Grader;
/// use autograder::model::{BaselineSnapshot, SnapshotSet, TestCounts};
///
/// let config = GradingConfig::builder()
///     .tests(TestConfiguration::default())
///     .build();
/// let snapshots = SnapshotSet::new()
///     .with(BaselineSnapshot::tests("junit", TestCounts::new(9, 1, 0)));
///
/// let mut log: Vec<String> = Vec::new();
/// let score = Grader::new(config)?.grade(&snapshots, &mut log)?;
/// assert_eq!(score.total(), 95);
/// # Ok::<(), autograder::GradingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Grader {
    config: GradingConfig,
}

impl Grader {
    /// Create a grader, rejecting invalid configurations up front.
    pub fn new(config: GradingConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    /// Create a grader from the inline JSON configuration of a CI step.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(GradingConfig::from_json(json)?)
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Grade the snapshots, failing on the first fatal error.
    ///
    /// Identical inputs always produce identical scores and log lines.
    pub fn grade(
        &self,
        snapshots: &SnapshotSet,
        sink: &mut dyn LogSink,
    ) -> Result<AggregatedScore> {
        self.run(snapshots, sink).into_result()
    }

    /// Grade the snapshots, keeping the partial score if the run aborts.
    pub fn run(&self, snapshots: &SnapshotSet, sink: &mut dyn LogSink) -> GradingRun {
        let mut score = AggregatedScore::new();
        let mut state = GradingState::Pending;

        for category in Category::ALL {
            let scorer = CategoryScorer::for_category(&self.config, category)
                .filter(|scorer| scorer.settings().enabled);
            let Some(scorer) = scorer else {
                tracing::debug!("{category} grading is not enabled");
                sink.log(&log::skipping(category));
                continue;
            };

            transition(&mut state, GradingState::Grading(category));
            match scorer.score(snapshots, sink) {
                Ok(result) => {
                    sink.log(&log::total(category, result.score));
                    score.add_category(result);
                }
                Err(err) => {
                    tracing::error!("Grading aborted: {err}");
                    transition(&mut state, GradingState::Aborted(err.to_string()));
                    score.seal(ScoreStatus::Aborted);
                    return GradingRun {
                        score,
                        state,
                        error: Some(err),
                    };
                }
            }
        }

        transition(&mut state, GradingState::Completed);
        score.seal(ScoreStatus::Completed);
        tracing::debug!("Grading completed: {}/{}", score.total(), score.max_total());
        GradingRun {
            score,
            state,
            error: None,
        }
    }
}

fn transition(state: &mut GradingState, next: GradingState) {
    debug_assert!(!state.is_terminal(), "grading already finished");
    tracing::trace!("grading state {state:?} -> {next:?}");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisConfiguration, CoverageConfiguration, TestConfiguration};
    use crate::model::{AnalysisCounts, BaselineSnapshot, TestCounts};

    fn grade(
        config: GradingConfig,
        snapshots: &SnapshotSet,
    ) -> (Result<AggregatedScore>, Vec<String>) {
        let mut lines: Vec<String> = Vec::new();
        let result = Grader::new(config).unwrap().grade(snapshots, &mut lines);
        (result, lines)
    }

    #[test]
    fn test_empty_configuration_skips_everything() {
        let (result, lines) = grade(GradingConfig::default(), &SnapshotSet::new());
        let score = result.unwrap();
        assert_eq!(score.total(), 0);
        assert!(score.is_empty());
        assert!(score.is_complete());
        assert_eq!(
            lines,
            [
                "[Autograding] Skipping static analysis results",
                "[Autograding] Skipping test results",
                "[Autograding] Skipping coverage results",
                "[Autograding] Skipping mutation coverage results",
            ]
        );
    }

    #[test]
    fn test_negative_max_score_rejected_at_construction() {
        let config = GradingConfig::builder()
            .tests(TestConfiguration {
                max_score: -1,
                ..TestConfiguration::default()
            })
            .build();
        let err = Grader::new(config).unwrap_err();
        assert!(matches!(err, GradingError::MalformedConfiguration { .. }));
    }

    #[test]
    fn test_abort_keeps_earlier_categories() {
        let config = GradingConfig::builder()
            .analysis(AnalysisConfiguration::default())
            .tests(TestConfiguration::default())
            .coverage(CoverageConfiguration::default())
            .build();
        let snapshots = SnapshotSet::new().with(BaselineSnapshot::analysis(
            "checkstyle",
            AnalysisCounts::new(1, 0, 0, 0),
        ));

        let mut lines: Vec<String> = Vec::new();
        let run = Grader::new(config).unwrap().run(&snapshots, &mut lines);

        assert!(run.is_aborted());
        assert_eq!(run.score.status(), ScoreStatus::Aborted);
        assert_eq!(run.score.total(), 90);
        assert!(run.score.get(Category::Coverage).is_none());
        assert_eq!(
            run.state,
            GradingState::Aborted(
                "Test scoring has been enabled, but no test results have been found".to_string()
            )
        );
        assert_eq!(
            lines.last().map(String::as_str),
            Some("[Autograding] Total score for static analysis results: 90")
        );
        assert!(matches!(
            run.into_result(),
            Err(GradingError::DataUnavailable {
                category: Category::Tests
            })
        ));
    }

    #[test]
    fn test_disabled_category_is_skipped_without_data() {
        let config = GradingConfig::builder()
            .tests(TestConfiguration {
                enabled: false,
                ..TestConfiguration::default()
            })
            .build();
        let (result, lines) = grade(config, &SnapshotSet::new());
        assert!(result.is_ok());
        assert_eq!(lines[1], "[Autograding] Skipping test results");
    }

    #[test]
    fn test_grading_is_repeatable() {
        let grader = Grader::from_json(r#"{"tests":{"maxScore":100,"failureImpact":-5}}"#).unwrap();
        let snapshots =
            SnapshotSet::new().with(BaselineSnapshot::tests("junit", TestCounts::new(1, 1, 1)));

        let mut first: Vec<String> = Vec::new();
        let mut second: Vec<String> = Vec::new();
        let a = grader.grade(&snapshots, &mut first).unwrap();
        let b = grader.grade(&snapshots, &mut second).unwrap();
        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_state_terminal() {
        assert!(!GradingState::Pending.is_terminal());
        assert!(!GradingState::Grading(Category::Tests).is_terminal());
        assert!(GradingState::Completed.is_terminal());
        assert!(GradingState::Aborted(String::new()).is_terminal());
    }
}

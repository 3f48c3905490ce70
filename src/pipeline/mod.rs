//! Pipeline orchestration for grading runs.
//!
//! Shared load → grade → report plumbing for the CLI command handlers.

mod output;
mod snapshots;

pub use output::{should_use_color, write_output, OutputTarget};
pub use snapshots::{load_snapshots, parse_snapshots_str};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - grading completed (and met `--min-score`, if given)
    pub const SUCCESS: i32 = 0;
    /// The achieved score is below `--min-score`
    pub const BELOW_MIN_SCORE: i32 = 1;
    /// Grading was aborted, e.g. an enabled category had no results
    pub const GRADING_ABORTED: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::BELOW_MIN_SCORE, 1);
        assert_eq!(exit_codes::GRADING_ABORTED, 2);
        assert_eq!(exit_codes::ERROR, 3);
    }
}

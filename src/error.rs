//! Unified error types for autograder.
//!
//! Grading is all-or-nothing: every error raised by the grading core is
//! fatal to the run. The remaining kinds cover loading inputs from disk.

use crate::config::ConfigError;
use crate::model::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for autograder operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GradingError {
    /// A category is enabled but its producer never recorded any results
    #[error(
        "{} scoring has been enabled, but no {} results have been found",
        .category.title(),
        .category.display_name()
    )]
    DataUnavailable { category: Category },

    /// The grading configuration is invalid
    #[error("Malformed configuration: {}", join_errors(.errors))]
    MalformedConfiguration { errors: Vec<ConfigError> },

    /// A snapshot violates the input contract
    #[error("Invalid snapshot '{id}': {message}")]
    InvalidSnapshot { id: String, message: String },

    /// Input file could not be deserialized
    #[error("Failed to parse {context}: {message}")]
    Parse { context: String, message: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenient Result type for autograder operations
pub type Result<T> = std::result::Result<T, GradingError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl GradingError {
    /// Create a missing-data error for an enabled category
    #[must_use]
    pub const fn data_unavailable(category: Category) -> Self {
        Self::DataUnavailable { category }
    }

    /// Create a configuration error for a single field
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedConfiguration {
            errors: vec![ConfigError::new(field, message)],
        }
    }

    /// Create an invalid snapshot error
    pub fn invalid_snapshot(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    /// Whether the error aborts a grading run that was already started.
    #[must_use]
    pub const fn aborts_run(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}

impl From<std::io::Error> for GradingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for GradingError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse("JSON input", err.to_string())
    }
}

impl From<serde_yaml::Error> for GradingError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse("YAML input", err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// ```ignore
/// let set: SnapshotSet = serde_json::from_str(&content)
///     .with_context(|| format!("snapshots in {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<GradingError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error. Only parse and IO errors carry free-form context.
fn add_context_to_error(err: GradingError, new_ctx: &str) -> GradingError {
    match err {
        GradingError::Parse { context, message } => GradingError::Parse {
            context: chain_context(new_ctx, &context),
            message,
        },
        GradingError::Io {
            path,
            message,
            source,
        } => GradingError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        other => other,
    }
}

/// Chain two context strings as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_message() {
        let err = GradingError::data_unavailable(Category::Tests);
        assert_eq!(
            err.to_string(),
            "Test scoring has been enabled, but no test results have been found"
        );
        assert!(err.aborts_run());

        let err = GradingError::data_unavailable(Category::Analysis);
        assert!(err.to_string().starts_with("Static analysis scoring"));
    }

    #[test]
    fn test_malformed_lists_every_field() {
        let err = GradingError::MalformedConfiguration {
            errors: vec![
                ConfigError::new("tests.maxScore", "must not be negative"),
                ConfigError::new("coverage.maxScore", "must not be negative"),
            ],
        };
        let display = err.to_string();
        assert!(display.contains("tests.maxScore"));
        assert!(display.contains("coverage.maxScore"));
        assert!(!err.aborts_run());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = GradingError::io("/path/to/snapshots.json", io_err);
        assert!(err.to_string().contains("/path/to/snapshots.json"));
    }

    #[test]
    fn test_context_chaining() {
        fn inner() -> Result<()> {
            Err(GradingError::parse("base", "unexpected token"))
        }

        let result = inner().context("middle").context("outer");
        match result {
            Err(GradingError::Parse { context, message }) => {
                assert_eq!(context, "outer: middle: base");
                assert_eq!(message, "unexpected token");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_leaves_grading_errors_alone() {
        let result: Result<()> = Err(GradingError::data_unavailable(Category::Coverage));
        let err = result.context("grading").unwrap_err();
        assert!(matches!(
            err,
            GradingError::DataUnavailable {
                category: Category::Coverage
            }
        ));
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called);

        let err_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("{");
        let err = err_result.with_context(|| "snapshots.json").unwrap_err();
        assert!(err.to_string().contains("snapshots.json"));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}

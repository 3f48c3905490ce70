//! Where a rendered grading report goes.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Destination of the rendered report
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Print to stdout
    Stdout,
    /// Write to a file, replacing its content
    File(PathBuf),
}

impl OutputTarget {
    /// `--output-file` if given, stdout otherwise
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Whether the report may carry ANSI colors.
    ///
    /// Only an interactive stdout is colored; files and pipes get plain text.
    pub fn supports_color(&self, no_color_flag: bool) -> bool {
        match self {
            Self::Stdout => std::io::stdout().is_terminal() && should_use_color(no_color_flag),
            Self::File(_) => false,
        }
    }
}

/// `--no-color` and the `NO_COLOR` environment variable both disable color.
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Print or write the rendered report.
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => println!("{content}"),
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_target_defaults_to_stdout() {
        assert!(matches!(OutputTarget::from_option(None), OutputTarget::Stdout));
    }

    #[test]
    fn test_target_from_path() {
        let path = PathBuf::from("/tmp/score.json");
        match OutputTarget::from_option(Some(path.clone())) {
            OutputTarget::File(p) => assert_eq!(p, path),
            OutputTarget::Stdout => panic!("Expected File variant"),
        }
    }

    #[test]
    fn test_report_files_are_plain() {
        let target = OutputTarget::File(PathBuf::from("/tmp/score.txt"));
        assert!(!target.supports_color(false));
    }

    #[test]
    fn test_stdout_color_follows_terminal() {
        let target = OutputTarget::Stdout;
        if !std::io::stdout().is_terminal() {
            assert!(!target.supports_color(false));
        }
        assert!(!target.supports_color(true));
    }

    #[test]
    fn test_no_color_flag_wins() {
        assert!(!should_use_color(true));
    }

    #[test]
    fn test_write_report_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.md");
        write_output("# Score", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Score");
    }

    #[test]
    fn test_write_report_to_missing_dir_fails() {
        let target = OutputTarget::File(PathBuf::from("/nonexistent/dir/report.md"));
        let err = write_output("x", &target, true).unwrap_err();
        assert!(err.to_string().contains("Failed to write report"));
    }
}

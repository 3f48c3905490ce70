//! Grade command handler.
//!
//! Implements the `grade` subcommand: load weights and snapshots, grade,
//! print the console log and render the report.

use crate::config::{GradingConfig, load_or_default};
use crate::grading::{Grader, TracingSink, WriterSink};
use crate::pipeline::{OutputTarget, exit_codes, load_snapshots, write_output};
use crate::reports::{GradingReport, ReportFormat, ReportMetadata, create_reporter};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Grade command configuration
#[derive(Debug, Clone, Default)]
pub struct GradeConfig {
    /// Snapshot file (JSON or YAML)
    pub snapshots_path: PathBuf,
    /// Configuration file; discovered when neither this nor `config_json` is set
    pub config_path: Option<PathBuf>,
    /// Inline JSON configuration, takes precedence over `config_path`
    pub config_json: Option<String>,
    pub output: ReportFormat,
    pub output_file: Option<PathBuf>,
    /// Minimum total score, below which the command fails
    pub min_score: Option<i64>,
    pub no_color: bool,
    /// Route the console log through `tracing` instead of stderr
    pub quiet: bool,
}

/// Run the grade command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_grade(config: GradeConfig) -> Result<i32> {
    let (grading_config, config_source) = resolve_config(&config)?;
    let grader = Grader::new(grading_config).context("Invalid grading configuration")?;
    let snapshots = load_snapshots(&config.snapshots_path)?;

    if !config.quiet {
        tracing::info!(
            "Grading {} snapshots from {}",
            snapshots.len(),
            config.snapshots_path.display()
        );
    }

    let mut log: Vec<String> = Vec::new();
    let run = if config.quiet {
        let mut console = (TracingSink, &mut log);
        grader.run(&snapshots, &mut console)
    } else {
        let mut console = (WriterSink::new(std::io::stderr()), &mut log);
        grader.run(&snapshots, &mut console)
    };

    let mut metadata =
        ReportMetadata::new().with_snapshots_path(config.snapshots_path.display().to_string());
    if let Some(source) = config_source {
        metadata = metadata.with_config_path(source);
    }
    let report = GradingReport::from_run(run, log, metadata);

    let target = OutputTarget::from_option(config.output_file.clone());
    let reporter = create_reporter(config.output, target.supports_color(config.no_color));
    let rendered = reporter
        .generate(&report)
        .with_context(|| format!("Failed to render {} report", config.output))?;
    write_output(&rendered, &target, config.quiet)?;

    Ok(exit_code(&report, config.min_score))
}

/// Inline JSON wins over files; files are loaded or discovered.
fn resolve_config(config: &GradeConfig) -> Result<(GradingConfig, Option<String>)> {
    if let Some(json) = &config.config_json {
        let parsed = GradingConfig::from_json(json).context("Invalid inline configuration")?;
        return Ok((parsed, Some("<inline>".to_string())));
    }
    let (parsed, path) = load_or_default(config.config_path.as_deref())?;
    Ok((parsed, path.map(|p| p.display().to_string())))
}

fn exit_code(report: &GradingReport, min_score: Option<i64>) -> i32 {
    if report.is_aborted() {
        return exit_codes::GRADING_ABORTED;
    }
    if let Some(threshold) = min_score {
        let total = report.score.total();
        if total < threshold {
            tracing::error!("Score {total} is below minimum threshold {threshold}");
            return exit_codes::BELOW_MIN_SCORE;
        }
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SNAPSHOTS: &str = r#"{"snapshots": [
        {"id": "checkstyle", "name": "CheckStyle", "analysis": {"errorCount": 6, "totalCount": 6}},
        {"id": "junit", "tests": {"total": 3, "passed": 1, "failed": 1, "skipped": 1}}
    ]}"#;

    fn setup(tmp: &TempDir) -> GradeConfig {
        let snapshots_path = tmp.path().join("snapshots.json");
        std::fs::write(&snapshots_path, SNAPSHOTS).unwrap();
        GradeConfig {
            snapshots_path,
            config_json: Some(r#"{"analysis": {}, "tests": {}}"#.to_string()),
            output: ReportFormat::Json,
            output_file: Some(tmp.path().join("report.json")),
            quiet: true,
            no_color: true,
            ..GradeConfig::default()
        }
    }

    fn read_report(tmp: &TempDir) -> serde_json::Value {
        let content = std::fs::read_to_string(tmp.path().join("report.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn test_grade_writes_report() {
        let tmp = TempDir::new().unwrap();
        let code = run_grade(setup(&tmp)).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let report = read_report(&tmp);
        assert_eq!(report["score"]["total"], 135);
        assert_eq!(report["metadata"]["configPath"], "<inline>");
        assert_eq!(
            report["log"][0],
            "[Autograding] Grading static analysis results for CheckStyle"
        );
    }

    #[test]
    fn test_below_min_score() {
        let tmp = TempDir::new().unwrap();
        let config = GradeConfig {
            min_score: Some(150),
            ..setup(&tmp)
        };
        assert_eq!(run_grade(config).unwrap(), exit_codes::BELOW_MIN_SCORE);
    }

    #[test]
    fn test_missing_results_abort() {
        let tmp = TempDir::new().unwrap();
        let config = GradeConfig {
            config_json: Some(r#"{"coverage": {}}"#.to_string()),
            ..setup(&tmp)
        };
        assert_eq!(run_grade(config).unwrap(), exit_codes::GRADING_ABORTED);

        let report = read_report(&tmp);
        assert_eq!(report["score"]["status"], "aborted");
        assert_eq!(
            report["error"],
            "Coverage scoring has been enabled, but no coverage results have been found"
        );
    }

    #[test]
    fn test_malformed_configuration_is_error() {
        let tmp = TempDir::new().unwrap();
        let config = GradeConfig {
            config_json: Some(r#"{"tests": {"maxScore": -5}}"#.to_string()),
            ..setup(&tmp)
        };
        let err = run_grade(config).unwrap_err();
        assert!(format!("{err:#}").contains("tests.maxScore"));
    }

    #[test]
    fn test_config_file_is_used() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("grading.yaml");
        std::fs::write(&config_path, "tests:\n  maxScore: 10\n").unwrap();
        let config = GradeConfig {
            config_json: None,
            config_path: Some(config_path),
            ..setup(&tmp)
        };

        assert_eq!(run_grade(config).unwrap(), exit_codes::SUCCESS);
        let report = read_report(&tmp);
        assert_eq!(report["score"]["total"], 4);
        assert_eq!(report["log"][0], "[Autograding] Skipping static analysis results");
    }
}

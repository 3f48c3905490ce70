//! Configuration file loading and discovery.
//!
//! Grading configurations are read from JSON or YAML files. JSON is the
//! format of the inline CI step argument; YAML is accepted for checked-in
//! configuration files.

use super::types::GradingConfig;
use crate::error::{GradingError, Result};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".autograding.json",
    ".autograding.yaml",
    ".autograding.yml",
    "autograding.json",
    "autograding.yaml",
    "autograding.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided and existing
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/autograder/)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("autograder")))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Search locations reported by `config path`.
#[must_use]
pub fn search_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        locations.push(cwd);
    }
    if let Some(root) = find_git_root() {
        if !locations.contains(&root) {
            locations.push(root);
        }
    }
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("autograder"));
    }
    locations
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Whether a file should be parsed as JSON (by extension).
fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Parse configuration text, JSON or YAML depending on `json`.
pub fn parse_config_str(content: &str, json: bool, origin: &str) -> Result<GradingConfig> {
    if content.trim().is_empty() {
        return Ok(GradingConfig::default());
    }
    let parsed = if json {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| GradingError::malformed(origin, message))
}

/// Load a `GradingConfig` from a JSON or YAML file.
pub fn load_config_file(path: &Path) -> Result<GradingConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GradingError::io(path, e))?;
    let config = parse_config_str(&content, is_json(path), &path.display().to_string())?;
    tracing::debug!("Loaded grading configuration from {}", path.display());
    Ok(config)
}

/// Load the configuration from an explicit or discovered file.
///
/// An explicit path that does not exist is an error; when nothing is found
/// the empty configuration is returned, which disables every category.
pub fn load_or_default(explicit_path: Option<&Path>) -> Result<(GradingConfig, Option<PathBuf>)> {
    if let Some(path) = explicit_path {
        return load_config_file(path).map(|config| (config, Some(path.to_path_buf())));
    }

    match discover_config_file(None) {
        Some(path) => load_config_file(&path).map(|config| (config, Some(path))),
        None => {
            tracing::info!("No grading configuration found, every category will be skipped");
            Ok((GradingConfig::default(), None))
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Serialize a configuration as YAML.
#[must_use]
pub fn to_yaml(config: &GradingConfig) -> String {
    serde_yaml::to_string(config).unwrap_or_default()
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# Autograding configuration
# =========================
#
# Place this file at .autograding.yaml in your project root or
# ~/.config/autograder/autograding.yaml. A category that is not listed is
# skipped; a category key without a value uses the defaults shown here.
# Impacts are signed weights applied per counted item.

# Static analysis: starts at maxScore, every warning applies its impact
analysis:
  maxScore: 100
  errorImpact: -10
  highImpact: -5
  normalImpact: -2
  lowImpact: -1

# Tests: starts at maxScore, every test applies its impact
tests:
  maxScore: 100
  passedImpact: 0
  failureImpact: -5
  skippedImpact: -1

# Coverage: impacts apply to the covered/missed percentages of lines and
# branches, the sum is capped at maxScore
coverage:
  maxScore: 100
  coveredImpact: 1
  missedImpact: -1

# Mutation coverage: impacts apply to the killed/survived percentages
# mutation:
#   maxScore: 100
#   killedImpact: 1
#   survivedImpact: -1
#   gradingMode: absolute
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

//! Snapshot file loading.
//!
//! Producers write the normalized counts of a build into a JSON or YAML
//! file. Loading checks every snapshot before any grading starts.

use crate::error::{ErrorContext, GradingError, Result};
use crate::model::SnapshotSet;
use std::path::Path;

/// Parse snapshot text, JSON or YAML depending on `json`, and validate it.
pub fn parse_snapshots_str(content: &str, json: bool) -> Result<SnapshotSet> {
    if content.trim().is_empty() {
        return Ok(SnapshotSet::new());
    }
    let snapshots: SnapshotSet = if json {
        serde_json::from_str(content)?
    } else {
        serde_yaml::from_str(content)?
    };
    snapshots.validate()?;
    Ok(snapshots)
}

/// Load and validate a snapshot file. `.json` files are read as JSON,
/// everything else as YAML.
pub fn load_snapshots(path: &Path) -> Result<SnapshotSet> {
    tracing::debug!("Loading snapshots: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| GradingError::io(path, e))?;
    let json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let snapshots = parse_snapshots_str(&content, json)
        .with_context(|| format!("snapshots in {}", path.display()))?;

    tracing::debug!("Loaded {} snapshots", snapshots.len());
    Ok(snapshots)
}

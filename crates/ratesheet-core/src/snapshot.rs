use crate::diff::{ComparisonSummary, SummarySection};
use crate::error::RateError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the accepted baseline lives unless overridden.
pub const DEFAULT_SNAPSHOT_PATH: &str = "snapshots/residential_v1.json";

/// The last accepted comparison summary, plus free-form metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub residential_standard: SummarySection,
    #[serde(default)]
    pub residential_supplemental: SummarySection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Snapshot {
    /// Build a snapshot from a fresh summary, labelled with the sheet version.
    pub fn from_summary(
        summary: ComparisonSummary,
        label: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut metadata = serde_json::Map::new();
        if let Some(label) = label {
            metadata.insert("pdf_version_label".into(), label.into());
        }
        metadata.insert("updated_at".into(), updated_at.to_rfc3339().into());

        Snapshot {
            residential_standard: summary.residential_standard,
            residential_supplemental: summary.residential_supplemental,
            metadata: Some(serde_json::Value::Object(metadata)),
        }
    }

    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            residential_standard: self.residential_standard.clone(),
            residential_supplemental: self.residential_supplemental.clone(),
        }
    }

    /// The human-readable version label, if one was recorded.
    pub fn label(&self) -> Option<&str> {
        self.metadata.as_ref()?.get("pdf_version_label")?.as_str()
    }
}

/// Load the baseline snapshot. A missing file is an error, never an empty baseline.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, RateError> {
    if !path.exists() {
        return Err(RateError::MissingSnapshot {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| RateError::SnapshotParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| RateError::SnapshotParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write the snapshot as pretty JSON, creating parent directories.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), RateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "snapshot written");
    Ok(())
}

//! Run reports

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::PipelineStage;
use super::error::PipelineResult;
use crate::gold::GoldOutputs;
use crate::validation::ValidationReport;

/// Pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    /// Every stage succeeded and validation found all outputs
    Completed,
    /// Every stage succeeded but validation reported missing outputs
    Partial,
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Partial => write!(f, "partial"),
        }
    }
}

/// Output from a completed pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageOutput {
    /// Artifact locations written or checked by the stage
    pub files: Vec<PathBuf>,
    /// Stage-specific metadata
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Default for StageOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl StageOutput {
    /// Create an empty stage output
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            metadata: BTreeMap::new(),
            duration_ms: 0,
            timestamp: Utc::now(),
        }
    }

    /// Add an output file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Set duration
    pub fn with_duration(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }
}

/// Report from a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Run ID
    pub run_id: String,
    /// Pipeline name
    pub name: Option<String>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Final status
    pub status: PipelineStatus,
    /// Completed stages, in execution order
    pub stages_completed: Vec<PipelineStage>,
    /// Total duration in milliseconds
    pub duration_ms: u64,
    /// Stage outputs keyed by stage name
    pub outputs: BTreeMap<String, StageOutput>,
    /// Gold locations, when the gold stage ran
    pub gold_outputs: Option<GoldOutputs>,
    /// Validation outcome, when the validate stage ran
    pub validation: Option<ValidationReport>,
}

impl PipelineReport {
    /// Check if pipeline was successful
    pub fn is_success(&self) -> bool {
        self.status == PipelineStatus::Completed
    }

    /// Get output of a completed stage
    pub fn stage_output(&self, stage: PipelineStage) -> Option<&StageOutput> {
        self.outputs.get(stage.name())
    }

    /// Get formatted duration
    pub fn duration_formatted(&self) -> String {
        let secs = self.duration_ms / 1000;
        let mins = secs / 60;
        let remaining_secs = secs % 60;

        if mins > 0 {
            format!("{}m {}s", mins, remaining_secs)
        } else if secs > 0 {
            format!("{}s", secs)
        } else {
            format!("{}ms", self.duration_ms)
        }
    }

    /// Save the report as pretty JSON
    pub fn save(&self, path: &Path) -> PipelineResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a report saved with [`PipelineReport::save`]
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

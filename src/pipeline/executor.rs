//! Pipeline executor for running the medallion stages in order

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;
use tracing::{error, info, info_span};
use uuid::Uuid;

use super::config::{PipelineConfig, PipelineStage};
use super::error::{PipelineError, PipelineResult};
use super::report::{PipelineReport, PipelineStatus, StageOutput};
use crate::bronze::{RecordSource, SampleRaceSource, run_bronze};
use crate::gold::{GoldOutputs, run_gold};
use crate::silver::run_silver;
use crate::storage::{FileSystemStorageBackend, StorageBackend};
use crate::validation::{ValidationReport, validate_outputs};

/// Pipeline executor that runs the selected stages
///
/// Each stage receives its predecessor's location from this run when the
/// predecessor ran, otherwise the predecessor's well-known location.
pub struct PipelineExecutor {
    config: PipelineConfig,
    storage: Box<dyn StorageBackend>,
    source: Box<dyn RecordSource>,
    run_id: String,
}

/// Artifacts handed from one stage to the next within a run
#[derive(Default)]
struct Handoff {
    bronze: Option<String>,
    silver: Option<String>,
    gold: Option<GoldOutputs>,
    validation: Option<ValidationReport>,
}

impl PipelineExecutor {
    /// Create an executor over the file system at `config.data_dir`, fed by
    /// the sample race source
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        let storage = FileSystemStorageBackend::new(&config.data_dir);
        Self::with_backends(config, Box::new(storage), Box::new(SampleRaceSource))
    }

    /// Create an executor with explicit storage and source
    pub fn with_backends(
        config: PipelineConfig,
        storage: Box<dyn StorageBackend>,
        source: Box<dyn RecordSource>,
    ) -> PipelineResult<Self> {
        config.validate().map_err(PipelineError::ConfigError)?;

        Ok(Self {
            config,
            storage,
            source,
            run_id: Uuid::new_v4().to_string(),
        })
    }

    /// Unique id of this run
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Configuration the executor runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline
    ///
    /// The first failing stage aborts the run; later stages never execute.
    pub fn run(&self) -> PipelineResult<PipelineReport> {
        let _span = info_span!("pipeline_run", run_id = %self.run_id).entered();

        let started_at = Utc::now();
        let start = Instant::now();
        let stages = self.config.effective_stages();

        info!(
            run_id = %self.run_id,
            stages = ?stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            data_dir = %self.config.data_dir.display(),
            "Starting pipeline"
        );

        if self.config.verbose {
            eprintln!("Pipeline run: {}", self.run_id);
            eprintln!(
                "Stages: {}",
                stages.iter().map(|s| s.name()).collect::<Vec<_>>().join(", ")
            );
        }

        let mut handoff = Handoff::default();
        let mut completed = Vec::new();
        let mut outputs = BTreeMap::new();

        for stage in &stages {
            let _stage_span = info_span!("pipeline_stage", stage = stage.name()).entered();
            info!(stage = stage.name(), "Starting stage");
            if self.config.verbose {
                eprintln!("Running stage {}...", stage.name());
            }

            let stage_start = Instant::now();
            match self.run_stage(*stage, &mut handoff) {
                Ok(output) => {
                    let output = output.with_duration(stage_start.elapsed().as_millis() as u64);
                    info!(
                        stage = stage.name(),
                        duration_ms = output.duration_ms,
                        "Stage completed"
                    );
                    if self.config.verbose {
                        eprintln!(
                            "Stage {} completed in {}ms",
                            stage.name(),
                            output.duration_ms
                        );
                    }
                    completed.push(*stage);
                    outputs.insert(stage.name().to_string(), output);
                }
                Err(e) => {
                    error!(stage = stage.name(), error = %e, "Stage failed");
                    if self.config.verbose {
                        eprintln!("Stage {} failed: {}", stage.name(), e);
                    }
                    return Err(e);
                }
            }
        }

        let status = match &handoff.validation {
            Some(report) if !report.is_complete() => PipelineStatus::Partial,
            _ => PipelineStatus::Completed,
        };

        let duration = start.elapsed();
        info!(
            run_id = %self.run_id,
            status = %status,
            duration_ms = duration.as_millis() as u64,
            stages_completed = completed.len(),
            "Pipeline finished"
        );

        Ok(PipelineReport {
            run_id: self.run_id.clone(),
            name: self.config.name.clone(),
            started_at,
            status,
            stages_completed: completed,
            duration_ms: duration.as_millis() as u64,
            outputs,
            gold_outputs: handoff.gold,
            validation: handoff.validation,
        })
    }

    /// Run a single stage
    fn run_stage(
        &self,
        stage: PipelineStage,
        handoff: &mut Handoff,
    ) -> PipelineResult<StageOutput> {
        match stage {
            PipelineStage::Bronze => self.run_bronze_stage(handoff),
            PipelineStage::Silver => self.run_silver_stage(handoff),
            PipelineStage::Gold => self.run_gold_stage(handoff),
            PipelineStage::Validate => Ok(self.run_validate_stage(handoff)),
        }
    }

    fn run_bronze_stage(&self, handoff: &mut Handoff) -> PipelineResult<StageOutput> {
        let location = run_bronze(&self.config, self.storage.as_ref(), self.source.as_ref())?;

        let output = StageOutput::new()
            .with_file(&location)
            .with_metadata("source", serde_json::json!(self.source.name()));
        handoff.bronze = Some(location);
        Ok(output)
    }

    fn run_silver_stage(&self, handoff: &mut Handoff) -> PipelineResult<StageOutput> {
        let location = run_silver(
            &self.config,
            self.storage.as_ref(),
            handoff.bronze.as_deref(),
        )?;

        let output = StageOutput::new()
            .with_file(&location)
            .with_metadata("distance_km", serde_json::json!(self.config.distance_km));
        handoff.silver = Some(location);
        Ok(output)
    }

    fn run_gold_stage(&self, handoff: &mut Handoff) -> PipelineResult<StageOutput> {
        let gold = run_gold(
            &self.config,
            self.storage.as_ref(),
            handoff.silver.as_deref(),
        )?;

        let mut output = StageOutput::new().with_metadata("kpis", serde_json::json!(gold.len()));
        for (_, location) in gold.iter() {
            output = output.with_file(location);
        }
        handoff.gold = Some(gold);
        Ok(output)
    }

    fn run_validate_stage(&self, handoff: &mut Handoff) -> StageOutput {
        let gold = handoff
            .gold
            .clone()
            .unwrap_or_else(|| GoldOutputs::well_known(&self.config));
        let report = validate_outputs(&gold, self.storage.as_ref());

        let mut output = StageOutput::new()
            .with_metadata("present", serde_json::json!(report.present))
            .with_metadata("total", serde_json::json!(report.total))
            .with_metadata("missing", serde_json::json!(report.missing))
            .with_metadata("summary", serde_json::json!(report.summary()));
        for (_, location) in gold.iter() {
            output = output.with_file(location);
        }
        handoff.validation = Some(report);
        output
    }
}

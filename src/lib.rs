//! Race Medallion - batch pipeline for half-marathon race results
//!
//! Provides:
//! - Bronze ingestion of raw result rows (via record sources)
//! - Silver cleaning and enrichment (gender, age range, bib, seconds, pace, speed)
//! - Gold KPI tables (summary, per category, top per gender, age distribution, pace ranking)
//! - Validation of the Gold outputs
//! - File/folder operations (via storage backends)

pub mod bronze;
pub mod gold;
pub mod models;
pub mod pipeline;
pub mod silver;
pub mod storage;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use storage::{FileSystemStorageBackend, StorageBackend, StorageError};

pub use bronze::{InMemorySource, RecordSource, SampleRaceSource, run_bronze};
pub use gold::{GoldOutputs, KpiTables, compute_kpis, run_gold};
pub use silver::{clean_records, run_silver};
pub use validation::{ValidationReport, validate_outputs};

pub use pipeline::{
    PipelineConfig, PipelineError, PipelineExecutor, PipelineReport, PipelineResult,
    PipelineStage, PipelineStatus, run_pipeline,
};

// Re-export models
pub use models::{
    AgeDistribution, CategoryStats, CleanRecord, GenderTop, KpiKind, OverallSummary, PaceRanking,
    RawRecord,
};

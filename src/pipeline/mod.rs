//! Medallion pipeline orchestration
//!
//! This module ties the stages together:
//! - Bronze: ingest raw race results from a record source
//! - Silver: clean and enrich every row
//! - Gold: compute the KPI tables
//! - Validate: check that every KPI table exists
//!
//! # Example
//!
//! ```rust,ignore
//! use race_medallion::pipeline::{PipelineConfig, PipelineExecutor, PipelineStage};
//!
//! let config = PipelineConfig::new()
//!     .with_data_dir("/data/race")
//!     .with_distance_km(21.1)
//!     .with_stages(vec![PipelineStage::Silver, PipelineStage::Gold]);
//!
//! let executor = PipelineExecutor::new(config)?;
//! let report = executor.run()?;
//!
//! println!("Pipeline finished in {}", report.duration_formatted());
//! ```
//!
//! Stages that are skipped hand over their well-known locations, so a Gold
//! run picks up `silver/resultados_clean.csv` from an earlier run.

mod config;
mod error;
mod executor;
mod report;

pub use config::{
    CLEAN_FILE_NAME, DEFAULT_DISTANCE_KM, PipelineConfig, PipelineStage, RAW_FILE_NAME,
};
pub use error::{PipelineError, PipelineResult};
pub use executor::PipelineExecutor;
pub use report::{PipelineReport, PipelineStatus, StageOutput};

/// Run a pipeline with the given configuration
///
/// This is a convenience function for simple pipeline execution.
pub fn run_pipeline(config: PipelineConfig) -> PipelineResult<PipelineReport> {
    let executor = PipelineExecutor::new(config)?;
    executor.run()
}

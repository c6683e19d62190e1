//! Bronze stage: raw ingestion
//!
//! Fetches raw rows from a [`RecordSource`] and persists them untouched as
//! `resultados_raw.csv` in the bronze directory.

mod source;

pub use source::{InMemorySource, RecordSource, SampleRaceSource};

use tracing::{error, info};

use crate::models::RawRecord;
use crate::pipeline::{PipelineConfig, PipelineResult};
use crate::storage::{StorageBackend, write_table};

/// Run the Bronze stage and return the location of the raw table
pub fn run_bronze(
    config: &PipelineConfig,
    storage: &dyn StorageBackend,
    source: &dyn RecordSource,
) -> PipelineResult<String> {
    info!(source = source.name(), "Starting bronze ingestion");

    let result = ingest(config, storage, source);
    if let Err(e) = &result {
        error!(source = source.name(), error = %e, "Bronze ingestion failed");
    }
    result
}

fn ingest(
    config: &PipelineConfig,
    storage: &dyn StorageBackend,
    source: &dyn RecordSource,
) -> PipelineResult<String> {
    storage.create_dir(&config.bronze_dir)?;

    let rows: Vec<RawRecord> = source.fetch()?;
    let location = config.bronze_location();
    write_table(storage, &location, &rows)?;

    info!(rows = rows.len(), location = %location, "Bronze completed");
    Ok(location)
}

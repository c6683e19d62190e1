//! CSV table artifacts
//!
//! Every artifact the pipeline persists is a comma-separated table with a
//! header row. Row types declare their column order through [`TableRow`].

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::StorageBackend;
use crate::pipeline::PipelineResult;

/// A row type that can be persisted as a CSV table
pub trait TableRow: Serialize + DeserializeOwned {
    /// Header columns, in the same order as the serialized fields
    const COLUMNS: &'static [&'static str];
}

/// Read a whole table from storage
pub fn read_table<T: TableRow>(storage: &dyn StorageBackend, path: &str) -> PipelineResult<Vec<T>> {
    let bytes = storage.read_file(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());

    let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}

/// Write a whole table to storage, replacing any previous artifact
///
/// The header row is always written, so an empty table is still a valid CSV.
pub fn write_table<T: TableRow>(
    storage: &dyn StorageBackend,
    path: &str,
    rows: &[T],
) -> PipelineResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(T::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    storage.write_file(path, &bytes)?;
    Ok(())
}

//! Silver stage: cleaning and normalization
//!
//! Reads the Bronze table and turns every [`RawRecord`] into a
//! [`CleanRecord`]:
//! 1. Split `categoria_dorsal` into gender, age range, category and bib
//! 2. Strip the ordinal marker from both ranks
//! 3. Title-case runner names
//! 4. Derive elapsed seconds, pace and speed from the official time
//!
//! Rows are independent and the output keeps the input row order.

pub mod parse;

use tracing::{debug, error, info};

use crate::models::{CleanRecord, RawRecord};
use crate::pipeline::{PipelineConfig, PipelineResult};
use crate::storage::{StorageBackend, read_table, write_table};

pub use parse::{
    CategoryBib, parse_category_bib, parse_rank, pace, round2, speed, time_to_seconds, title_case,
};

/// Run the Silver stage and return the location of the clean table
///
/// `input` defaults to the Bronze stage's well-known location.
pub fn run_silver(
    config: &PipelineConfig,
    storage: &dyn StorageBackend,
    input: Option<&str>,
) -> PipelineResult<String> {
    let input = input
        .map(str::to_string)
        .unwrap_or_else(|| config.bronze_location());
    info!(input = %input, "Starting silver cleaning");

    let result = clean(config, storage, &input);
    if let Err(e) = &result {
        error!(input = %input, error = %e, "Silver cleaning failed");
    }
    result
}

fn clean(
    config: &PipelineConfig,
    storage: &dyn StorageBackend,
    input: &str,
) -> PipelineResult<String> {
    let raw: Vec<RawRecord> = read_table(storage, input)?;
    info!(rows = raw.len(), "Read bronze records");

    let records = clean_records(&raw, config.distance_km)?;

    for record in records.iter().take(3) {
        debug!(
            pos_general = record.pos_general,
            nombre = %record.nombre_corredor,
            categoria = %record.categoria,
            ritmo = %record.ritmo_min_km,
            "Clean record preview"
        );
    }

    storage.create_dir(&config.silver_dir)?;
    let location = config.silver_location();
    write_table(storage, &location, &records)?;

    info!(rows = records.len(), location = %location, "Silver completed");
    Ok(location)
}

/// Clean every raw row, aborting on the first malformed rank
pub fn clean_records(raw: &[RawRecord], distance_km: f64) -> PipelineResult<Vec<CleanRecord>> {
    raw.iter()
        .enumerate()
        .map(|(i, record)| clean_record(i + 1, record, distance_km))
        .collect()
}

/// Clean a single raw row. `row` is 1-based and only used for error context.
pub fn clean_record(row: usize, raw: &RawRecord, distance_km: f64) -> PipelineResult<CleanRecord> {
    let CategoryBib {
        gender,
        age_range,
        category,
        bib,
    } = parse_category_bib(&raw.categoria_dorsal);

    let pos_general = parse_rank("pos_general", row, &raw.pos_general)?;
    let pos_categoria = parse_rank("pos_categoria", row, &raw.pos_categoria)?;
    let seconds = time_to_seconds("tiempo_oficial", row, &raw.tiempo_oficial)?;

    Ok(CleanRecord {
        pos_general,
        pos_categoria,
        dorsal: bib,
        nombre_corredor: title_case(&raw.nombre_corredor),
        genero: gender,
        rango_edad: age_range,
        categoria: category,
        tiempo_oficial: raw.tiempo_oficial.clone(),
        tiempo_segundos: seconds,
        ritmo_min_km: pace(seconds, distance_km),
        velocidad_kmh: speed(seconds, distance_km),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bronze::{InMemorySource, SampleRaceSource, run_bronze};
    use crate::models::UNKNOWN;
    use crate::pipeline::PipelineError;
    use crate::storage::FileSystemStorageBackend;
    use tempfile::TempDir;

    #[test]
    fn test_clean_record() {
        let raw = RawRecord::new(
            "127º",
            "47º",
            "abel BALLON aguirre",
            "Varones 30 a 39 añosdorsal: 2395",
            "1:46:32",
        );
        let clean = clean_record(1, &raw, 21.1).unwrap();

        assert_eq!(clean.pos_general, 127);
        assert_eq!(clean.pos_categoria, 47);
        assert_eq!(clean.dorsal, Some(2395));
        assert_eq!(clean.nombre_corredor, "Abel Ballon Aguirre");
        assert_eq!(clean.genero, "Varones");
        assert_eq!(clean.rango_edad, "30 a 39 años");
        assert_eq!(clean.categoria, "Varones 30 a 39 años");
        assert_eq!(clean.tiempo_oficial, "1:46:32");
        assert_eq!(clean.tiempo_segundos, 6392);
        assert_eq!(clean.ritmo_min_km, "5:02");
        assert_eq!(clean.velocidad_kmh, Some(11.88));
    }

    #[test]
    fn test_clean_record_degraded_fields() {
        let raw = RawRecord::new("3º", "1º", "X", "Juvenil", "DNF");
        let clean = clean_record(1, &raw, 21.1).unwrap();

        assert_eq!(clean.genero, UNKNOWN);
        assert_eq!(clean.rango_edad, UNKNOWN);
        assert_eq!(clean.categoria, "Juvenil");
        assert_eq!(clean.dorsal, None);
        assert_eq!(clean.tiempo_segundos, 0);
        assert_eq!(clean.ritmo_min_km, "0:00");
        assert_eq!(clean.velocidad_kmh, None);
    }

    #[test]
    fn test_clean_records_aborts_on_bad_rank() {
        let rows = vec![
            RawRecord::new("1º", "1º", "A", "Damas 18 a 29 añosdorsal: 1", "1:30:00"),
            RawRecord::new("2", "1º", "B", "Damas 18 a 29 añosdorsal: 2", "1:31:00"),
        ];
        let err = clean_records(&rows, 21.1).unwrap_err();
        match err {
            PipelineError::MalformedField { column, row, .. } => {
                assert_eq!(column, "pos_general");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_silver_preserves_rows_and_columns() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorageBackend::new(temp.path());
        let config = PipelineConfig::default();

        let bronze = run_bronze(&config, &storage, &SampleRaceSource).unwrap();
        let location = run_silver(&config, &storage, Some(&bronze)).unwrap();
        assert_eq!(location, "silver/resultados_clean.csv");

        let text = String::from_utf8(storage.read_file(&location).unwrap()).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "pos_general,pos_categoria,dorsal,nombre_corredor,genero,rango_edad,categoria,tiempo_oficial,tiempo_segundos,ritmo_min_km,velocidad_kmh"
        );

        let clean: Vec<CleanRecord> = read_table(&storage, &location).unwrap();
        assert_eq!(clean.len(), 25);
        assert_eq!(clean[0].tiempo_segundos, 4365);
        assert_eq!(clean[19].nombre_corredor, "Alexandrina Vivar Diaz");
    }

    #[test]
    fn test_run_silver_defaults_to_bronze_location() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorageBackend::new(temp.path());
        let config = PipelineConfig::default();

        run_bronze(&config, &storage, &SampleRaceSource).unwrap();
        assert!(run_silver(&config, &storage, None).is_ok());
    }

    #[test]
    fn test_run_silver_missing_input() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorageBackend::new(temp.path());
        let config = PipelineConfig::default();

        let result = run_silver(&config, &storage, None);
        assert!(matches!(result, Err(PipelineError::FileNotFound(_))));
        assert!(!storage.file_exists("silver/resultados_clean.csv").unwrap());
    }

    #[test]
    fn test_run_silver_bad_rank_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorageBackend::new(temp.path());
        let config = PipelineConfig::default();

        let source = InMemorySource::new(vec![RawRecord::new(
            "first",
            "1º",
            "A",
            "Damas 18 a 29 añosdorsal: 1",
            "1:30:00",
        )]);
        run_bronze(&config, &storage, &source).unwrap();

        assert!(run_silver(&config, &storage, None).is_err());
        assert!(!storage.file_exists("silver/resultados_clean.csv").unwrap());
    }
}

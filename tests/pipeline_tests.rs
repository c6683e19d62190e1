//! Integration tests for the medallion pipeline
//!
//! Runs Bronze → Silver → Gold → Validate against a temporary data directory.

use std::collections::HashMap;

use tempfile::TempDir;

use race_medallion::models::{GENDER_MEN, GENDER_WOMEN};
use race_medallion::pipeline::{PipelineConfig, PipelineExecutor, PipelineStage, PipelineStatus};
use race_medallion::storage::read_table;
use race_medallion::{
    AgeDistribution, CleanRecord, FileSystemStorageBackend, GenderTop, InMemorySource, KpiKind,
    OverallSummary, PaceRanking, RawRecord, StorageBackend, run_pipeline,
};

fn config_for(temp: &TempDir) -> PipelineConfig {
    PipelineConfig::new().with_data_dir(temp.path())
}

#[test]
fn test_full_run_with_sample_source() {
    let temp = TempDir::new().unwrap();
    let report = run_pipeline(config_for(&temp)).unwrap();

    assert_eq!(report.status, PipelineStatus::Completed);
    let validation = report.validation.as_ref().unwrap();
    assert_eq!(
        validation.summary(),
        "Pipeline completed successfully! 5/5 files generated."
    );

    for kind in KpiKind::all() {
        assert!(temp.path().join("gold").join(kind.file_name()).exists());
    }
}

#[test]
fn test_row_count_preserved_bronze_to_silver() {
    let temp = TempDir::new().unwrap();
    run_pipeline(config_for(&temp)).unwrap();

    let storage = FileSystemStorageBackend::new(temp.path());
    let raw: Vec<RawRecord> = read_table(&storage, "bronze/resultados_raw.csv").unwrap();
    let clean: Vec<CleanRecord> = read_table(&storage, "silver/resultados_clean.csv").unwrap();

    assert_eq!(raw.len(), 25);
    assert_eq!(clean.len(), raw.len());
    for (r, c) in raw.iter().zip(&clean) {
        assert_eq!(r.tiempo_oficial, c.tiempo_oficial);
    }
}

#[test]
fn test_gold_tables_from_sample() {
    let temp = TempDir::new().unwrap();
    run_pipeline(config_for(&temp)).unwrap();
    let storage = FileSystemStorageBackend::new(temp.path());

    let summary: Vec<OverallSummary> =
        read_table(&storage, "gold/kpi_estadisticas_generales.csv").unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].total_participantes, 25);
    assert_eq!(summary[0].total_varones + summary[0].total_damas, 25);
    assert_eq!(summary[0].tiempo_ganador, "1:12:45");

    let top: Vec<GenderTop> = read_table(&storage, "gold/kpi_top5_por_genero.csv").unwrap();
    let clean: Vec<CleanRecord> = read_table(&storage, "silver/resultados_clean.csv").unwrap();
    let seconds: HashMap<u32, u32> = clean
        .iter()
        .map(|r| (r.pos_general, r.tiempo_segundos))
        .collect();

    for gender in [GENDER_MEN, GENDER_WOMEN] {
        let rows: Vec<&GenderTop> = top.iter().filter(|r| r.genero == gender).collect();
        let available = clean.iter().filter(|r| r.genero == gender).count();
        assert!(rows.len() <= 5);
        assert!(rows.len() <= available);

        let times: Vec<u32> = rows.iter().map(|r| seconds[&r.pos_general]).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        let ranks: Vec<usize> = rows.iter().map(|r| r.ranking_genero).collect();
        assert_eq!(ranks, (1..=rows.len()).collect::<Vec<_>>());
    }

    let distribution: Vec<AgeDistribution> =
        read_table(&storage, "gold/kpi_distribucion_edad.csv").unwrap();
    let total: usize = distribution.iter().map(|r| r.cantidad).sum();
    assert_eq!(total, 25);
    for row in &distribution {
        assert!((0.0..=100.0).contains(&row.porcentaje));
        let expected = (row.cantidad as f64 / total as f64 * 100.0 * 100.0).round() / 100.0;
        assert_eq!(row.porcentaje, expected);
    }

    let pace: Vec<PaceRanking> = read_table(&storage, "gold/kpi_top10_ritmo.csv").unwrap();
    assert_eq!(pace.len(), 10);
    assert_eq!(pace[0].tiempo_oficial, "1:12:45");
    assert_eq!(pace[0].ritmo_min_km, "3:26");
    assert_eq!(pace[0].velocidad_kmh, Some(17.4));
}

#[test]
fn test_validation_reports_missing_kpi() {
    let temp = TempDir::new().unwrap();
    run_pipeline(config_for(&temp)).unwrap();

    std::fs::remove_file(temp.path().join("gold/kpi_distribucion_edad.csv")).unwrap();

    let config = config_for(&temp).with_stages(vec![PipelineStage::Validate]);
    let report = run_pipeline(config).unwrap();

    assert_eq!(report.status, PipelineStatus::Partial);
    let validation = report.validation.unwrap();
    assert_eq!(validation.present, 4);
    assert_eq!(validation.total, 5);
    assert_eq!(
        validation.summary(),
        "Pipeline completed with errors: 4/5 files. Missing: [distribucion_edad]"
    );
}

#[test]
fn test_stages_resume_from_well_known_locations() {
    let temp = TempDir::new().unwrap();

    let first = config_for(&temp).with_stages(vec![PipelineStage::Bronze, PipelineStage::Silver]);
    let report = run_pipeline(first).unwrap();
    assert!(report.gold_outputs.is_none());
    assert!(!temp.path().join("gold").exists());

    let second = config_for(&temp).with_stages(vec![PipelineStage::Validate, PipelineStage::Gold]);
    let report = run_pipeline(second).unwrap();
    assert_eq!(
        report.stages_completed,
        vec![PipelineStage::Gold, PipelineStage::Validate]
    );
    assert!(report.is_success());
}

#[test]
fn test_custom_source_and_distance() {
    let temp = TempDir::new().unwrap();
    let source = InMemorySource::new(vec![
        RawRecord::new(
            "1º",
            "1º",
            "ana pérez",
            "Damas 18 a 29 añosdorsal: 7",
            "1:00:00",
        ),
        RawRecord::new(
            "2º",
            "1º",
            "LUIS SOTO",
            "Varones 40 a 49 añosdorsal: 12",
            "1:30:00",
        ),
    ]);

    let config = config_for(&temp).with_distance_km(10.0);
    let executor = PipelineExecutor::with_backends(
        config,
        Box::new(FileSystemStorageBackend::new(temp.path())),
        Box::new(source),
    )
    .unwrap();
    let report = executor.run().unwrap();
    assert!(report.is_success());

    let storage = FileSystemStorageBackend::new(temp.path());
    let clean: Vec<CleanRecord> = read_table(&storage, "silver/resultados_clean.csv").unwrap();
    assert_eq!(clean[0].nombre_corredor, "Ana Pérez");
    assert_eq!(clean[0].ritmo_min_km, "6:00");
    assert_eq!(clean[0].velocidad_kmh, Some(10.0));
    assert_eq!(clean[1].dorsal, Some(12));
    assert_eq!(clean[1].ritmo_min_km, "9:00");

    assert!(storage.file_exists("gold/kpi_tiempo_por_categoria.csv").unwrap());
}

#[test]
fn test_unparseable_time_is_not_the_winner() {
    let temp = TempDir::new().unwrap();
    let source = InMemorySource::new(vec![
        RawRecord::new(
            "1º",
            "1º",
            "ana pérez",
            "Damas 18 a 29 añosdorsal: 7",
            "1:00:00",
        ),
        RawRecord::new("2º", "1º", "luis soto", "Juvenil", "DNF"),
    ]);

    let executor = PipelineExecutor::with_backends(
        config_for(&temp),
        Box::new(FileSystemStorageBackend::new(temp.path())),
        Box::new(source),
    )
    .unwrap();
    executor.run().unwrap();

    let storage = FileSystemStorageBackend::new(temp.path());
    let summary: Vec<OverallSummary> =
        read_table(&storage, "gold/kpi_estadisticas_generales.csv").unwrap();
    assert_eq!(summary[0].total_participantes, 2);
    assert_eq!(summary[0].tiempo_ganador, "1:00:00");
    assert_eq!(summary[0].tiempo_ultimo, "1:00:00");
    assert_eq!(summary[0].tiempo_promedio_segundos, 1800.0);
}

#[test]
fn test_config_from_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pipeline.toml");
    let data_dir = temp.path().join("race");
    std::fs::write(
        &path,
        format!(
            "name = \"la-serena\"\ndata_dir = {:?}\ngold_dir = \"kpis\"\nstages = [\"bronze\", \"silver\", \"gold\"]\n",
            data_dir.display().to_string()
        ),
    )
    .unwrap();

    let config = PipelineConfig::from_toml_file(&path).unwrap();
    let report = run_pipeline(config).unwrap();

    assert_eq!(report.name.as_deref(), Some("la-serena"));
    assert_eq!(report.stages_completed.len(), 3);
    assert!(data_dir.join("kpis/kpi_top10_ritmo.csv").exists());
}

//! Gold stage: KPI tables
//!
//! Reads the Silver table, computes the five KPI tables and writes each one
//! to its fixed file in the gold directory. All tables are computed before
//! the first write, so a computation failure leaves the previous Gold set
//! untouched.

mod kpi;

pub use kpi::{
    KpiTables, TOP_OVERALL, TOP_PER_GENDER, age_distribution, category_stats, compute_kpis,
    overall_summary, top_by_gender, top_pace,
};

use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::models::{CleanRecord, KpiKind};
use crate::pipeline::{PipelineConfig, PipelineResult};
use crate::storage::{StorageBackend, read_table, write_table};

/// Location of every Gold artifact, keyed by KPI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoldOutputs {
    locations: BTreeMap<KpiKind, String>,
}

impl GoldOutputs {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping pointing at the well-known Gold locations for `config`
    pub fn well_known(config: &PipelineConfig) -> Self {
        let mut outputs = Self::new();
        for kind in KpiKind::all() {
            outputs.insert(kind, config.gold_location(kind));
        }
        outputs
    }

    /// Record the location of a KPI table
    pub fn insert(&mut self, kind: KpiKind, location: impl Into<String>) {
        self.locations.insert(kind, location.into());
    }

    /// Location of a KPI table
    pub fn get(&self, kind: KpiKind) -> Option<&str> {
        self.locations.get(&kind).map(String::as_str)
    }

    /// Iterate over (KPI, location) in KPI order
    pub fn iter(&self) -> impl Iterator<Item = (KpiKind, &str)> {
        self.locations.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Run the Gold stage and return where each KPI table was written
///
/// `input` defaults to the Silver stage's well-known location.
pub fn run_gold(
    config: &PipelineConfig,
    storage: &dyn StorageBackend,
    input: Option<&str>,
) -> PipelineResult<GoldOutputs> {
    run_gold_at(config, storage, input, Local::now().naive_local())
}

/// Run the Gold stage with an explicit generation timestamp
pub fn run_gold_at(
    config: &PipelineConfig,
    storage: &dyn StorageBackend,
    input: Option<&str>,
    generated_at: NaiveDateTime,
) -> PipelineResult<GoldOutputs> {
    let input = input
        .map(str::to_string)
        .unwrap_or_else(|| config.silver_location());
    info!(input = %input, "Starting gold aggregation");

    let result = aggregate(config, storage, &input, generated_at);
    if let Err(e) = &result {
        error!(input = %input, error = %e, "Gold aggregation failed");
    }
    result
}

fn aggregate(
    config: &PipelineConfig,
    storage: &dyn StorageBackend,
    input: &str,
    generated_at: NaiveDateTime,
) -> PipelineResult<GoldOutputs> {
    let records: Vec<CleanRecord> = read_table(storage, input)?;
    info!(rows = records.len(), "Read silver records");

    let tables = compute_kpis(&records, config.distance_km, generated_at)?;

    storage.create_dir(&config.gold_dir)?;
    let mut outputs = GoldOutputs::new();

    for kind in KpiKind::all() {
        let location = config.gold_location(kind);
        let rows = match kind {
            KpiKind::EstadisticasGenerales => {
                write_table(storage, &location, std::slice::from_ref(&tables.summary))?;
                1
            }
            KpiKind::TiempoPorCategoria => {
                write_table(storage, &location, &tables.categories)?;
                tables.categories.len()
            }
            KpiKind::Top5PorGenero => {
                write_table(storage, &location, &tables.gender_top)?;
                tables.gender_top.len()
            }
            KpiKind::DistribucionEdad => {
                write_table(storage, &location, &tables.age_distribution)?;
                tables.age_distribution.len()
            }
            KpiKind::Top10Ritmo => {
                write_table(storage, &location, &tables.pace_top)?;
                tables.pace_top.len()
            }
        };

        info!(kpi = kind.name(), rows, location = %location, "KPI written");
        outputs.insert(kind, location);
    }

    info!(files = outputs.len(), "Gold completed");
    Ok(outputs)
}

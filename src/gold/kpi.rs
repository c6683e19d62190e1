//! KPI computations over clean records
//!
//! Pure functions: no I/O, no clock. Rankings use a stable ascending sort on
//! elapsed seconds, so ties keep the Silver row order.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::models::{
    AgeDistribution, CategoryStats, CleanRecord, GENDER_MEN, GENDER_WOMEN, GenderTop,
    OverallSummary, PaceRanking,
};
use crate::pipeline::{PipelineError, PipelineResult};
use crate::silver::{pace, round2};

/// Rows kept per gender in the gender leaderboard
pub const TOP_PER_GENDER: usize = 5;

/// Rows kept in the overall pace leaderboard
pub const TOP_OVERALL: usize = 10;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// All five Gold tables for one run
#[derive(Debug, Clone, PartialEq)]
pub struct KpiTables {
    pub summary: OverallSummary,
    pub categories: Vec<CategoryStats>,
    pub gender_top: Vec<GenderTop>,
    pub age_distribution: Vec<AgeDistribution>,
    pub pace_top: Vec<PaceRanking>,
}

/// Compute every KPI table. Fails on an empty record set.
pub fn compute_kpis(
    records: &[CleanRecord],
    distance_km: f64,
    generated_at: NaiveDateTime,
) -> PipelineResult<KpiTables> {
    Ok(KpiTables {
        summary: overall_summary(records, distance_km, generated_at)?,
        categories: category_stats(records, distance_km),
        gender_top: top_by_gender(records, TOP_PER_GENDER),
        age_distribution: age_distribution(records),
        pace_top: top_pace(records, TOP_OVERALL),
    })
}

/// Race-wide summary row
///
/// Fastest and slowest times come from an explicit sort, not from row
/// position, so the result does not depend on the input order. Rows whose
/// time could not be parsed (zero seconds) only count when no row has a time.
pub fn overall_summary(
    records: &[CleanRecord],
    distance_km: f64,
    generated_at: NaiveDateTime,
) -> PipelineResult<OverallSummary> {
    let mut sorted = sorted_by_time(records.iter().filter(|r| r.tiempo_segundos > 0));
    if sorted.is_empty() {
        sorted = sorted_by_time(records.iter());
    }
    let (Some(fastest), Some(slowest)) = (sorted.first(), sorted.last()) else {
        return Err(PipelineError::EmptyInput(
            "no clean records to summarize".to_string(),
        ));
    };

    let mean_seconds = mean(records.iter().map(|r| f64::from(r.tiempo_segundos)));

    Ok(OverallSummary {
        total_participantes: records.len(),
        total_varones: count_gender(records, GENDER_MEN),
        total_damas: count_gender(records, GENDER_WOMEN),
        tiempo_ganador: fastest.tiempo_oficial.clone(),
        tiempo_ultimo: slowest.tiempo_oficial.clone(),
        tiempo_promedio_segundos: round2(mean_seconds),
        ritmo_promedio: pace(mean_seconds.trunc() as u32, distance_km),
        velocidad_promedio_kmh: mean_speed(records.iter()),
        fecha_proceso: generated_at.format(TIMESTAMP_FORMAT).to_string(),
    })
}

/// One row per category, ordered by category name
pub fn category_stats(records: &[CleanRecord], distance_km: f64) -> Vec<CategoryStats> {
    let mut groups: BTreeMap<&str, Vec<&CleanRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.categoria.as_str()).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(category, rows)| {
            let mean_seconds = mean(rows.iter().map(|r| f64::from(r.tiempo_segundos)));
            let times = rows.iter().map(|r| r.tiempo_segundos);

            CategoryStats {
                categoria: category.to_string(),
                tiempo_promedio_seg: round2(mean_seconds),
                tiempo_mejor_seg: times.clone().min().unwrap_or(0),
                tiempo_peor_seg: times.max().unwrap_or(0),
                cantidad_corredores: rows.len(),
                velocidad_promedio_kmh: mean_speed(rows.iter().copied()),
                ritmo_promedio: pace(round2(mean_seconds).trunc() as u32, distance_km),
            }
        })
        .collect()
}

/// Fastest runners per gender: the men's block first, then the women's
pub fn top_by_gender(records: &[CleanRecord], limit: usize) -> Vec<GenderTop> {
    [GENDER_MEN, GENDER_WOMEN]
        .into_iter()
        .flat_map(|gender| {
            let same_gender = records.iter().filter(move |r| r.genero == gender);
            sorted_by_time(same_gender)
                .into_iter()
                .take(limit)
                .enumerate()
                .map(move |(i, r)| GenderTop {
                    pos_general: r.pos_general,
                    nombre_corredor: r.nombre_corredor.clone(),
                    categoria: r.categoria.clone(),
                    tiempo_oficial: r.tiempo_oficial.clone(),
                    ritmo_min_km: r.ritmo_min_km.clone(),
                    ranking_genero: i + 1,
                    genero: gender.to_string(),
                })
        })
        .collect()
}

/// Participant count and share per (age range, gender), ordered by key
pub fn age_distribution(records: &[CleanRecord]) -> Vec<AgeDistribution> {
    let total = records.len();
    let mut groups: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for record in records {
        *groups
            .entry((record.rango_edad.as_str(), record.genero.as_str()))
            .or_default() += 1;
    }

    groups
        .into_iter()
        .map(|((age_range, gender), count)| AgeDistribution {
            rango_edad: age_range.to_string(),
            genero: gender.to_string(),
            cantidad: count,
            porcentaje: round2(count as f64 / total as f64 * 100.0),
        })
        .collect()
}

/// Fastest runners overall
pub fn top_pace(records: &[CleanRecord], limit: usize) -> Vec<PaceRanking> {
    sorted_by_time(records.iter())
        .into_iter()
        .take(limit)
        .map(|r| PaceRanking {
            pos_general: r.pos_general,
            dorsal: r.dorsal,
            nombre_corredor: r.nombre_corredor.clone(),
            categoria: r.categoria.clone(),
            tiempo_oficial: r.tiempo_oficial.clone(),
            ritmo_min_km: r.ritmo_min_km.clone(),
            velocidad_kmh: r.velocidad_kmh,
        })
        .collect()
}

fn sorted_by_time<'a>(records: impl Iterator<Item = &'a CleanRecord>) -> Vec<&'a CleanRecord> {
    let mut sorted: Vec<&CleanRecord> = records.collect();
    sorted.sort_by_key(|r| r.tiempo_segundos);
    sorted
}

fn count_gender(records: &[CleanRecord], gender: &str) -> usize {
    records.iter().filter(|r| r.genero == gender).count()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

// Rows without a speed (zero elapsed time) are left out of the mean
fn mean_speed<'a>(records: impl Iterator<Item = &'a CleanRecord>) -> Option<f64> {
    let speeds: Vec<f64> = records.filter_map(|r| r.velocidad_kmh).collect();
    if speeds.is_empty() {
        None
    } else {
        Some(round2(mean(speeds.into_iter())))
    }
}

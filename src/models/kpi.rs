//! Gold KPI tables

use serde::{Deserialize, Serialize};

use crate::storage::TableRow;

/// The five Gold KPI tables, in the order they are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    EstadisticasGenerales,
    TiempoPorCategoria,
    Top5PorGenero,
    DistribucionEdad,
    Top10Ritmo,
}

impl KpiKind {
    /// Get all KPIs in production order
    pub fn all() -> [Self; 5] {
        [
            Self::EstadisticasGenerales,
            Self::TiempoPorCategoria,
            Self::Top5PorGenero,
            Self::DistribucionEdad,
            Self::Top10Ritmo,
        ]
    }

    /// KPI name as reported to callers
    pub fn name(&self) -> &'static str {
        match self {
            Self::EstadisticasGenerales => "estadisticas_generales",
            Self::TiempoPorCategoria => "tiempo_por_categoria",
            Self::Top5PorGenero => "top5_por_genero",
            Self::DistribucionEdad => "distribucion_edad",
            Self::Top10Ritmo => "top10_ritmo",
        }
    }

    /// Fixed file name inside the gold directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::EstadisticasGenerales => "kpi_estadisticas_generales.csv",
            Self::TiempoPorCategoria => "kpi_tiempo_por_categoria.csv",
            Self::Top5PorGenero => "kpi_top5_por_genero.csv",
            Self::DistribucionEdad => "kpi_distribucion_edad.csv",
            Self::Top10Ritmo => "kpi_top10_ritmo.csv",
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::EstadisticasGenerales => "Overall race statistics",
            Self::TiempoPorCategoria => "Time statistics per category",
            Self::Top5PorGenero => "Five fastest runners per gender",
            Self::DistribucionEdad => "Participants per age range and gender",
            Self::Top10Ritmo => "Ten best paces overall",
        }
    }
}

impl std::fmt::Display for KpiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for KpiKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("Unknown KPI: {}", s))
    }
}

/// Single-row summary of the whole race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub total_participantes: usize,
    pub total_varones: usize,
    pub total_damas: usize,
    /// Official time of the fastest runner
    pub tiempo_ganador: String,
    /// Official time of the slowest runner
    pub tiempo_ultimo: String,
    pub tiempo_promedio_segundos: f64,
    pub ritmo_promedio: String,
    pub velocidad_promedio_kmh: Option<f64>,
    pub fecha_proceso: String,
}

impl TableRow for OverallSummary {
    const COLUMNS: &'static [&'static str] = &[
        "total_participantes",
        "total_varones",
        "total_damas",
        "tiempo_ganador",
        "tiempo_ultimo",
        "tiempo_promedio_segundos",
        "ritmo_promedio",
        "velocidad_promedio_kmh",
        "fecha_proceso",
    ];
}

/// Time statistics for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub categoria: String,
    pub tiempo_promedio_seg: f64,
    pub tiempo_mejor_seg: u32,
    pub tiempo_peor_seg: u32,
    pub cantidad_corredores: usize,
    pub velocidad_promedio_kmh: Option<f64>,
    pub ritmo_promedio: String,
}

impl TableRow for CategoryStats {
    const COLUMNS: &'static [&'static str] = &[
        "categoria",
        "tiempo_promedio_seg",
        "tiempo_mejor_seg",
        "tiempo_peor_seg",
        "cantidad_corredores",
        "velocidad_promedio_kmh",
        "ritmo_promedio",
    ];
}

/// One entry of a per-gender leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderTop {
    pub pos_general: u32,
    pub nombre_corredor: String,
    pub categoria: String,
    pub tiempo_oficial: String,
    pub ritmo_min_km: String,
    /// Rank within the gender, starting at 1
    pub ranking_genero: usize,
    pub genero: String,
}

impl TableRow for GenderTop {
    const COLUMNS: &'static [&'static str] = &[
        "pos_general",
        "nombre_corredor",
        "categoria",
        "tiempo_oficial",
        "ritmo_min_km",
        "ranking_genero",
        "genero",
    ];
}

/// Participant count for one (age range, gender) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeDistribution {
    pub rango_edad: String,
    pub genero: String,
    pub cantidad: usize,
    /// Share of all participants, 0-100 with two decimals
    pub porcentaje: f64,
}

impl TableRow for AgeDistribution {
    const COLUMNS: &'static [&'static str] = &["rango_edad", "genero", "cantidad", "porcentaje"];
}

/// One entry of the overall pace leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaceRanking {
    pub pos_general: u32,
    pub dorsal: Option<u32>,
    pub nombre_corredor: String,
    pub categoria: String,
    pub tiempo_oficial: String,
    pub ritmo_min_km: String,
    pub velocidad_kmh: Option<f64>,
}

impl TableRow for PaceRanking {
    const COLUMNS: &'static [&'static str] = &[
        "pos_general",
        "dorsal",
        "nombre_corredor",
        "categoria",
        "tiempo_oficial",
        "ritmo_min_km",
        "velocidad_kmh",
    ];
}

//! Cleaned race result rows (Silver)

use serde::{Deserialize, Serialize};

use crate::storage::TableRow;

/// One participant after Silver parsing and normalization
///
/// Field order is the column order of `resultados_clean.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub pos_general: u32,
    pub pos_categoria: u32,
    /// Bib number, absent when the category field could not be decomposed
    pub dorsal: Option<u32>,
    pub nombre_corredor: String,
    pub genero: String,
    pub rango_edad: String,
    pub categoria: String,
    /// Official time exactly as received
    pub tiempo_oficial: String,
    pub tiempo_segundos: u32,
    /// Pace per kilometre, `M:SS`
    pub ritmo_min_km: String,
    /// Average speed in km/h, absent when the elapsed time is zero
    pub velocidad_kmh: Option<f64>,
}

impl TableRow for CleanRecord {
    const COLUMNS: &'static [&'static str] = &[
        "pos_general",
        "pos_categoria",
        "dorsal",
        "nombre_corredor",
        "genero",
        "rango_edad",
        "categoria",
        "tiempo_oficial",
        "tiempo_segundos",
        "ritmo_min_km",
        "velocidad_kmh",
    ];
}

//! Raw race result rows (Bronze)

use serde::{Deserialize, Serialize};

use crate::storage::TableRow;

/// One participant as published by the timing company
///
/// Every field is text; nothing has been validated yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Overall rank with ordinal marker, e.g. `127º`
    pub pos_general: String,
    /// Category rank with ordinal marker
    pub pos_categoria: String,
    /// Runner name in whatever casing the source used
    pub nombre_corredor: String,
    /// Category and bib glued together: `Varones 30 a 39 añosdorsal: 2395`
    pub categoria_dorsal: String,
    /// Official time, `H:MM:SS`
    pub tiempo_oficial: String,
}

impl RawRecord {
    pub fn new(
        pos_general: impl Into<String>,
        pos_categoria: impl Into<String>,
        nombre_corredor: impl Into<String>,
        categoria_dorsal: impl Into<String>,
        tiempo_oficial: impl Into<String>,
    ) -> Self {
        Self {
            pos_general: pos_general.into(),
            pos_categoria: pos_categoria.into(),
            nombre_corredor: nombre_corredor.into(),
            categoria_dorsal: categoria_dorsal.into(),
            tiempo_oficial: tiempo_oficial.into(),
        }
    }
}

impl TableRow for RawRecord {
    const COLUMNS: &'static [&'static str] = &[
        "pos_general",
        "pos_categoria",
        "nombre_corredor",
        "categoria_dorsal",
        "tiempo_oficial",
    ];
}

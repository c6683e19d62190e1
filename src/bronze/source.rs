//! Raw record sources
//!
//! Bronze does not know where results come from. A [`RecordSource`] fetches
//! raw rows; the default [`SampleRaceSource`] serves the La Serena 2024 half
//! marathon reference data.

use crate::models::RawRecord;
use crate::pipeline::PipelineResult;

/// Something that can produce raw result rows
pub trait RecordSource {
    /// Short name used in logs and errors
    fn name(&self) -> &str;

    /// Fetch all raw rows
    fn fetch(&self) -> PipelineResult<Vec<RawRecord>>;
}

/// Fixed sample of 25 participants with the quirks of the real export:
/// glued category and bib, ordinal markers, inconsistent name casing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleRaceSource;

const SAMPLE_ROWS: [[&str; 5]; 25] = [
    ["1º", "1º", "Carlos Andrés Díaz Moreno", "Varones 18 a 29 añosdorsal: 2001", "1:12:45"],
    ["2º", "1º", "Miguel Ángel Torres", "Varones 30 a 39 añosdorsal: 2102", "1:15:22"],
    ["3º", "2º", "Juan Pablo Soto Vera", "Varones 18 a 29 añosdorsal: 2015", "1:16:08"],
    ["4º", "2º", "Roberto Carlos Muñoz", "Varones 30 a 39 añosdorsal: 2156", "1:18:33"],
    ["5º", "1º", "Andrea Paz González", "Damas 18 a 29 añosdorsal: 2201", "1:19:45"],
    ["15º", "3º", "Pedro José Ramírez", "Varones 30 a 39 añosdorsal: 2178", "1:25:12"],
    ["22º", "1º", "María José Pérez Silva", "Damas 30 a 39 añosdorsal: 2245", "1:28:56"],
    ["35º", "1º", "Francisco Javier López", "Varones 40 a 49 añosdorsal: 2301", "1:32:18"],
    ["48º", "2º", "Carmen Gloria Fuentes", "Damas 30 a 39 añosdorsal: 2267", "1:35:44"],
    ["56º", "4º", "Andrés Felipe Castillo", "Varones 30 a 39 añosdorsal: 2189", "1:37:22"],
    ["72º", "2º", "Patricia Andrea Núñez", "Damas 40 a 49 añosdorsal: 2312", "1:40:15"],
    ["89º", "5º", "Diego Alejandro Vera", "Varones 30 a 39 añosdorsal: 2195", "1:42:58"],
    ["127º", "47º", "Abel Ballon Aguirre", "Varones 30 a 39 añosdorsal: 2395", "1:46:32"],
    ["145º", "3º", "Claudia Marcela Rojas", "Damas 40 a 49 añosdorsal: 2334", "1:49:18"],
    ["171º", "43º", "Alberto Ignacio Salas Nicolau", "Varones 40 a 49 añosdorsal: 2296", "1:52:08"],
    ["198º", "12º", "Valentina Paz Morales", "Damas 18 a 29 añosdorsal: 2223", "1:55:42"],
    ["215º", "8º", "José Manuel Contreras", "Varones 50 a 59 añosdorsal: 2401", "1:58:15"],
    ["234º", "4º", "Rosa Elena Martínez", "Damas 40 a 49 añosdorsal: 2356", "2:02:33"],
    ["256º", "15º", "Sergio Antonio Pizarro", "Varones 50 a 59 añosdorsal: 2418", "2:06:48"],
    ["266º", "19º", "alexandrina vivar diaz", "Damas 40 a 49 añosdorsal: 2084", "2:09:40"],
    ["278º", "1º", "Manuel Eduardo Lagos", "Varones 60+ añosdorsal: 2501", "2:12:22"],
    ["289º", "5º", "Isabel Cristina Araya", "Damas 50 a 59 añosdorsal: 2445", "2:15:55"],
    ["301º", "2º", "Héctor Raúl Mendoza", "Varones 60+ añosdorsal: 2512", "2:20:18"],
    ["315º", "1º", "Teresa de Jesús Campos", "Damas 60+ añosdorsal: 2521", "2:25:42"],
    ["328º", "6º", "Gabriela Fernanda Ríos", "Damas 50 a 59 añosdorsal: 2467", "2:30:15"],
];

impl RecordSource for SampleRaceSource {
    fn name(&self) -> &str {
        "sample-la-serena-2024"
    }

    fn fetch(&self) -> PipelineResult<Vec<RawRecord>> {
        Ok(SAMPLE_ROWS
            .iter()
            .map(|[general, category, name, category_bib, time]| {
                RawRecord::new(*general, *category, *name, *category_bib, *time)
            })
            .collect())
    }
}

/// Source backed by rows already in memory
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    rows: Vec<RawRecord>,
}

impl InMemorySource {
    pub fn new(rows: Vec<RawRecord>) -> Self {
        Self { rows }
    }
}

impl RecordSource for InMemorySource {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn fetch(&self) -> PipelineResult<Vec<RawRecord>> {
        Ok(self.rows.clone())
    }
}

//! Row types for every table the pipeline reads or writes
//!
//! - [`RawRecord`]: Bronze results as received from the source
//! - [`CleanRecord`]: Silver results after parsing and normalization
//! - [`kpi`]: Gold aggregate tables

pub mod clean;
pub mod kpi;
pub mod raw;

pub use clean::CleanRecord;
pub use kpi::{AgeDistribution, CategoryStats, GenderTop, KpiKind, OverallSummary, PaceRanking};
pub use raw::RawRecord;

/// Gender token for men's categories
pub const GENDER_MEN: &str = "Varones";
/// Gender token for women's categories
pub const GENDER_WOMEN: &str = "Damas";
/// Placeholder for fields that could not be decomposed
pub const UNKNOWN: &str = "Desconocido";

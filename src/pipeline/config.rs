//! Pipeline configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use crate::models::KpiKind;

/// Half marathon distance in kilometres
pub const DEFAULT_DISTANCE_KM: f64 = 21.1;

/// File name of the Bronze artifact
pub const RAW_FILE_NAME: &str = "resultados_raw.csv";

/// File name of the Silver artifact
pub const CLEAN_FILE_NAME: &str = "resultados_clean.csv";

/// Main pipeline configuration
///
/// Passed explicitly to every stage. Every field has a default, so a TOML
/// file only needs the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Name of the pipeline run
    pub name: Option<String>,
    /// Base directory all stage directories live under
    pub data_dir: PathBuf,
    /// Bronze directory, relative to `data_dir`
    pub bronze_dir: String,
    /// Silver directory, relative to `data_dir`
    pub silver_dir: String,
    /// Gold directory, relative to `data_dir`
    pub gold_dir: String,
    /// Race distance in kilometres
    pub distance_km: f64,
    /// Stages to run (empty = all)
    pub stages: Vec<PipelineStage>,
    /// Verbose output
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: None,
            data_dir: PathBuf::from("data"),
            bronze_dir: "bronze".to_string(),
            silver_dir: "silver".to_string(),
            gold_dir: "gold".to_string(),
            distance_km: DEFAULT_DISTANCE_KM,
            stages: Vec::new(),
            verbose: false,
        }
    }
}

impl PipelineConfig {
    /// Create a new pipeline config
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> PipelineResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file
    pub fn from_toml_file(path: &Path) -> PipelineResult<Self> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Set the run name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the base data directory
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Set the race distance
    pub fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    /// Set specific stages to run
    pub fn with_stages(mut self, stages: Vec<PipelineStage>) -> Self {
        self.stages = stages;
        self
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Get stages to run (all if empty), always in pipeline order
    pub fn effective_stages(&self) -> Vec<PipelineStage> {
        if self.stages.is_empty() {
            PipelineStage::all()
        } else {
            let mut stages = self.stages.clone();
            stages.sort_by_key(|s| s.index());
            stages.dedup();
            stages
        }
    }

    /// Well-known location of the Bronze artifact
    pub fn bronze_location(&self) -> String {
        format!("{}/{}", self.bronze_dir, RAW_FILE_NAME)
    }

    /// Well-known location of the Silver artifact
    pub fn silver_location(&self) -> String {
        format!("{}/{}", self.silver_dir, CLEAN_FILE_NAME)
    }

    /// Well-known location of a Gold artifact
    pub fn gold_location(&self, kpi: KpiKind) -> String {
        format!("{}/{}", self.gold_dir, kpi.file_name())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.distance_km.is_finite() || self.distance_km <= 0.0 {
            return Err(format!(
                "Race distance must be a positive number of kilometres, got {}",
                self.distance_km
            ));
        }

        for (key, dir) in [
            ("bronze_dir", &self.bronze_dir),
            ("silver_dir", &self.silver_dir),
            ("gold_dir", &self.gold_dir),
        ] {
            if dir.trim().is_empty() {
                return Err(format!("{} must not be empty", key));
            }
            if dir.contains("..") {
                return Err(format!("{} must stay inside the data directory", key));
            }
        }

        Ok(())
    }
}

/// Pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// Stage 1: Materialize raw results
    Bronze,
    /// Stage 2: Clean and normalize results
    Silver,
    /// Stage 3: Compute KPI tables
    Gold,
    /// Stage 4: Check Gold outputs exist
    Validate,
}

impl PipelineStage {
    /// Get all stages in execution order
    pub fn all() -> Vec<Self> {
        vec![Self::Bronze, Self::Silver, Self::Gold, Self::Validate]
    }

    /// Get stage name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Validate => "validate",
        }
    }

    /// Get stage description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Bronze => "Ingest raw race results",
            Self::Silver => "Parse, clean and derive pace metrics",
            Self::Gold => "Compute KPI tables",
            Self::Validate => "Check that all KPI tables were written",
        }
    }

    /// Get stage index (1-based)
    pub fn index(&self) -> usize {
        match self {
            Self::Bronze => 1,
            Self::Silver => 2,
            Self::Gold => 3,
            Self::Validate => 4,
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PipelineStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bronze" | "1" => Ok(Self::Bronze),
            "silver" | "2" => Ok(Self::Silver),
            "gold" | "3" => Ok(Self::Gold),
            "validate" | "validation" | "4" => Ok(Self::Validate),
            _ => Err(format!("Unknown stage: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.distance_km, 21.1);
        assert_eq!(config.bronze_location(), "bronze/resultados_raw.csv");
        assert_eq!(config.silver_location(), "silver/resultados_clean.csv");
        assert_eq!(
            config.gold_location(KpiKind::Top10Ritmo),
            "gold/kpi_top10_ritmo.csv"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_config_builder() {
        let config = PipelineConfig::new()
            .with_name("la-serena-2024")
            .with_data_dir("/tmp/race")
            .with_distance_km(42.195)
            .with_verbose(true);

        assert_eq!(config.name.as_deref(), Some("la-serena-2024"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/race"));
        assert_eq!(config.distance_km, 42.195);
        assert!(config.verbose);
    }

    #[test]
    fn test_effective_stages_are_ordered() {
        let config = PipelineConfig::default();
        assert_eq!(config.effective_stages().len(), 4);

        let config = PipelineConfig::default().with_stages(vec![
            PipelineStage::Gold,
            PipelineStage::Silver,
            PipelineStage::Gold,
        ]);
        assert_eq!(
            config.effective_stages(),
            vec![PipelineStage::Silver, PipelineStage::Gold]
        );
    }

    #[test]
    fn test_pipeline_stage_parse() {
        assert_eq!(
            "bronze".parse::<PipelineStage>().unwrap(),
            PipelineStage::Bronze
        );
        assert_eq!("3".parse::<PipelineStage>().unwrap(), PipelineStage::Gold);
        assert_eq!(
            "Validation".parse::<PipelineStage>().unwrap(),
            PipelineStage::Validate
        );
        assert!("platinum".parse::<PipelineStage>().is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = PipelineConfig::default().with_distance_km(0.0);
        assert!(config.validate().is_err());

        let config = PipelineConfig::default().with_distance_km(f64::NAN);
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.gold_dir = "../outside".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let config = PipelineConfig::from_toml_str(
            r#"
            name = "nightly"
            data_dir = "/var/lib/race"
            distance_km = 10.0
            stages = ["bronze", "silver"]
            "#,
        )
        .unwrap();

        assert_eq!(config.name.as_deref(), Some("nightly"));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/race"));
        assert_eq!(config.distance_km, 10.0);
        assert_eq!(config.gold_dir, "gold");
        assert_eq!(
            config.stages,
            vec![PipelineStage::Bronze, PipelineStage::Silver]
        );

        assert!(PipelineConfig::from_toml_str("distance_km = \"far\"").is_err());
    }
}

//! Validation of Gold outputs
//!
//! Checks that every KPI table in a [`GoldOutputs`] mapping exists. Missing
//! files are reported, never raised: partial success is a valid outcome.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::gold::GoldOutputs;
use crate::storage::StorageBackend;

/// Outcome of checking the Gold outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of outputs found in storage
    pub present: usize,
    /// Number of outputs checked
    pub total: usize,
    /// Names of the outputs that were not found
    pub missing: Vec<String>,
}

impl ValidationReport {
    /// True when every output was found
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Human readable one-line summary
    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!(
                "Pipeline completed successfully! {}/{} files generated.",
                self.present, self.total
            )
        } else {
            format!(
                "Pipeline completed with errors: {}/{} files. Missing: [{}]",
                self.present,
                self.total,
                self.missing.join(", ")
            )
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Check that every Gold output exists
///
/// A storage error while checking counts the output as missing.
pub fn validate_outputs(outputs: &GoldOutputs, storage: &dyn StorageBackend) -> ValidationReport {
    info!(outputs = outputs.len(), "Validating gold outputs");

    let mut present = 0;
    let mut missing = Vec::new();

    for (kind, location) in outputs.iter() {
        match storage.file_exists(location) {
            Ok(true) => {
                present += 1;
                info!(kpi = kind.name(), location, "Output present");
            }
            Ok(false) => {
                warn!(kpi = kind.name(), location, "Output not found");
                missing.push(kind.name().to_string());
            }
            Err(e) => {
                warn!(kpi = kind.name(), location, error = %e, "Could not check output");
                missing.push(kind.name().to_string());
            }
        }
    }

    let report = ValidationReport {
        present,
        total: outputs.len(),
        missing,
    };

    if report.is_complete() {
        info!("{}", report.summary());
    } else {
        warn!("{}", report.summary());
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KpiKind;
    use crate::pipeline::PipelineConfig;
    use crate::storage::FileSystemStorageBackend;
    use tempfile::TempDir;

    fn write_all(storage: &FileSystemStorageBackend, outputs: &GoldOutputs) {
        for (_, location) in outputs.iter() {
            storage.write_file(location, b"header\n").unwrap();
        }
    }

    #[test]
    fn test_all_outputs_present() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorageBackend::new(temp.path());
        let outputs = GoldOutputs::well_known(&PipelineConfig::default());
        write_all(&storage, &outputs);

        let report = validate_outputs(&outputs, &storage);
        assert!(report.is_complete());
        assert_eq!(report.present, 5);
        assert_eq!(
            report.summary(),
            "Pipeline completed successfully! 5/5 files generated."
        );
    }

    #[test]
    fn test_one_output_missing() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorageBackend::new(temp.path());
        let outputs = GoldOutputs::well_known(&PipelineConfig::default());
        write_all(&storage, &outputs);
        let removed = temp.path().join(outputs.get(KpiKind::DistribucionEdad).unwrap());
        std::fs::remove_file(removed).unwrap();

        let report = validate_outputs(&outputs, &storage);
        assert!(!report.is_complete());
        assert_eq!(report.present, 4);
        assert_eq!(report.total, 5);
        assert_eq!(report.missing, vec!["distribucion_edad".to_string()]);

        let summary = report.summary();
        assert!(summary.contains("4/5"));
        assert!(summary.contains("distribucion_edad"));
    }

    #[test]
    fn test_unreadable_location_counts_as_missing() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorageBackend::new(temp.path());
        let mut outputs = GoldOutputs::new();
        outputs.insert(KpiKind::Top10Ritmo, "../outside.csv");

        let report = validate_outputs(&outputs, &storage);
        assert_eq!(report.present, 0);
        assert_eq!(report.missing, vec!["top10_ritmo".to_string()]);
    }

    #[test]
    fn test_empty_mapping() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorageBackend::new(temp.path());

        let report = validate_outputs(&GoldOutputs::new(), &storage);
        assert_eq!(report.to_string(), "Pipeline completed successfully! 0/0 files generated.");
    }
}

//! Output formatting for CLI

use crate::pipeline::{PipelineReport, PipelineStage};
use crate::validation::ValidationReport;

/// Format a run report as a multi-line summary
pub fn format_report(report: &PipelineReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nPipeline {} - {}\n", report.run_id, report.status));
    if let Some(name) = &report.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    output.push_str(&format!("Duration: {}\n", report.duration_formatted()));
    output.push_str(&format!(
        "Stages completed: {}\n",
        report.stages_completed.len()
    ));

    for stage in &report.stages_completed {
        if let Some(stage_output) = report.outputs.get(stage.name()) {
            output.push_str(&format!(
                "  - {}: ok ({}ms)\n",
                stage.name(),
                stage_output.duration_ms
            ));
            for file in &stage_output.files {
                output.push_str(&format!("      {}\n", file.display()));
            }
        }
    }

    if let Some(validation) = &report.validation {
        output.push('\n');
        output.push_str(&format_validation(validation));
    }

    output
}

/// Format a validation outcome
pub fn format_validation(report: &ValidationReport) -> String {
    let marker = if report.is_complete() { "✅" } else { "⚠️ " };
    format!("{} {}\n", marker, report.summary())
}

/// Format the stage list for the `stages` command
pub fn format_stage_list() -> String {
    let mut output = String::from("Pipeline stages:\n");
    for stage in PipelineStage::all() {
        output.push_str(&format!(
            "  {}. {:<9} {}\n",
            stage.index(),
            stage.name(),
            stage.description()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineStatus;
    use chrono::Utc;
    use std::collections::BTreeMap;

    #[test]
    fn test_format_validation_partial() {
        let report = ValidationReport {
            present: 4,
            total: 5,
            missing: vec!["top10_ritmo".to_string()],
        };
        let text = format_validation(&report);
        assert!(text.contains("4/5"));
        assert!(text.contains("top10_ritmo"));
    }

    #[test]
    fn test_format_stage_list() {
        let text = format_stage_list();
        for stage in PipelineStage::all() {
            assert!(text.contains(stage.name()));
        }
        assert!(text.contains("4. validate"));
    }

    #[test]
    fn test_format_report() {
        let report = PipelineReport {
            run_id: "run-1".to_string(),
            name: Some("la-serena".to_string()),
            started_at: Utc::now(),
            status: PipelineStatus::Completed,
            stages_completed: Vec::new(),
            duration_ms: 42,
            outputs: BTreeMap::new(),
            gold_outputs: None,
            validation: None,
        };
        let text = format_report(&report);
        assert!(text.contains("Pipeline run-1 - completed"));
        assert!(text.contains("Name: la-serena"));
        assert!(text.contains("Duration: 42ms"));
    }
}

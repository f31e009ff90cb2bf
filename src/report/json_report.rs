//! @ai:module:intent JSON summary report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, SummaryReport
//! @ai:module:stateless true

use crate::metrics::ModelReport;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Results of every model evaluated in one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub timestamp: String,
    pub dataset: String,
    pub models: Vec<ModelReport>,
}

impl SummaryReport {
    /// @ai:intent Stamp ranked reports with the current time
    /// @ai:effects time
    pub fn new(dataset: &str, models: Vec<ModelReport>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            dataset: dataset.to_string(),
            models,
        }
    }
}

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from a summary
    fn generate(&self, summary: &SummaryReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates JSON reports from run summaries
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Location of the summary for a dataset
    /// @ai:effects pure
    pub fn summary_path(results_dir: &Path, dataset: &str) -> std::path::PathBuf {
        results_dir.join(format!("{}__summary.json", dataset))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, summary: &SummaryReport, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(summary)?;
        std::fs::write(output_path, json)?;
        Ok(())
    }
}

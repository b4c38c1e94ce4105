//! Output configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving chart series and the summary report
    pub output_dir: PathBuf,

    /// Write one CSV series per chart
    pub write_charts: bool,

    /// Write the JSON summary report
    pub write_summary: bool,

    /// File name of the JSON summary inside `output_dir`
    pub summary_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            write_charts: true,
            write_summary: true,
            summary_file_name: "summary.json".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_file_name)
    }
}

//! JSON summary report writer

use crate::errors::ExportError;
use fxgap_core::AnalysisReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes the analysis report as pretty-printed JSON
#[derive(Debug, Default)]
pub struct JsonReportWriter;

impl JsonReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write<P: AsRef<Path>>(&self, report: &AnalysisReport, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path_str.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, report).map_err(|source| ExportError::Json {
            path: path_str.clone(),
            source,
        })?;
        writer.flush().map_err(|source| ExportError::Io {
            path: path_str.clone(),
            source,
        })?;

        info!(path = %path_str, "wrote summary report");
        Ok(())
    }
}

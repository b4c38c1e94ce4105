//! End-to-end run: settings → load → analyze → charts and report
//!
//! Both analyses finish before anything is written, so a failing run leaves
//! no partial output behind.

use fxgap_config::Settings;
use fxgap_core::{analyze, AnalysisError, AnalysisReport, LoadError, QuoteLoader};
use fxgap_io::{render_charts, ChartFile, CsvChartWriter, ExportError, JsonReportWriter};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Pipeline errors, each fatal to the run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No input file configured (set data.input_path or pass --input)")]
    MissingInput,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub report: AnalysisReport,
    pub chart_files: Vec<ChartFile>,
    pub summary_path: Option<PathBuf>,
}

/// Run the full pipeline described by `settings`
pub fn run(settings: &Settings) -> Result<PipelineOutcome, PipelineError> {
    let input = settings
        .data
        .input_path
        .as_ref()
        .ok_or(PipelineError::MissingInput)?;

    let loader_options = settings
        .data
        .loader_options()
        .map_err(PipelineError::InvalidConfig)?;
    let analysis_options = settings.analysis.analysis_options()?;

    let quotes = QuoteLoader::with_options(loader_options).load_path(input)?;
    let analysis = analyze(&quotes, &analysis_options)?;

    let export = &settings.export;
    let mut chart_files = Vec::new();
    if export.write_charts {
        let mut writer = CsvChartWriter::new(&export.output_dir)?;
        render_charts(&quotes, &analysis, &mut writer)?;
        chart_files = writer.written().to_vec();
    }

    let summary_path = if export.write_summary {
        let path = export.summary_path();
        JsonReportWriter::new().write(analysis.report(), &path)?;
        Some(path)
    } else {
        None
    };

    info!(
        input = %input.display(),
        quotes = quotes.len(),
        charts = chart_files.len(),
        "pipeline complete"
    );

    Ok(PipelineOutcome {
        report: analysis.report().clone(),
        chart_files,
        summary_path,
    })
}

//! Output side of the fxgap pipeline
//!
//! - `sink`: the `ChartSink` rendering contract plus CSV and in-memory sinks
//! - `charts`: the chart series produced from one analysis
//! - `report`: JSON summary writer

pub mod charts;
pub mod errors;
pub mod report;
pub mod sink;

pub use charts::render_charts;
pub use errors::ExportError;
pub use report::JsonReportWriter;
pub use sink::{ChartFile, ChartSink, CsvChartWriter, RecordedChart, RecordingSink};

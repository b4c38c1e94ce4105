//! Rendering sinks
//!
//! The analysis hands finished series to a `ChartSink`; how they are drawn is
//! up to the sink. `CsvChartWriter` leaves one `x,y` file per chart for any
//! plotting tool, `RecordingSink` keeps them in memory.

use crate::errors::ExportError;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Timestamp format used in written series
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepts finished chart series
pub trait ChartSink {
    /// Ordered (timestamp, value) series for line or scatter over time
    fn time_series(&mut self, name: &str, points: &[(NaiveDateTime, f64)])
        -> Result<(), ExportError>;

    /// Unordered (x, y) pairs
    fn scatter(&mut self, name: &str, points: &[(f64, f64)]) -> Result<(), ExportError>;

    /// Ordered (label, value) series with a categorical or numeric x-axis
    fn line(&mut self, name: &str, points: &[(String, f64)]) -> Result<(), ExportError>;
}

/// A series file written by `CsvChartWriter`
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFile {
    pub name: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// Writes each chart as `<output_dir>/<name>.csv` with an `x,y` header
#[derive(Debug)]
pub struct CsvChartWriter {
    output_dir: PathBuf,
    written: Vec<ChartFile>,
}

impl CsvChartWriter {
    /// Create writer, creating `output_dir` if needed
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, ExportError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).map_err(|source| ExportError::Io {
            path: output_dir.display().to_string(),
            source,
        })?;

        Ok(Self {
            output_dir,
            written: Vec::new(),
        })
    }

    /// Files written so far, in write order
    pub fn written(&self) -> &[ChartFile] {
        &self.written
    }

    fn write_rows<I>(&mut self, name: &str, rows: I) -> Result<(), ExportError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let path = self.output_dir.join(format!("{name}.csv"));
        let path_str = path.display().to_string();
        let csv_err = |source| ExportError::Csv {
            path: path_str.clone(),
            source,
        };

        let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;
        writer.write_record(["x", "y"]).map_err(csv_err)?;

        let mut count = 0;
        for (x, y) in rows {
            writer.write_record([x, y]).map_err(csv_err)?;
            count += 1;
        }

        writer.flush().map_err(|source| ExportError::Io {
            path: path_str.clone(),
            source,
        })?;

        debug!(chart = name, rows = count, path = %path.display(), "wrote chart series");
        self.written.push(ChartFile {
            name: name.to_string(),
            path,
            rows: count,
        });
        Ok(())
    }
}

impl ChartSink for CsvChartWriter {
    fn time_series(
        &mut self,
        name: &str,
        points: &[(NaiveDateTime, f64)],
    ) -> Result<(), ExportError> {
        self.write_rows(
            name,
            points
                .iter()
                .map(|(t, v)| (t.format(TIMESTAMP_FORMAT).to_string(), v.to_string())),
        )
    }

    fn scatter(&mut self, name: &str, points: &[(f64, f64)]) -> Result<(), ExportError> {
        self.write_rows(name, points.iter().map(|(x, y)| (x.to_string(), y.to_string())))
    }

    fn line(&mut self, name: &str, points: &[(String, f64)]) -> Result<(), ExportError> {
        self.write_rows(name, points.iter().map(|(x, y)| (x.clone(), y.to_string())))
    }
}

/// A chart captured by `RecordingSink`
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedChart {
    TimeSeries {
        name: String,
        points: Vec<(NaiveDateTime, f64)>,
    },
    Scatter {
        name: String,
        points: Vec<(f64, f64)>,
    },
    Line {
        name: String,
        points: Vec<(String, f64)>,
    },
}

impl RecordedChart {
    pub fn name(&self) -> &str {
        match self {
            RecordedChart::TimeSeries { name, .. }
            | RecordedChart::Scatter { name, .. }
            | RecordedChart::Line { name, .. } => name,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RecordedChart::TimeSeries { points, .. } => points.len(),
            RecordedChart::Scatter { points, .. } => points.len(),
            RecordedChart::Line { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory sink
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub charts: Vec<RecordedChart>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&RecordedChart> {
        self.charts.iter().find(|c| c.name() == name)
    }
}

impl ChartSink for RecordingSink {
    fn time_series(
        &mut self,
        name: &str,
        points: &[(NaiveDateTime, f64)],
    ) -> Result<(), ExportError> {
        self.charts.push(RecordedChart::TimeSeries {
            name: name.to_string(),
            points: points.to_vec(),
        });
        Ok(())
    }

    fn scatter(&mut self, name: &str, points: &[(f64, f64)]) -> Result<(), ExportError> {
        self.charts.push(RecordedChart::Scatter {
            name: name.to_string(),
            points: points.to_vec(),
        });
        Ok(())
    }

    fn line(&mut self, name: &str, points: &[(String, f64)]) -> Result<(), ExportError> {
        self.charts.push(RecordedChart::Line {
            name: name.to_string(),
            points: points.to_vec(),
        });
        Ok(())
    }
}

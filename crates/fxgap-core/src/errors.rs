//! Loading and analysis error types
//!
//! Error policy: raise and propagate immediately. A failed load or analysis
//! aborts the run; nothing is skipped and no partial results are produced.

use thiserror::Error;

/// Errors raised while reading the quote file
#[derive(Error, Debug)]
pub enum LoadError {
    /// File could not be opened or read
    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Underlying CSV reader failure (invalid UTF-8, truncated record)
    #[error("CSV error at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// Header or column count does not match the 9-column quote schema
    #[error("Format error at line {line}: {reason}")]
    Format { line: u64, reason: String },

    /// A numeric field or the date/time pair could not be parsed
    #[error("Parse error at line {line}, column '{column}': invalid value '{value}' ({reason})")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// Timestamp went backwards relative to the previous row
    #[error("Quotes not sorted at line {line}: {current} < previous {previous}")]
    OutOfOrder {
        line: u64,
        previous: String,
        current: String,
    },
}

/// Errors raised by the gap analyzer and spread aggregator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Not enough samples for the requested metric
    #[error("Insufficient data for {metric}: need at least {required} samples, got {actual}")]
    InsufficientData {
        metric: &'static str,
        required: usize,
        actual: usize,
    },

    /// Long-gap threshold must be strictly longer than the sampling period
    #[error("Invalid long-gap threshold: {minutes} minutes (must be > 1)")]
    InvalidThreshold { minutes: i64 },

    /// Percentile target outside (0, 1]
    #[error("Invalid probability target: {p} (valid range: 0 < p <= 1)")]
    InvalidProbability { p: f64 },
}

//! Output error types

use thiserror::Error;

/// Chart and report output errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error for '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV series '{path}'")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write JSON report '{path}'")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

//! Gap and spread analysis of minute-bar FX quote histories.
//!
//! Loads one tab-separated history export, separates market closures from
//! missing intraday samples, and describes the spread distribution and its
//! intraday/weekly seasonality.
//!
//! ## Meta-Crate
//!
//! Re-exports the workspace sub-crates:
//!
//! - `fxgap-core` - Quote loading, gap analyzer, spread aggregator
//! - `fxgap-config` - Layered configuration
//! - `fxgap-io` - Chart sinks and JSON report
//!
//! ## Features
//!
//! - `config` - Configuration management
//! - `io` - Chart and report output
//! - `full` - Enable all features (required for `pipeline`)
//!
//! ## Basic Usage
//!
//! ```rust
//! use fxgap::core::{analyze, AnalysisOptions, QuoteLoader};
//!
//! let export = "<DATE>\t<TIME>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<TICKVOL>\t<VOL>\t<SPREAD>\n\
//!               2023.01.02\t00:00:00\t1.0699\t1.0700\t1.0698\t1.0699\t12\t0\t13\n\
//!               2023.01.02\t00:01:00\t1.0699\t1.0701\t1.0699\t1.0700\t9\t0\t18\n\
//!               2023.01.02\t00:11:00\t1.0700\t1.0702\t1.0699\t1.0701\t15\t0\t19\n";
//!
//! let quotes = QuoteLoader::new().load_reader(export.as_bytes()).unwrap();
//! let analysis = analyze(&quotes, &AnalysisOptions::default()).unwrap();
//!
//! assert_eq!(analysis.gaps.counts().anomalous, 1);
//! assert_eq!(analysis.spread.summary.median, 18.0);
//! ```

// Re-export core (always available)
pub use fxgap_core as core;

#[cfg(feature = "config")]
pub use fxgap_config as config;

#[cfg(feature = "io")]
pub use fxgap_io as io;

#[cfg(all(feature = "config", feature = "io"))]
pub mod pipeline;

pub use fxgap_core::{
    analyze, load_quotes, Analysis, AnalysisError, AnalysisOptions, AnalysisReport, GapAnalyzer,
    GapThreshold, LoadError, Quote, QuoteLoader, SpreadAggregator,
};

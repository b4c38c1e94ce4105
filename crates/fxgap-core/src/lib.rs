//! Gap detection and spread aggregation for minute-sampled FX quotes
//!
//! Pipeline: load one tab-separated history export, measure the intervals
//! between consecutive bars, separate market closures from missing data, and
//! aggregate the spread column by value and by calendar bucket.
//!
//! ## Features
//!
//! - Fail-fast loader: schema, parse and ordering errors carry line context
//! - Configurable long-gap threshold (default 500 minutes)
//! - Exact "last value below p" spread threshold lookup
//! - Hour-of-day and hour-of-week spread seasonality

pub mod calendar;
pub mod errors;
pub mod gaps;
pub mod loader;
pub mod report;
pub mod spread;
pub mod types;

// Test utilities (only available in test builds or with test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types
pub use errors::{AnalysisError, LoadError};
pub use gaps::{
    GapAnalysis, GapAnalyzer, GapClass, GapCounts, GapRecord, GapSummary, GapThreshold,
    PriceGapPoint,
};
pub use loader::{load_quotes, LoaderOptions, QuoteLoader};
pub use report::{analyze, Analysis, AnalysisOptions, AnalysisReport};
pub use spread::{
    SpreadAggregator, SpreadAnalysis, SpreadBucketStat, SpreadCdf, SpreadSummary,
};
pub use types::Quote;

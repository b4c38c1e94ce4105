//! Combined gap and spread report
//!
//! Runs both analyses over one loaded quote sequence and bundles the
//! serializable results. Analysis order does not matter; neither analysis
//! mutates the quotes.

use crate::errors::AnalysisError;
use crate::gaps::{GapAnalysis, GapAnalyzer, GapSummary, GapThreshold};
use crate::spread::{SpreadAggregator, SpreadAnalysis, DEFAULT_PERCENTILE_TARGETS};
use crate::types::Quote;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Analysis parameters
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub threshold: GapThreshold,
    pub percentile_targets: Vec<f64>,
    pub drop_sunday: bool,
    /// Number of longest anomalous gaps listed in the summary
    pub top_gaps: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            threshold: GapThreshold::default(),
            percentile_targets: DEFAULT_PERCENTILE_TARGETS.to_vec(),
            drop_sunday: true,
            top_gaps: 10,
        }
    }
}

/// Full result of one pipeline run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub gaps: GapAnalysis,
    pub spread: SpreadAnalysis,
    report: AnalysisReport,
}

impl Analysis {
    /// Serializable report
    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }
}

/// Serializable report written alongside the charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub quote_count: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub gaps: GapSummary,
    pub spread: SpreadAnalysis,
}

/// Run the gap analyzer and spread aggregator over `quotes`
///
/// Fails with `InsufficientData` below two quotes: the anomaly rate needs at
/// least one duration, and a run without one produces no report.
pub fn analyze(quotes: &[Quote], options: &AnalysisOptions) -> Result<Analysis, AnalysisError> {
    let gaps = GapAnalyzer::new(options.threshold).analyze(quotes);
    let gap_summary = gaps.summary(options.top_gaps)?;
    let spread = SpreadAggregator::new(options.percentile_targets.clone(), options.drop_sunday)
        .analyze(quotes)?;

    let report = AnalysisReport {
        quote_count: quotes.len(),
        first_timestamp: quotes.first().map(|q| q.timestamp),
        last_timestamp: quotes.last().map(|q| q.timestamp),
        gaps: gap_summary,
        spread: spread.clone(),
    };

    Ok(Analysis {
        gaps,
        spread,
        report,
    })
}

//! Gap and spread analysis configuration

use fxgap_core::gaps::DEFAULT_LONG_GAP_MINUTES;
use fxgap_core::spread::DEFAULT_PERCENTILE_TARGETS;
use fxgap_core::{AnalysisError, AnalysisOptions, GapThreshold};
use serde::{Deserialize, Serialize};

/// Gap and spread analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Durations at or above this many minutes count as market closures.
    /// Market and calendar dependent: FX weekends run ~2880 minutes, shifted
    /// by up to an hour around daylight-saving transitions.
    pub long_gap_threshold_minutes: i64,

    /// Target probabilities for the spread threshold lookup
    pub percentile_targets: Vec<f64>,

    /// Leave Sunday out of the hour-of-week series
    pub drop_sunday: bool,

    /// Number of longest anomalous gaps listed in the report
    pub top_gaps: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            long_gap_threshold_minutes: DEFAULT_LONG_GAP_MINUTES,
            percentile_targets: DEFAULT_PERCENTILE_TARGETS.to_vec(),
            drop_sunday: true,
            top_gaps: 10,
        }
    }
}

impl AnalysisConfig {
    /// Validate and convert into core analysis options
    pub fn analysis_options(&self) -> Result<AnalysisOptions, AnalysisError> {
        let threshold = GapThreshold::from_minutes(self.long_gap_threshold_minutes)?;

        if let Some(&p) = self
            .percentile_targets
            .iter()
            .find(|&&p| !(p > 0.0 && p <= 1.0))
        {
            return Err(AnalysisError::InvalidProbability { p });
        }

        Ok(AnalysisOptions {
            threshold,
            percentile_targets: self.percentile_targets.clone(),
            drop_sunday: self.drop_sunday,
            top_gaps: self.top_gaps,
        })
    }
}

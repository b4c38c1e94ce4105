//! Gap detection over consecutive quote timestamps
//!
//! Every adjacent pair of quotes yields one `GapRecord` whose duration is the
//! difference of their timestamps. Durations are then classified against a
//! long-gap threshold:
//!
//! | Class | Rule | Meaning |
//! |-------|------|---------|
//! | `Expected` | duration >= threshold | weekend or holiday closure |
//! | `Exact` | duration <= 1 minute | regular sampling (duplicates included) |
//! | `Anomalous` | 1 minute < duration < threshold | missing intraday samples |
//!
//! The three classes partition the durations: for `n` quotes their counts
//! always sum to `n - 1`, whatever threshold is chosen.
//!
//! The default threshold (500 minutes) sits between intraday holes, which are
//! typically a few minutes long, and market closures. FX closes Friday ~22:00
//! UTC and reopens Sunday ~22:00 UTC (2880 minutes), shifted by up to an hour
//! either way around daylight-saving transitions and stretched by holidays.

use crate::calendar::whole_minutes;
use crate::errors::AnalysisError;
use crate::types::Quote;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Default long-gap threshold in minutes
pub const DEFAULT_LONG_GAP_MINUTES: i64 = 500;

/// Nominal sampling period of minute bars
pub const SAMPLING_PERIOD_MINUTES: i64 = 1;

/// Long-gap threshold separating market closures from missing data
///
/// Only constructible through `from_minutes` (or `Default`), so a threshold
/// overlapping the exact class cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapThreshold {
    minutes: i64,
}

impl GapThreshold {
    /// Create threshold; must exceed the one-minute sampling period
    pub fn from_minutes(minutes: i64) -> Result<Self, AnalysisError> {
        if minutes <= SAMPLING_PERIOD_MINUTES {
            return Err(AnalysisError::InvalidThreshold { minutes });
        }
        Ok(Self { minutes })
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn as_delta(&self) -> TimeDelta {
        TimeDelta::minutes(self.minutes)
    }
}

impl Default for GapThreshold {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_LONG_GAP_MINUTES,
        }
    }
}

/// Classification of a single duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapClass {
    /// At most one sampling period; nothing missing
    Exact,
    /// Longer than one period but shorter than the threshold
    Anomalous,
    /// At or beyond the threshold; market closed
    Expected,
}

impl GapClass {
    pub fn classify(duration: TimeDelta, threshold: GapThreshold) -> Self {
        if duration >= threshold.as_delta() {
            GapClass::Expected
        } else if duration <= TimeDelta::minutes(SAMPLING_PERIOD_MINUTES) {
            GapClass::Exact
        } else {
            GapClass::Anomalous
        }
    }
}

/// Interval between two adjacent quotes
#[derive(Debug, Clone, PartialEq)]
pub struct GapRecord {
    /// Timestamp of the later quote
    pub timestamp: NaiveDateTime,

    /// Timestamp of the earlier quote
    pub previous: NaiveDateTime,

    /// `timestamp - previous`
    pub duration: TimeDelta,

    /// Close-to-close price change across the interval
    pub close_delta: f64,

    pub class: GapClass,
}

impl GapRecord {
    pub fn minutes(&self) -> i64 {
        whole_minutes(self.duration)
    }
}

/// A closure window (expected gap) with both edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureWindow {
    /// Last quote before the closure
    pub last_quote: NaiveDateTime,
    /// First quote after the closure
    pub reopen: NaiveDateTime,
    pub minutes: i64,
}

/// Per-class counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GapCounts {
    pub total: usize,
    pub expected: usize,
    pub exact: usize,
    pub anomalous: usize,
    /// Zero-length durations (duplicate timestamps), a subset of `exact`
    pub duplicates: usize,
}

/// Gap analyzer configured with a long-gap threshold
#[derive(Debug, Clone, Copy, Default)]
pub struct GapAnalyzer {
    threshold: GapThreshold,
}

impl GapAnalyzer {
    pub fn new(threshold: GapThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> GapThreshold {
        self.threshold
    }

    /// Compute and classify all adjacent-pair durations
    pub fn analyze(&self, quotes: &[Quote]) -> GapAnalysis {
        let records: Vec<GapRecord> = quotes
            .windows(2)
            .map(|pair| {
                let duration = pair[1].timestamp - pair[0].timestamp;
                GapRecord {
                    timestamp: pair[1].timestamp,
                    previous: pair[0].timestamp,
                    duration,
                    close_delta: pair[1].close - pair[0].close,
                    class: GapClass::classify(duration, self.threshold),
                }
            })
            .collect();

        let analysis = GapAnalysis {
            threshold: self.threshold,
            quote_count: quotes.len(),
            records,
        };

        let counts = analysis.counts();
        match analysis.anomaly_rate() {
            Ok(rate) => info!(
                threshold_minutes = self.threshold.minutes(),
                durations = counts.total,
                expected = counts.expected,
                exact = counts.exact,
                anomalous = counts.anomalous,
                anomaly_rate_pct = rate,
                "gap analysis complete"
            ),
            Err(e) => warn!(quotes = quotes.len(), "anomaly rate unavailable: {e}"),
        }

        analysis
    }
}

/// Result of a gap analysis run
#[derive(Debug, Clone)]
pub struct GapAnalysis {
    threshold: GapThreshold,
    quote_count: usize,
    records: Vec<GapRecord>,
}

impl GapAnalysis {
    pub fn threshold(&self) -> GapThreshold {
        self.threshold
    }

    /// Number of quotes the analysis was computed from
    pub fn quote_count(&self) -> usize {
        self.quote_count
    }

    /// All n-1 gap records in timestamp order
    pub fn records(&self) -> &[GapRecord] {
        &self.records
    }

    /// All n-1 durations in timestamp order
    pub fn durations(&self) -> impl Iterator<Item = TimeDelta> + '_ {
        self.records.iter().map(|r| r.duration)
    }

    pub fn of_class(&self, class: GapClass) -> impl Iterator<Item = &GapRecord> + '_ {
        self.records.iter().filter(move |r| r.class == class)
    }

    pub fn expected(&self) -> impl Iterator<Item = &GapRecord> + '_ {
        self.of_class(GapClass::Expected)
    }

    pub fn exact(&self) -> impl Iterator<Item = &GapRecord> + '_ {
        self.of_class(GapClass::Exact)
    }

    pub fn anomalous(&self) -> impl Iterator<Item = &GapRecord> + '_ {
        self.of_class(GapClass::Anomalous)
    }

    pub fn counts(&self) -> GapCounts {
        let mut counts = GapCounts {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.class {
                GapClass::Expected => counts.expected += 1,
                GapClass::Exact => counts.exact += 1,
                GapClass::Anomalous => counts.anomalous += 1,
            }
            if record.duration == TimeDelta::zero() {
                counts.duplicates += 1;
            }
        }
        counts
    }

    /// Share of anomalous durations among all durations, in percent
    ///
    /// Point estimate only. Fails with `InsufficientData` below two quotes
    /// instead of producing NaN.
    pub fn anomaly_rate(&self) -> Result<f64, AnalysisError> {
        if self.records.is_empty() {
            return Err(AnalysisError::InsufficientData {
                metric: "anomaly_rate",
                required: 2,
                actual: self.quote_count,
            });
        }
        let anomalous = self.anomalous().count();
        Ok(anomalous as f64 / self.records.len() as f64 * 100.0)
    }

    /// Anomalous durations in minutes mapped to their occurrence count
    pub fn anomalous_histogram(&self) -> BTreeMap<i64, usize> {
        let mut histogram = BTreeMap::new();
        for record in self.anomalous() {
            *histogram.entry(record.minutes()).or_insert(0) += 1;
        }
        histogram
    }

    /// The `n` longest anomalous gaps, longest first (earlier first on ties)
    pub fn longest_anomalous(&self, n: usize) -> Vec<&GapRecord> {
        let mut anomalous: Vec<&GapRecord> = self.anomalous().collect();
        anomalous.sort_by(|a, b| {
            b.duration
                .cmp(&a.duration)
                .then_with(|| a.timestamp.cmp(&b.timestamp))
        });
        anomalous.truncate(n);
        anomalous
    }

    /// Market closures (expected gaps) in timestamp order
    pub fn closures(&self) -> Vec<ClosureWindow> {
        self.expected()
            .map(|r| ClosureWindow {
                last_quote: r.previous,
                reopen: r.timestamp,
                minutes: r.minutes(),
            })
            .collect()
    }

    /// Longest duration of any class
    pub fn max_duration(&self) -> Option<TimeDelta> {
        self.durations().max()
    }

    /// Duration against close-to-close change, one point per gap record
    pub fn price_change_per_gap(&self) -> Vec<PriceGapPoint> {
        self.records
            .iter()
            .map(|r| PriceGapPoint {
                timestamp: r.timestamp,
                minutes: r.minutes(),
                close_delta: r.close_delta,
            })
            .collect()
    }

    /// Serializable summary of the analysis
    ///
    /// Fails with `InsufficientData` below two quotes, since the anomaly rate
    /// is undefined there.
    pub fn summary(&self, top_n: usize) -> Result<GapSummary, AnalysisError> {
        Ok(GapSummary {
            threshold_minutes: self.threshold.minutes(),
            counts: self.counts(),
            anomaly_rate_pct: self.anomaly_rate()?,
            max_duration_minutes: self.max_duration().map(whole_minutes),
            anomalous_histogram: self.anomalous_histogram(),
            longest_anomalous: self
                .longest_anomalous(top_n)
                .into_iter()
                .map(|r| AnomalousGap {
                    timestamp: r.timestamp,
                    minutes: r.minutes(),
                    close_delta: r.close_delta,
                })
                .collect(),
            closures: self.closures(),
        })
    }
}

/// One gap as a (duration, price change) observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceGapPoint {
    /// Timestamp of the quote closing the gap
    pub timestamp: NaiveDateTime,
    pub minutes: i64,
    pub close_delta: f64,
}

/// Anomalous gap entry of the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalousGap {
    pub timestamp: NaiveDateTime,
    pub minutes: i64,
    pub close_delta: f64,
}

/// Serializable gap report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapSummary {
    pub threshold_minutes: i64,
    pub counts: GapCounts,
    pub anomaly_rate_pct: f64,
    pub max_duration_minutes: Option<i64>,
    pub anomalous_histogram: BTreeMap<i64, usize>,
    pub longest_anomalous: Vec<AnomalousGap>,
    pub closures: Vec<ClosureWindow>,
}

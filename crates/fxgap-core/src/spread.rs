//! Spread distribution and seasonality
//!
//! Stateless aggregations over the spread column:
//! - summary statistics (min, max, mean, median)
//! - empirical CDF over distinct spread values with a threshold lookup
//! - mean spread per hour of day and per (day of week, hour of day),
//!   flattened into an hour-of-week series for plotting
//!
//! Every aggregation is recomputed from the full in-memory sequence.

use crate::calendar::{day_of_week, hour_of_day, hour_of_week_index, SUNDAY};
use crate::errors::AnalysisError;
use crate::types::Quote;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Percentile targets reported when none are configured
pub const DEFAULT_PERCENTILE_TARGETS: [f64; 4] = [0.5, 0.9, 0.95, 0.99];

/// Spread summary statistics (pipettes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadSummary {
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub median: f64,
}

impl SpreadSummary {
    /// Summarize a non-empty set of spread values
    pub fn from_values(spreads: &[u32]) -> Result<Self, AnalysisError> {
        if spreads.is_empty() {
            return Err(AnalysisError::InsufficientData {
                metric: "spread_summary",
                required: 1,
                actual: 0,
            });
        }

        let mut sorted = spreads.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let sum: u64 = sorted.iter().map(|&s| s as u64).sum();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        } else {
            sorted[mid] as f64
        };

        Ok(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum as f64 / count as f64,
            median,
        })
    }
}

/// One distinct spread value of the empirical CDF
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdfPoint {
    pub spread: u32,
    /// Relative frequency of this value
    pub frequency: f64,
    /// Share of samples with spread <= this value
    pub cumulative: f64,
}

/// Empirical cumulative distribution over distinct spread values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadCdf {
    points: Vec<CdfPoint>,
}

impl SpreadCdf {
    /// Build the CDF; cumulative shares come from integer running counts so
    /// the last point is exactly 1.0
    pub fn from_values(spreads: &[u32]) -> Result<Self, AnalysisError> {
        if spreads.is_empty() {
            return Err(AnalysisError::InsufficientData {
                metric: "spread_cdf",
                required: 1,
                actual: 0,
            });
        }

        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for &spread in spreads {
            *counts.entry(spread).or_insert(0) += 1;
        }

        let total = spreads.len() as f64;
        let mut running = 0usize;
        let points = counts
            .into_iter()
            .map(|(spread, count)| {
                running += count;
                CdfPoint {
                    spread,
                    frequency: count as f64 / total,
                    cumulative: running as f64 / total,
                }
            })
            .collect();

        Ok(Self { points })
    }

    /// Points in ascending spread order
    pub fn points(&self) -> &[CdfPoint] {
        &self.points
    }

    /// Last spread value whose cumulative share is strictly below `p`
    ///
    /// Roughly `1 - p` of the samples exceed the returned value. This is the
    /// plain "last value below p" rule without interpolation, so duplicates
    /// move the answer in steps. `None` when even the smallest spread already
    /// reaches `p`.
    ///
    /// ```rust
    /// use fxgap_core::spread::SpreadCdf;
    ///
    /// let cdf = SpreadCdf::from_values(&[13, 13, 18, 18, 19, 19, 19, 140]).unwrap();
    /// // cumulative: 13 -> 0.25, 18 -> 0.5, 19 -> 0.875, 140 -> 1.0
    /// assert_eq!(cdf.threshold_below(0.9).unwrap(), Some(19));
    /// assert_eq!(cdf.threshold_below(0.5).unwrap(), Some(13));
    /// assert_eq!(cdf.threshold_below(0.25).unwrap(), None);
    /// ```
    pub fn threshold_below(&self, p: f64) -> Result<Option<u32>, AnalysisError> {
        if !(p > 0.0 && p <= 1.0) {
            return Err(AnalysisError::InvalidProbability { p });
        }
        Ok(self
            .points
            .iter()
            .take_while(|point| point.cumulative < p)
            .last()
            .map(|point| point.spread))
    }
}

/// Mean spread of one calendar bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadBucketStat<K> {
    pub key: K,
    pub mean: f64,
    pub count: usize,
}

/// Mean spread grouped by an ordered key, in ascending key order
pub fn mean_spread_by<K, F>(quotes: &[Quote], key_fn: F) -> Vec<SpreadBucketStat<K>>
where
    K: Ord,
    F: Fn(&Quote) -> K,
{
    let mut buckets: BTreeMap<K, (u64, usize)> = BTreeMap::new();
    for quote in quotes {
        let entry = buckets.entry(key_fn(quote)).or_insert((0, 0));
        entry.0 += quote.spread as u64;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(key, (sum, count))| SpreadBucketStat {
            key,
            mean: sum as f64 / count as f64,
            count,
        })
        .collect()
}

/// Mean spread per hour of day (0-23)
pub fn mean_spread_by_hour(quotes: &[Quote]) -> Vec<SpreadBucketStat<u32>> {
    mean_spread_by(quotes, |q| hour_of_day(&q.timestamp))
}

/// Mean spread per (day of week, hour of day), Monday = 0
pub fn mean_spread_by_day_hour(quotes: &[Quote]) -> Vec<SpreadBucketStat<(u32, u32)>> {
    mean_spread_by(quotes, |q| (day_of_week(&q.timestamp), hour_of_day(&q.timestamp)))
}

/// Flatten (day, hour) buckets into hour-of-week indices (0-167)
///
/// With `drop_sunday` the Sunday buckets are left out; the market is shut for
/// nearly all of Sunday and its few reopening minutes carry outsized spreads.
pub fn hour_of_week_series(
    day_hour: &[SpreadBucketStat<(u32, u32)>],
    drop_sunday: bool,
) -> Vec<SpreadBucketStat<u32>> {
    day_hour
        .iter()
        .filter(|b| !(drop_sunday && b.key.0 == SUNDAY))
        .map(|b| SpreadBucketStat {
            key: hour_of_week_index(b.key.0, b.key.1),
            mean: b.mean,
            count: b.count,
        })
        .collect()
}

/// Overall mean reconstructed from bucket means weighted by bucket counts
pub fn recombined_mean<K>(buckets: &[SpreadBucketStat<K>]) -> Option<f64> {
    let total: usize = buckets.iter().map(|b| b.count).sum();
    if total == 0 {
        return None;
    }
    let weighted: f64 = buckets.iter().map(|b| b.mean * b.count as f64).sum();
    Some(weighted / total as f64)
}

/// Threshold lookup result for one target probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileThreshold {
    pub p: f64,
    pub spread: Option<u32>,
}

/// Spread aggregator configuration
#[derive(Debug, Clone)]
pub struct SpreadAggregator {
    percentile_targets: Vec<f64>,
    drop_sunday: bool,
}

impl Default for SpreadAggregator {
    fn default() -> Self {
        Self {
            percentile_targets: DEFAULT_PERCENTILE_TARGETS.to_vec(),
            drop_sunday: true,
        }
    }
}

impl SpreadAggregator {
    pub fn new(percentile_targets: Vec<f64>, drop_sunday: bool) -> Self {
        Self {
            percentile_targets,
            drop_sunday,
        }
    }

    /// Run every spread aggregation over the quote sequence
    pub fn analyze(&self, quotes: &[Quote]) -> Result<SpreadAnalysis, AnalysisError> {
        let spreads: Vec<u32> = quotes.iter().map(|q| q.spread).collect();

        let summary = SpreadSummary::from_values(&spreads)?;
        let cdf = SpreadCdf::from_values(&spreads)?;

        let percentiles = self
            .percentile_targets
            .iter()
            .map(|&p| {
                cdf.threshold_below(p)
                    .map(|spread| PercentileThreshold { p, spread })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let by_hour = mean_spread_by_hour(quotes);
        let by_day_hour = mean_spread_by_day_hour(quotes);
        let hour_of_week = hour_of_week_series(&by_day_hour, self.drop_sunday);

        info!(
            samples = summary.count,
            min = summary.min,
            max = summary.max,
            mean = summary.mean,
            median = summary.median,
            distinct_values = cdf.points().len(),
            "spread aggregation complete"
        );

        Ok(SpreadAnalysis {
            summary,
            cdf,
            percentiles,
            by_hour,
            by_day_hour,
            hour_of_week,
        })
    }
}

/// Result of a spread aggregation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadAnalysis {
    pub summary: SpreadSummary,
    pub cdf: SpreadCdf,
    pub percentiles: Vec<PercentileThreshold>,
    pub by_hour: Vec<SpreadBucketStat<u32>>,
    pub by_day_hour: Vec<SpreadBucketStat<(u32, u32)>>,
    /// Plotting series; Sunday removed when configured
    pub hour_of_week: Vec<SpreadBucketStat<u32>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{quote_at, ts};

    const SAMPLE: [u32; 8] = [13, 13, 18, 18, 19, 19, 19, 140];

    #[test]
    fn test_summary_even_count() {
        let summary = SpreadSummary::from_values(&SAMPLE).unwrap();
        assert_eq!(summary.count, 8);
        assert_eq!(summary.min, 13);
        assert_eq!(summary.max, 140);
        assert_eq!(summary.median, 18.5);
        // 259 / 8
        assert_eq!(summary.mean, 32.375);
    }

    #[test]
    fn test_summary_odd_count_and_unsorted_input() {
        let summary = SpreadSummary::from_values(&[40, 10, 20]).unwrap();
        assert_eq!(summary.median, 20.0);
        assert_eq!(summary.min, 10);
        assert_eq!(summary.max, 40);
        assert!((summary.mean - 70.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_empty() {
        assert!(matches!(
            SpreadSummary::from_values(&[]),
            Err(AnalysisError::InsufficientData { required: 1, .. })
        ));
    }

    #[test]
    fn test_cdf_points() {
        let cdf = SpreadCdf::from_values(&SAMPLE).unwrap();
        let points = cdf.points();

        let spreads: Vec<u32> = points.iter().map(|p| p.spread).collect();
        assert_eq!(spreads, vec![13, 18, 19, 140]);
        assert_eq!(points[0].frequency, 0.25);
        assert_eq!(points[2].frequency, 0.375);
        assert_eq!(points[1].cumulative, 0.5);
        assert_eq!(points[2].cumulative, 0.875);
        assert_eq!(points[3].cumulative, 1.0);
    }

    #[test]
    fn test_threshold_below_is_strict() {
        let cdf = SpreadCdf::from_values(&SAMPLE).unwrap();
        // 18 sits exactly at 0.5, so it is excluded for p = 0.5
        assert_eq!(cdf.threshold_below(0.5).unwrap(), Some(13));
        assert_eq!(cdf.threshold_below(0.51).unwrap(), Some(18));
        assert_eq!(cdf.threshold_below(0.875).unwrap(), Some(18));
        assert_eq!(cdf.threshold_below(0.99).unwrap(), Some(19));
        assert_eq!(cdf.threshold_below(1.0).unwrap(), Some(19));
        assert_eq!(cdf.threshold_below(0.1).unwrap(), None);
    }

    #[test]
    fn test_threshold_below_rejects_bad_probability() {
        let cdf = SpreadCdf::from_values(&SAMPLE).unwrap();
        assert!(matches!(
            cdf.threshold_below(0.0),
            Err(AnalysisError::InvalidProbability { .. })
        ));
        assert!(cdf.threshold_below(1.5).is_err());
        assert!(cdf.threshold_below(f64::NAN).is_err());
    }

    #[test]
    fn test_single_value_cdf() {
        let cdf = SpreadCdf::from_values(&[7, 7, 7]).unwrap();
        assert_eq!(cdf.points().len(), 1);
        assert_eq!(cdf.points()[0].cumulative, 1.0);
        assert_eq!(cdf.threshold_below(0.99).unwrap(), None);
    }

    #[test]
    fn test_mean_by_hour_and_recombination() {
        let quotes = vec![
            quote_at(ts(2023, 1, 2, 0, 0), 1.0, 40),
            quote_at(ts(2023, 1, 2, 0, 1), 1.0, 20),
            quote_at(ts(2023, 1, 2, 9, 0), 1.0, 5),
            quote_at(ts(2023, 1, 3, 9, 30), 1.0, 7),
            quote_at(ts(2023, 1, 3, 9, 31), 1.0, 6),
        ];

        let by_hour = mean_spread_by_hour(&quotes);
        assert_eq!(by_hour.len(), 2);
        assert_eq!(by_hour[0].key, 0);
        assert_eq!(by_hour[0].mean, 30.0);
        assert_eq!(by_hour[0].count, 2);
        assert_eq!(by_hour[1].key, 9);
        assert_eq!(by_hour[1].mean, 6.0);
        assert_eq!(by_hour[1].count, 3);

        let overall = 78.0 / 5.0;
        assert!((recombined_mean(&by_hour).unwrap() - overall).abs() < 1e-12);
    }

    #[test]
    fn test_day_hour_flattening_drops_sunday() {
        let quotes = vec![
            // Monday 01:00
            quote_at(ts(2023, 1, 2, 1, 0), 1.0, 10),
            // Friday 21:00
            quote_at(ts(2023, 1, 6, 21, 0), 1.0, 30),
            // Sunday 22:00 reopen
            quote_at(ts(2023, 1, 8, 22, 0), 1.0, 300),
        ];

        let by_day_hour = mean_spread_by_day_hour(&quotes);
        let keys: Vec<(u32, u32)> = by_day_hour.iter().map(|b| b.key).collect();
        assert_eq!(keys, vec![(0, 1), (4, 21), (6, 22)]);

        let with_sunday = hour_of_week_series(&by_day_hour, false);
        let keys: Vec<u32> = with_sunday.iter().map(|b| b.key).collect();
        assert_eq!(keys, vec![1, 117, 166]);

        let without_sunday = hour_of_week_series(&by_day_hour, true);
        let keys: Vec<u32> = without_sunday.iter().map(|b| b.key).collect();
        assert_eq!(keys, vec![1, 117]);
    }

    #[test]
    fn test_recombined_mean_empty() {
        let empty: Vec<SpreadBucketStat<u32>> = Vec::new();
        assert_eq!(recombined_mean(&empty), None);
    }

    #[test]
    fn test_aggregator_end_to_end() {
        let quotes: Vec<Quote> = SAMPLE
            .iter()
            .enumerate()
            .map(|(i, &s)| quote_at(ts(2023, 1, 4, 12, i as u32), 1.0, s))
            .collect();

        let analysis = SpreadAggregator::default().analyze(&quotes).unwrap();
        assert_eq!(analysis.summary.median, 18.5);
        assert_eq!(analysis.percentiles.len(), 4);
        assert_eq!(analysis.percentiles[0], PercentileThreshold { p: 0.5, spread: Some(13) });
        assert_eq!(analysis.percentiles[1].spread, Some(19));
        assert_eq!(analysis.by_hour.len(), 1);
        assert_eq!(analysis.hour_of_week[0].key, 2 * 24 + 12);
    }

    #[test]
    fn test_aggregator_rejects_empty_and_bad_targets() {
        assert!(SpreadAggregator::default().analyze(&[]).is_err());

        let quotes = vec![quote_at(ts(2023, 1, 4, 12, 0), 1.0, 5)];
        let aggregator = SpreadAggregator::new(vec![0.5, 2.0], true);
        assert!(matches!(
            aggregator.analyze(&quotes),
            Err(AnalysisError::InvalidProbability { .. })
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The answer is the largest value strictly below `p`, and the
            /// next value (if any) already reaches `p`
            #[test]
            fn threshold_is_last_point_below_p(
                spreads in prop::collection::vec(0u32..300, 1..400),
                p in 0.001f64..=1.0,
            ) {
                let cdf = SpreadCdf::from_values(&spreads).unwrap();
                let points = cdf.points();

                match cdf.threshold_below(p).unwrap() {
                    Some(value) => {
                        let idx = points.iter().position(|pt| pt.spread == value).unwrap();
                        prop_assert!(points[idx].cumulative < p);
                        if let Some(next) = points.get(idx + 1) {
                            prop_assert!(next.cumulative >= p);
                        }
                    }
                    None => prop_assert!(points[0].cumulative >= p),
                }
            }

            #[test]
            fn summary_bounds_hold(spreads in prop::collection::vec(0u32..1000, 1..400)) {
                let summary = SpreadSummary::from_values(&spreads).unwrap();
                let (min, max) = (summary.min as f64, summary.max as f64);

                prop_assert_eq!(summary.count, spreads.len());
                prop_assert!(min <= summary.median && summary.median <= max);
                prop_assert!(min <= summary.mean && summary.mean <= max);
            }
        }
    }
}

//! Chart series derived from a finished analysis

use crate::errors::ExportError;
use crate::sink::ChartSink;
use fxgap_core::calendar::day_label;
use fxgap_core::{Analysis, Quote};
use tracing::info;

pub const CLOSE_PRICE: &str = "close_price";
pub const SPREAD_OVER_TIME: &str = "spread_over_time";
pub const GAP_DURATIONS: &str = "gap_durations";
pub const GAP_VS_PRICE_CHANGE: &str = "gap_vs_price_change";
pub const SPREAD_CDF: &str = "spread_cdf";
pub const SPREAD_BY_HOUR: &str = "spread_by_hour";
pub const SPREAD_BY_HOUR_OF_WEEK: &str = "spread_by_hour_of_week";
pub const SPREAD_BY_DAY_HOUR: &str = "spread_by_day_hour";

/// Send every chart of the notebook to `sink`; returns the number of charts
pub fn render_charts<S: ChartSink + ?Sized>(
    quotes: &[Quote],
    analysis: &Analysis,
    sink: &mut S,
) -> Result<usize, ExportError> {
    let close: Vec<_> = quotes.iter().map(|q| (q.timestamp, q.close)).collect();
    sink.time_series(CLOSE_PRICE, &close)?;

    let spread: Vec<_> = quotes
        .iter()
        .map(|q| (q.timestamp, q.spread as f64))
        .collect();
    sink.time_series(SPREAD_OVER_TIME, &spread)?;

    let durations: Vec<_> = analysis
        .gaps
        .records()
        .iter()
        .map(|r| (r.timestamp, r.minutes() as f64))
        .collect();
    sink.time_series(GAP_DURATIONS, &durations)?;

    let price_change: Vec<_> = analysis
        .gaps
        .price_change_per_gap()
        .iter()
        .map(|p| (p.minutes as f64, p.close_delta))
        .collect();
    sink.scatter(GAP_VS_PRICE_CHANGE, &price_change)?;

    let cdf: Vec<_> = analysis
        .spread
        .cdf
        .points()
        .iter()
        .map(|p| (p.spread.to_string(), p.cumulative))
        .collect();
    sink.line(SPREAD_CDF, &cdf)?;

    let by_hour: Vec<_> = analysis
        .spread
        .by_hour
        .iter()
        .map(|b| (b.key.to_string(), b.mean))
        .collect();
    sink.line(SPREAD_BY_HOUR, &by_hour)?;

    let by_hour_of_week: Vec<_> = analysis
        .spread
        .hour_of_week
        .iter()
        .map(|b| (b.key.to_string(), b.mean))
        .collect();
    sink.line(SPREAD_BY_HOUR_OF_WEEK, &by_hour_of_week)?;

    let by_day_hour: Vec<_> = analysis
        .spread
        .by_day_hour
        .iter()
        .map(|b| (format!("{} {:02}h", day_label(b.key.0), b.key.1), b.mean))
        .collect();
    sink.line(SPREAD_BY_DAY_HOUR, &by_day_hour)?;

    let charts = 8;
    info!(charts, "rendered charts");
    Ok(charts)
}

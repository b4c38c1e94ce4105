//! Test utilities for consistent quote construction across the workspace
//!
//! - `mod.rs`: small builders for unit tests
//! - `generators.rs`: deterministic multi-day series for integration tests

pub mod generators;

use crate::types::Quote;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Build a timestamp, panicking on invalid calendar values
pub fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Creates a flat bar (open = high = low = close) at `timestamp`
pub fn quote_at(timestamp: NaiveDateTime, close: f64, spread: u32) -> Quote {
    Quote {
        timestamp,
        open: close,
        high: close,
        low: close,
        close,
        tickvol: 10,
        volume: 0,
        spread,
    }
}

/// `count` quotes spaced exactly one minute apart starting at `start`
pub fn minute_series(start: NaiveDateTime, count: usize, close: f64, spread: u32) -> Vec<Quote> {
    (0..count)
        .map(|i| quote_at(start + TimeDelta::minutes(i as i64), close, spread))
        .collect()
}

/// Render quotes in the terminal's tab-separated export format
pub fn to_export_text(quotes: &[Quote]) -> String {
    let mut out =
        String::from("<DATE>\t<TIME>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<TICKVOL>\t<VOL>\t<SPREAD>\n");
    for q in quotes {
        out.push_str(&format!(
            "{}\t{}\t{:.5}\t{:.5}\t{:.5}\t{:.5}\t{}\t{}\t{}\n",
            q.timestamp.format("%Y.%m.%d"),
            q.timestamp.format("%H:%M:%S"),
            q.open,
            q.high,
            q.low,
            q.close,
            q.tickvol,
            q.volume,
            q.spread
        ));
    }
    out
}

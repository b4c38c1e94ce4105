//! Deterministic multi-day quote generators
//!
//! All generators are pure functions of their arguments (no randomness), so
//! integration tests can assert exact counts.

use super::{quote_at, ts};
use crate::calendar::hour_of_day;
use crate::types::Quote;
use chrono::{NaiveDateTime, TimeDelta};

/// Spread pattern with a rollover spike around 22:00-23:00 and tight London/NY
pub fn session_spread(timestamp: &NaiveDateTime) -> u32 {
    match hour_of_day(timestamp) {
        22 => 45,
        23 => 25,
        0..=6 => 12,
        _ => 3,
    }
}

/// Close price oscillating around 1.07 with a period of one hour
pub fn oscillating_close(index: usize) -> f64 {
    let phase = (index % 60) as f64 / 60.0 * std::f64::consts::TAU;
    1.07 + 0.0005 * phase.sin()
}

/// Continuous minute bars over `[start, end)` with session spreads
pub fn trading_session(start: NaiveDateTime, end: NaiveDateTime) -> Vec<Quote> {
    let mut quotes = Vec::new();
    let mut t = start;
    let mut i = 0usize;
    while t < end {
        quotes.push(quote_at(t, oscillating_close(i), session_spread(&t)));
        t += TimeDelta::minutes(1);
        i += 1;
    }
    quotes
}

/// One FX trading week: Sunday 2023-01-08 22:00 through Friday 2023-01-13
/// 21:59, then reopening Sunday 2023-01-15 22:00 for `reopen_minutes` bars.
///
/// Produces exactly one weekend closure (2881 minutes, from the last Friday
/// bar at 21:59 to the Sunday reopen).
pub fn trading_week_with_reopen(reopen_minutes: usize) -> Vec<Quote> {
    let mut quotes = trading_session(ts(2023, 1, 8, 22, 0), ts(2023, 1, 13, 22, 0));
    let reopen = ts(2023, 1, 15, 22, 0);
    let offset = quotes.len();
    for i in 0..reopen_minutes {
        let t = reopen + TimeDelta::minutes(i as i64);
        quotes.push(quote_at(t, oscillating_close(offset + i), session_spread(&t)));
    }
    quotes
}

/// Remove the bars at the given indices (sorted ascending), creating holes
pub fn punch_holes(quotes: &[Quote], indices: &[usize]) -> Vec<Quote> {
    quotes
        .iter()
        .enumerate()
        .filter(|(i, _)| indices.binary_search(i).is_err())
        .map(|(_, q)| q.clone())
        .collect()
}

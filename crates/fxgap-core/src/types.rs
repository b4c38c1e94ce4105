//! Type definitions for minute-bar quote analysis

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Number of pipettes in one pip (spread is quoted in pipettes)
pub const PIPETTES_PER_PIP: u32 = 10;

/// One minute OHLC bar as exported by the broker terminal
///
/// Sequences of quotes are ordered by `timestamp` (non-decreasing; duplicate
/// timestamps are allowed and left in place).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Bar open time (date + time columns combined), minute granularity
    pub timestamp: NaiveDateTime,

    /// Opening price
    pub open: f64,

    /// Highest price within the minute
    pub high: f64,

    /// Lowest price within the minute
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Number of ticks received during the minute
    pub tickvol: u64,

    /// Real traded volume (zero for most FX feeds)
    pub volume: u64,

    /// Spread in pipettes (1/10 pip)
    pub spread: u32,
}

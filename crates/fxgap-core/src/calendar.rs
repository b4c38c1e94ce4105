//! Calendar bucketing helpers
//!
//! Maps quote timestamps onto the buckets used for spread seasonality:
//! hour of day, day of week (Monday = 0) and the flattened hour of week.

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};

/// Hours in a day
pub const HOURS_PER_DAY: u32 = 24;

/// Days in a week
pub const DAYS_PER_WEEK: u32 = 7;

/// Hours in a week (size of the hour-of-week index space)
pub const HOURS_PER_WEEK: u32 = HOURS_PER_DAY * DAYS_PER_WEEK;

/// Day-of-week index for Sunday with Monday = 0
pub const SUNDAY: u32 = 6;

/// Hour of day, 0-23
pub fn hour_of_day(ts: &NaiveDateTime) -> u32 {
    ts.hour()
}

/// Day of week, Monday = 0 through Sunday = 6
pub fn day_of_week(ts: &NaiveDateTime) -> u32 {
    ts.weekday().num_days_from_monday()
}

/// Flattened (day, hour) index in lexicographic order, 0-167
///
/// ```rust
/// use fxgap_core::calendar::hour_of_week_index;
///
/// assert_eq!(hour_of_week_index(0, 0), 0);   // Monday 00:00
/// assert_eq!(hour_of_week_index(4, 21), 117); // Friday 21:00
/// assert_eq!(hour_of_week_index(6, 23), 167); // Sunday 23:00
/// ```
pub fn hour_of_week_index(day: u32, hour: u32) -> u32 {
    day * HOURS_PER_DAY + hour
}

/// Short weekday label for a Monday-based index
pub fn day_label(day: u32) -> &'static str {
    match day {
        0 => "Mon",
        1 => "Tue",
        2 => "Wed",
        3 => "Thu",
        4 => "Fri",
        5 => "Sat",
        _ => "Sun",
    }
}

/// Duration expressed in whole minutes
///
/// Exact for loaded quotes, whose timestamps all fall on whole minutes.
pub fn whole_minutes(delta: TimeDelta) -> i64 {
    delta.num_minutes()
}

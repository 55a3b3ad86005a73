// src/utils/time.rs

//! Resolve calendar arguments (date, HH:MM) into a UTC time window.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::{AppError, Result};
use crate::models::TimeWindow;

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::invalid_input("date", value, format!("{e}. Use YYYY-MM-DD")))
}

/// Parse an `HH:MM` wall-clock time.
pub fn parse_clock(field: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| AppError::invalid_input(field, value, format!("{e}. Use HH:MM")))
}

/// Interpret a local date-time in `tz`, taking the earlier instant on DST overlaps.
fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, field: &str) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            AppError::invalid_input(field, naive.to_string(), "does not exist in local time")
        })
}

/// Build the window for `date` between `start` and `end` in `tz`.
///
/// Without `end`, the window runs until `now` when `date` is today, and until
/// the following midnight for any other day.
pub fn resolve_window<Tz: TimeZone>(
    tz: &Tz,
    now: &DateTime<Tz>,
    date: NaiveDate,
    start: &str,
    end: Option<&str>,
) -> Result<TimeWindow> {
    let start_time = parse_clock("start time", start)?;
    let start_utc = localize(tz, date.and_time(start_time), "start time")?;

    let end_utc = match end {
        Some(value) => {
            let end_time = parse_clock("end time", value)?;
            localize(tz, date.and_time(end_time), "end time")?
        }
        None if now.date_naive() == date => now.with_timezone(&Utc),
        None => {
            let next_day = date
                .succ_opt()
                .ok_or_else(|| AppError::invalid_input("date", date.to_string(), "out of range"))?;
            localize(tz, next_day.and_time(NaiveTime::MIN), "end time")?
        }
    };

    TimeWindow::new(start_utc, end_utc)
}

// src/models/window.rs

//! Half-open time window used for every containment check.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};

/// An immutable `[start, end)` interval of UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AppError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// `start <= instant < end`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    #[test]
    fn test_rejects_start_after_end() {
        let err = TimeWindow::new(at(11, 0), at(10, 0)).unwrap_err();
        assert!(matches!(err, AppError::InvalidWindow { .. }));
    }

    #[test]
    fn test_half_open_boundaries() {
        let window = TimeWindow::new(at(10, 0), at(11, 0)).unwrap();
        assert!(window.contains(at(10, 0)));
        assert!(window.contains(at(10, 59)));
        assert!(!window.contains(at(11, 0)));
        assert!(!window.contains(at(9, 59)));
    }

    #[test]
    fn test_empty_window_contains_nothing() {
        let window = TimeWindow::new(at(10, 0), at(10, 0)).unwrap();
        assert!(!window.contains(at(10, 0)));
    }
}

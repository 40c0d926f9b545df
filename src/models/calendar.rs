//! Absolute time windows.
//!
//! Episodes may be restricted to one or more absolute intervals on the
//! trip calendar (e.g. "between 09:00 and 18:00 on 2022-03-16").
//!
//! # Time Model
//! Instants are naive local date-times. The trip is assumed to happen in a
//! single time zone, so no offset is carried.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// An absolute time interval [start, end].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start.
    pub start: NaiveDateTime,
    /// Interval end.
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Length of this window.
    #[inline]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_time_window() {
        let w = TimeWindow::new(at(16, 9), at(16, 18));
        assert_eq!(w.duration(), TimeDelta::hours(9));
        assert_eq!(TimeWindow::new(at(16, 9), at(16, 9)).duration(), TimeDelta::zero());
    }

    #[test]
    fn test_time_window_serde() {
        let w = TimeWindow::new(at(16, 9), at(16, 18));
        let json = serde_json::to_value(w).unwrap();
        assert_eq!(json["start"], "2022-03-16T09:00:00");
        assert_eq!(json["end"], "2022-03-16T18:00:00");
    }
}

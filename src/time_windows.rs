//! Time-of-day windows and their absolute counterparts.
//!
//! Activity and meal hours are configured as offsets in seconds past
//! midnight ([`DayWindow`]). These functions anchor them to concrete trip
//! dates, producing absolute [`TimeWindow`]s for the encoder, and map a
//! solved start time back to its meal for the decoder. Both directions go
//! through the same [`MealWindows`] so they cannot disagree.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, Result};
use crate::models::TimeWindow;

/// Seconds in one calendar day.
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A window within a day, as seconds past midnight: [start, end).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayWindow {
    /// Offset of the window start (seconds past midnight).
    pub start_secs: i64,
    /// Offset of the window end (seconds past midnight).
    pub end_secs: i64,
}

impl DayWindow {
    /// Creates a window from second offsets.
    pub const fn new(start_secs: i64, end_secs: i64) -> Self {
        Self {
            start_secs,
            end_secs,
        }
    }

    /// Creates a window from whole hours.
    pub const fn hours(start_hour: i64, end_hour: i64) -> Self {
        Self::new(start_hour * 3600, end_hour * 3600)
    }

    /// Whether a time of day (seconds past midnight) falls in [start, end).
    #[inline]
    pub fn contains_secs(&self, secs: f64) -> bool {
        secs >= self.start_secs as f64 && secs < self.end_secs as f64
    }

    /// Whether start precedes end.
    pub fn is_well_formed(&self) -> bool {
        self.start_secs < self.end_secs
    }
}

/// Meal categories, in the order they occur during a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    /// All meals in daily order.
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical meal hours.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealWindows {
    pub breakfast: DayWindow,
    pub lunch: DayWindow,
    pub dinner: DayWindow,
}

impl MealWindows {
    /// Window of one meal.
    pub fn get(&self, meal: Meal) -> DayWindow {
        match meal {
            Meal::Breakfast => self.breakfast,
            Meal::Lunch => self.lunch,
            Meal::Dinner => self.dinner,
        }
    }
}

impl Default for MealWindows {
    fn default() -> Self {
        Self {
            breakfast: DayWindow::hours(8, 10),
            lunch: DayWindow::hours(12, 14),
            dinner: DayWindow::hours(18, 20),
        }
    }
}

/// Anchors a day window to a date.
///
/// Returns `None` if either bound falls outside the representable
/// calendar.
pub fn day_window_on(date: NaiveDate, window: DayWindow) -> Option<TimeWindow> {
    let midnight = date.and_time(NaiveTime::MIN);
    let offset = |secs| TimeDelta::try_seconds(secs).and_then(|d| midnight.checked_add_signed(d));
    Some(TimeWindow::new(offset(window.start_secs)?, offset(window.end_secs)?))
}

/// One activity window per trip date.
///
/// # Errors
/// `DateOutOfRange` for the first date whose window cannot be represented.
pub fn activity_windows(dates: &[NaiveDate], window: DayWindow) -> Result<Vec<TimeWindow>> {
    dates
        .iter()
        .map(|&date| day_window_on(date, window).ok_or(ItineraryError::DateOutOfRange { date }))
        .collect()
}

/// The single window of a meal on a date.
pub fn meal_window(meal: Meal, date: NaiveDate, meals: &MealWindows) -> Result<TimeWindow> {
    day_window_on(date, meals.get(meal)).ok_or(ItineraryError::DateOutOfRange { date })
}

/// Meal whose window contains a solved start time.
///
/// The time is reduced to time of day first, so absolute seconds counted
/// from the first trip midnight classify the same as per-day offsets.
/// Returns `None` outside every meal window.
pub fn meal_for_time_of_day(secs: f64, meals: &MealWindows) -> Option<Meal> {
    let time_of_day = secs.rem_euclid(SECONDS_PER_DAY as f64);
    Meal::ALL
        .into_iter()
        .find(|meal| meals.get(*meal).contains_secs(time_of_day))
}

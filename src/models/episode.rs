//! Episode (duration-bounded arc) model.
//!
//! An episode links two events and bounds the time between them. Episodes
//! double as activities: a named episode with a location and time windows
//! is a concrete visit (an attraction, a meal) that the planner may place.
//!
//! # Duration Model
//! Durations are whole seconds. Either bound may be `None` (unbounded);
//! a fixed-duration activity has `min_duration == max_duration`.

use serde::{Deserialize, Serialize};

use super::{EventId, Guard, LocationId, TimeWindow};

index_handle!(
    /// Handle of an [`Episode`] inside its [`Problem`](super::Problem).
    EpisodeId
);

/// A directed, duration-bounded arc between two events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Registry handle.
    pub id: EpisodeId,
    /// Source event.
    pub start: EventId,
    /// Target event.
    pub end: EventId,
    /// Lower duration bound (seconds). `None` = unbounded.
    pub min_duration: Option<i64>,
    /// Upper duration bound (seconds). `None` = unbounded.
    pub max_duration: Option<i64>,
    /// Activity label (point-of-interest name).
    pub name: Option<String>,
    /// Where the episode starts.
    pub start_location: Option<LocationId>,
    /// Where the episode ends.
    pub end_location: Option<LocationId>,
    /// Absolute intervals the episode must fall into. Empty = anytime.
    pub time_windows: Vec<TimeWindow>,
    /// Assignments that must hold for the episode to be active.
    pub guards: Vec<Guard>,
}

impl Episode {
    /// Creates an unlabelled episode.
    pub fn new(
        id: EpisodeId,
        start: EventId,
        end: EventId,
        min_duration: Option<i64>,
        max_duration: Option<i64>,
    ) -> Self {
        Self {
            id,
            start,
            end,
            min_duration,
            max_duration,
            name: None,
            start_location: None,
            end_location: None,
            time_windows: Vec::new(),
            guards: Vec::new(),
        }
    }

    /// Sets the activity label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Places the episode at one location (start and end).
    pub fn at(mut self, location: LocationId) -> Self {
        self.start_location = Some(location);
        self.end_location = Some(location);
        self
    }

    /// Sets the admissible time windows.
    pub fn with_time_windows(mut self, windows: Vec<TimeWindow>) -> Self {
        self.time_windows = windows;
        self
    }

    /// Adds a guard.
    pub fn add_guard(&mut self, guard: Guard) {
        self.guards.push(guard);
    }

    /// Whether the duration is fixed (both bounds set and equal).
    pub fn is_fixed(&self) -> bool {
        matches!((self.min_duration, self.max_duration), (Some(a), Some(b)) if a == b)
    }

    /// Whether the bounds are consistent (`min ≤ max` when both are set).
    pub fn has_ordered_bounds(&self) -> bool {
        match (self.min_duration, self.max_duration) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }

    /// The (start, end) event pair.
    #[inline]
    pub fn endpoints(&self) -> (EventId, EventId) {
        (self.start, self.end)
    }
}

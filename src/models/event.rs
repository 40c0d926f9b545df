//! Event (time point) model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

index_handle!(
    /// Handle of an [`Event`] inside its [`Problem`](super::Problem).
    EventId
);

/// An instantaneous point in time.
///
/// Two events are distinct even when their bounds coincide; identity is
/// the registry handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Registry handle.
    pub id: EventId,
    /// Earliest admissible time. `None` = unbounded.
    pub earliest_time: Option<NaiveDateTime>,
    /// Latest admissible time. `None` = unbounded.
    pub latest_time: Option<NaiveDateTime>,
}

impl Event {
    /// Creates an unbounded event.
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            earliest_time: None,
            latest_time: None,
        }
    }

    /// Whether the event is pinned to exactly one instant.
    pub fn is_pinned(&self) -> bool {
        matches!((self.earliest_time, self.latest_time), (Some(a), Some(b)) if a == b)
    }
}

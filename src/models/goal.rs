//! Goal group model.
//!
//! A goal group is one optional itinerary need (visit an attraction, have
//! lunch on a given day) together with the mutually exclusive episodes
//! that can fulfil it. The planner picks at most one alternative through
//! the group's selection variable, and the whole group is skipped when its
//! guard does not hold.

use serde::{Deserialize, Serialize};

use super::{EpisodeId, EventId, Guard, VariableId};

index_handle!(
    /// Handle of a [`GoalGroup`] inside its [`Problem`](super::Problem).
    GoalGroupId
);

/// A set of mutually exclusive alternatives fulfilling one need.
///
/// Every goal episode runs from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalGroup {
    /// Registry handle.
    pub id: GoalGroupId,
    /// Goal name.
    pub name: String,
    /// Entry event (slot start).
    pub start: EventId,
    /// Exit event (slot end).
    pub end: EventId,
    /// Arrival at the goal.
    pub arrival: EventId,
    /// Departure from the goal.
    pub departure: EventId,
    /// Alternative episodes, each from `start` to `end`.
    pub goal_episodes: Vec<EpisodeId>,
    /// Variable whose options select among `goal_episodes`.
    pub selection_variable: Option<VariableId>,
    /// Priority weight (higher = more important).
    pub priority: f64,
    /// Assignment that must hold for the goal to be pursued.
    pub guard: Option<Guard>,
}

impl GoalGroup {
    /// Creates an empty goal group.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: GoalGroupId,
        name: impl Into<String>,
        start: EventId,
        end: EventId,
        arrival: EventId,
        departure: EventId,
        priority: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start,
            end,
            arrival,
            departure,
            goal_episodes: Vec::new(),
            selection_variable: None,
            priority,
            guard: None,
        }
    }

    /// Adds an alternative episode.
    pub fn add_goal_episode(&mut self, episode: EpisodeId) {
        self.goal_episodes.push(episode);
    }

    /// Sets the selection variable.
    pub fn set_selection_variable(&mut self, variable: VariableId) {
        self.selection_variable = Some(variable);
    }

    /// Sets the guard.
    pub fn set_guard(&mut self, guard: Guard) {
        self.guard = Some(guard);
    }

    /// Number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.goal_episodes.len()
    }
}

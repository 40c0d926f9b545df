//! Agent model.

use serde::{Deserialize, Serialize};

use super::{EventId, GoalGroupId, LocationId};

index_handle!(
    /// Handle of an [`Agent`] inside its [`Problem`](super::Problem).
    AgentId
);

/// A traveller with its own time span and the goals it may pursue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Registry handle.
    pub id: AgentId,
    /// When the agent becomes active.
    pub start: EventId,
    /// When the agent must be done.
    pub end: EventId,
    /// Where the agent starts.
    pub origin: LocationId,
    /// Where the agent must end.
    pub destination: LocationId,
    /// Goals the agent may pursue, in registration order.
    pub goal_groups: Vec<GoalGroupId>,
}

impl Agent {
    /// Creates an agent with no goals.
    pub fn new(
        id: AgentId,
        start: EventId,
        end: EventId,
        origin: LocationId,
        destination: LocationId,
    ) -> Self {
        Self {
            id,
            start,
            end,
            origin,
            destination,
            goal_groups: Vec::new(),
        }
    }

    /// Registers a goal group.
    pub fn add_goal_group(&mut self, goal_group: GoalGroupId) {
        self.goal_groups.push(goal_group);
    }

    /// Whether origin and destination coincide.
    pub fn is_round_trip(&self) -> bool {
        self.origin == self.destination
    }
}

//! Problem (temporal network) model.
//!
//! A problem owns every entity of one encoded trip in append-only
//! registries. Handles returned by the `add_*` methods index those
//! registries directly, and indexing a problem with a handle it produced
//! never fails. Looking up a foreign handle panics; use the `get_*`
//! methods when the handle's origin is unknown (e.g. after
//! deserialization).

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::{
    Agent, AgentId, DecisionVariable, Episode, EpisodeId, Event, EventId, GoalGroup, GoalGroupId,
    Location, LocationId, VariableId,
};

/// A complete temporal planning problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    start_event: EventId,
    end_event: EventId,
    events: Vec<Event>,
    episodes: Vec<Episode>,
    locations: Vec<Location>,
    decision_variables: Vec<DecisionVariable>,
    goal_groups: Vec<GoalGroup>,
    agents: Vec<Agent>,
}

impl Problem {
    /// Creates a problem with fresh global start and end events.
    pub fn new() -> Self {
        let mut problem = Self {
            start_event: EventId(0),
            end_event: EventId(1),
            events: Vec::new(),
            episodes: Vec::new(),
            locations: Vec::new(),
            decision_variables: Vec::new(),
            goal_groups: Vec::new(),
            agents: Vec::new(),
        };
        problem.start_event = problem.add_event();
        problem.end_event = problem.add_event();
        problem
    }

    /// Global start event.
    pub fn start_event(&self) -> EventId {
        self.start_event
    }

    /// Global end event.
    pub fn end_event(&self) -> EventId {
        self.end_event
    }

    // ---- construction ----

    /// Adds an unbounded event.
    pub fn add_event(&mut self) -> EventId {
        let id = EventId(self.events.len());
        self.events.push(Event::new(id));
        id
    }

    /// Adds an episode between two events.
    pub fn add_episode(
        &mut self,
        start: EventId,
        end: EventId,
        min_duration: Option<i64>,
        max_duration: Option<i64>,
    ) -> EpisodeId {
        let id = EpisodeId(self.episodes.len());
        self.episodes
            .push(Episode::new(id, start, end, min_duration, max_duration));
        id
    }

    /// Adds a location, or returns the existing one with the same name.
    pub fn add_location(&mut self, name: &str, latitude: f64, longitude: f64) -> LocationId {
        if let Some(existing) = self.locations.iter().find(|l| l.name == name) {
            return existing.id;
        }
        let id = LocationId(self.locations.len());
        self.locations
            .push(Location::new(id, name, latitude, longitude));
        id
    }

    /// Adds a decision variable with initial options.
    pub fn add_decision_variable<I, S>(&mut self, name: impl Into<String>, options: I) -> VariableId
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let id = VariableId(self.decision_variables.len());
        let mut variable = DecisionVariable::new(id, name);
        for (label, utility) in options {
            variable.add_option(label, utility);
        }
        self.decision_variables.push(variable);
        id
    }

    /// Adds an empty goal group.
    #[allow(clippy::too_many_arguments)]
    pub fn add_goal_group(
        &mut self,
        name: impl Into<String>,
        start: EventId,
        end: EventId,
        arrival: EventId,
        departure: EventId,
        priority: f64,
    ) -> GoalGroupId {
        let id = GoalGroupId(self.goal_groups.len());
        self.goal_groups.push(GoalGroup::new(
            id, name, start, end, arrival, departure, priority,
        ));
        id
    }

    /// Adds an agent.
    pub fn add_agent(
        &mut self,
        start: EventId,
        end: EventId,
        origin: LocationId,
        destination: LocationId,
    ) -> AgentId {
        let id = AgentId(self.agents.len());
        self.agents
            .push(Agent::new(id, start, end, origin, destination));
        id
    }

    // ---- lookup ----

    /// Event by handle.
    pub fn get_event(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.index())
    }

    /// Episode by handle.
    pub fn get_episode(&self, id: EpisodeId) -> Option<&Episode> {
        self.episodes.get(id.index())
    }

    /// Location by handle.
    pub fn get_location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.index())
    }

    /// Decision variable by handle.
    pub fn get_variable(&self, id: VariableId) -> Option<&DecisionVariable> {
        self.decision_variables.get(id.index())
    }

    /// Goal group by handle.
    pub fn get_goal_group(&self, id: GoalGroupId) -> Option<&GoalGroup> {
        self.goal_groups.get(id.index())
    }

    /// Agent by handle.
    pub fn get_agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    /// Goal group by name.
    pub fn goal_group_named(&self, name: &str) -> Option<&GoalGroup> {
        self.goal_groups.iter().find(|g| g.name == name)
    }

    /// Decision variable by name.
    pub fn variable_named(&self, name: &str) -> Option<&DecisionVariable> {
        self.decision_variables.iter().find(|v| v.name == name)
    }

    /// All events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// All episodes.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// All locations.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All decision variables.
    pub fn decision_variables(&self) -> &[DecisionVariable] {
        &self.decision_variables
    }

    /// All goal groups.
    pub fn goal_groups(&self) -> &[GoalGroup] {
        &self.goal_groups
    }

    /// All agents.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Resolves the goal episodes of a group.
    pub fn goal_episodes<'a>(&'a self, group: &'a GoalGroup) -> impl Iterator<Item = &'a Episode> {
        group
            .goal_episodes
            .iter()
            .filter_map(move |id| self.get_episode(*id))
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! registry_index {
    ($id:ty, $entity:ty, $field:ident) => {
        impl Index<$id> for Problem {
            type Output = $entity;

            fn index(&self, id: $id) -> &$entity {
                &self.$field[id.index()]
            }
        }

        impl IndexMut<$id> for Problem {
            fn index_mut(&mut self, id: $id) -> &mut $entity {
                &mut self.$field[id.index()]
            }
        }
    };
}

registry_index!(EventId, Event, events);
registry_index!(EpisodeId, Episode, episodes);
registry_index!(LocationId, Location, locations);
registry_index!(VariableId, DecisionVariable, decision_variables);
registry_index!(GoalGroupId, GoalGroup, goal_groups);
registry_index!(AgentId, Agent, agents);

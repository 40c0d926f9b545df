//! Temporal network models.
//!
//! Provides the entity set handed to an external temporal planner:
//! events, duration-bounded episodes between them, locations, discrete
//! decision variables with guards, goal groups of mutually exclusive
//! alternatives, and the agents that pursue them.
//!
//! # Ownership
//! A [`Problem`] owns every entity in flat registries. Entities refer to
//! each other through typed index handles ([`EventId`], [`EpisodeId`], ...)
//! so a decision variable guarding several episodes and a goal group is
//! shared by handle, never aliased.
//!
//! # Domain Mappings
//!
//! | u-itinerary | Temporal planning | Trip itinerary |
//! |-------------|-------------------|----------------|
//! | Event | Time point | Arrival, departure, slot boundary |
//! | Episode | Simple temporal constraint | Visit, meal, travel slack |
//! | DecisionVariable | Discrete choice | Which restaurant, visit or skip |
//! | GoalGroup | Optional goal | One attraction, one meal |

macro_rules! index_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            /// Position in the owning registry.
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

mod agent;
mod calendar;
mod episode;
mod event;
mod goal;
mod location;
mod problem;
mod variable;

pub use agent::{Agent, AgentId};
pub use calendar::TimeWindow;
pub use episode::{Episode, EpisodeId};
pub use event::{Event, EventId};
pub use goal::{GoalGroup, GoalGroupId};
pub use location::{Location, LocationId};
pub use problem::Problem;
pub use variable::{DecisionVariable, Guard, VariableId};

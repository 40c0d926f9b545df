//! Trip itinerary modeling for temporal planners.
//!
//! Converts a trip request (dates, origin/destination, candidate
//! attractions and restaurants) into a conditional temporal network for an
//! external planner, and turns the planner's solved routes back into a
//! day-by-day itinerary. The planner itself is not part of this crate.
//!
//! ```text
//! TripRecord ──encoder──► Problem ──(external planner)──► SolutionDocument ──decoder──► [DayPlan]
//! ```
//!
//! # Modules
//!
//! - **`models`**: Network entities — `Event`, `Episode`, `Location`,
//!   `DecisionVariable`, `Guard`, `GoalGroup`, `Agent`, `Problem`
//! - **`time_windows`**: Day windows, meal hours, absolute window anchoring
//! - **`record`**: Trip records and typed per-POI reference rows
//! - **`encoder`**: Record → `Problem` (visit-or-skip goal groups)
//! - **`decoder`**: Solved routes → `DayPlan`s
//! - **`validation`**: Structural checks on encoded problems
//! - **`config`**: Tunable durations, utilities, and hours (TOML)
//!
//! # Example
//!
//! ```
//! use u_itinerary::{decoder, encoder, record::TripRecord, validation};
//!
//! let record: TripRecord = serde_json::from_str(r#"{
//!     "days": 1, "date": ["2022-03-16"], "org": "Rockford", "dest": "Tampa",
//!     "structured_ref_info": [{
//!         "Info Type": "Accommodations", "Number": 1,
//!         "Structured Content": {"NAME": {"0": "Hotel"}}
//!     }]
//! }"#).unwrap();
//!
//! let problem = encoder::encode(&record).unwrap();
//! assert!(validation::validate_problem(&problem).is_ok());
//!
//! let solution = serde_json::from_str(r#"{"routes": [[{"name": "Hotel"}]]}"#).unwrap();
//! let plan = decoder::decode(&solution, &record).unwrap();
//! assert_eq!(plan[0].accommodation, "Hotel");
//! ```
//!
//! # References
//!
//! - Dechter et al. (1991), "Temporal Constraint Networks"
//! - Tsamardinos et al. (2003), "Conditional Temporal Problems"

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod models;
pub mod record;
pub mod time_windows;
pub mod validation;

pub use error::{ItineraryError, Result};

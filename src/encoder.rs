//! Trip record → temporal network encoding.
//!
//! Builds one [`Problem`] per trip record. Every optional piece of
//! itinerary content (one attraction, one meal on one day) becomes a
//! *visit-or-skip unit*:
//!
//! ```text
//!   agent start ──► arrival ──► slot start ══ activity ══► slot end ──► departure ──► agent end
//!                      └────────────────── skip shortcut ─────────────────┘
//! ```
//!
//! A binary `IncludeOrNot_<unit>` variable (`Visit` / `NotVisit`, both
//! worth nothing) guards the six structural episodes, the unit's choice
//! variable and its goal group. Choosing `NotVisit` collapses the unit to
//! a no-op; choosing `Visit` activates the slot and whichever alternative
//! the `Choice_<unit>` variable selects. Utility lives on the choice
//! options only.
//!
//! # Reference
//! - Dechter et al. (1991), "Temporal Constraint Networks"
//! - Tsamardinos et al. (2003), "Conditional Temporal Problems"

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::config::ItineraryConfig;
use crate::error::{ItineraryError, Result};
use crate::models::{AgentId, EventId, GoalGroupId, Guard, Problem, TimeWindow};
use crate::record::{Attraction, InfoBlock, InfoType, Restaurant, TripRecord};
use crate::time_windows::{activity_windows, meal_window, Meal, SECONDS_PER_DAY};

/// Option of a visit variable that activates its unit.
pub const VISIT: &str = "Visit";
/// Option of a visit variable that skips its unit.
pub const NOT_VISIT: &str = "NotVisit";

/// Encodes trip records into temporal planning problems.
///
/// # Example
/// ```
/// use u_itinerary::encoder::ProblemEncoder;
/// use u_itinerary::record::TripRecord;
///
/// let record: TripRecord = serde_json::from_str(r#"{
///     "days": 1, "date": ["2022-03-16"], "org": "Rockford", "dest": "Tampa",
///     "structured_ref_info": [{
///         "Info Type": "Attractions", "Number": 1,
///         "Structured Content": {
///             "Name": {"0": "Park"}, "Latitude": {"0": 0.0}, "Longitude": {"0": 0.0}
///         }
///     }]
/// }"#).unwrap();
///
/// let problem = ProblemEncoder::default().encode(&record).unwrap();
/// assert_eq!(problem.goal_groups().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProblemEncoder {
    config: ItineraryConfig,
}

/// The agent's time span and the trip calendar.
struct TripScope {
    agent_start: EventId,
    agent_end: EventId,
    dates: Vec<NaiveDate>,
}

/// Boundary events of one visit-or-skip unit.
#[derive(Debug, Clone, Copy)]
struct Slot {
    arrival: EventId,
    start: EventId,
    end: EventId,
    departure: EventId,
}

impl ProblemEncoder {
    /// Creates an encoder.
    pub fn new(config: ItineraryConfig) -> Self {
        Self { config }
    }

    /// Encoding configuration.
    pub fn config(&self) -> &ItineraryConfig {
        &self.config
    }

    /// Encodes a trip record.
    ///
    /// Creates:
    /// - Global start/end events pinned to the trip span
    /// - A round-trip agent with its own start/end events
    /// - One goal group per distinct attraction name
    /// - One goal group per (meal, date) with every distinct restaurant,
    ///   across all restaurant tables, as an alternative
    ///
    /// # Errors
    /// Fails if a date is malformed, the record has no dates, the trip or
    /// one of its windows lies beyond the representable calendar, or a
    /// reference table lacks a required field. No partial problem is
    /// returned.
    pub fn encode(&self, record: &TripRecord) -> Result<Problem> {
        let dates = record.parsed_dates()?;
        let anchor_date = *dates.first().ok_or(ItineraryError::EmptyDates)?;
        let anchor = anchor_date.and_time(NaiveTime::MIN);
        let trip_end = TimeDelta::try_days(i64::from(record.days))
            .and_then(|span| anchor.checked_add_signed(span))
            .ok_or(ItineraryError::TripTooLong { days: record.days })?;

        info!(
            event = "encode_start",
            days = record.days,
            dates = dates.len(),
            org = %record.org,
            dest = %record.dest
        );

        let mut problem = Problem::new();
        let global_start = problem.start_event();
        let global_end = problem.end_event();
        problem[global_start].earliest_time = Some(anchor);
        problem[global_start].latest_time = Some(anchor);
        problem[global_end].latest_time = Some(trip_end);

        let scope = self.add_agent_scope(&mut problem, record, anchor, trip_end, dates);
        let agent = self.add_round_trip_agent(&mut problem, record, &scope);

        // Meal groups are keyed by (meal, date) alone, so every restaurant
        // table feeds the same groups at the first table's position.
        let mut meals_encoded = false;
        for block in &record.structured_ref_info {
            let goal_groups = match block.info_type {
                InfoType::Attractions => self.add_attractions(&mut problem, &scope, block)?,
                InfoType::Restaurants if !meals_encoded => {
                    meals_encoded = true;
                    self.add_restaurants(&mut problem, &scope, record)?
                }
                _ => continue,
            };
            for group in goal_groups {
                problem[agent].add_goal_group(group);
            }
        }

        info!(
            event = "encode_end",
            events = problem.events().len(),
            episodes = problem.episodes().len(),
            variables = problem.decision_variables().len(),
            goal_groups = problem.goal_groups().len()
        );
        Ok(problem)
    }

    /// Agent start/end events hung off the global span.
    fn add_agent_scope(
        &self,
        problem: &mut Problem,
        record: &TripRecord,
        anchor: NaiveDateTime,
        trip_end: NaiveDateTime,
        dates: Vec<NaiveDate>,
    ) -> TripScope {
        let global_start = problem.start_event();
        let global_end = problem.end_event();

        let agent_start = problem.add_event();
        let agent_end = problem.add_event();
        problem[agent_start].earliest_time = Some(anchor);
        problem[agent_end].latest_time = Some(trip_end);

        problem.add_episode(global_start, agent_start, Some(0), None);
        problem.add_episode(agent_end, global_end, Some(0), None);
        // Horizon: the agent finishes within the trip length.
        problem.add_episode(
            global_start,
            agent_end,
            Some(0),
            Some(SECONDS_PER_DAY * i64::from(record.days)),
        );

        TripScope {
            agent_start,
            agent_end,
            dates,
        }
    }

    fn add_round_trip_agent(
        &self,
        problem: &mut Problem,
        record: &TripRecord,
        scope: &TripScope,
    ) -> AgentId {
        let geo = &self.config.geo;
        let home = if geo.use_real_coordinates {
            problem.add_location(&record.org, geo.origin_lat, geo.origin_lon)
        } else {
            problem.add_location(&record.dest, geo.placeholder_lat, geo.placeholder_lon)
        };
        problem.add_agent(scope.agent_start, scope.agent_end, home, home)
    }

    /// One goal group per attraction not encoded yet.
    fn add_attractions(
        &self,
        problem: &mut Problem,
        scope: &TripScope,
        block: &InfoBlock,
    ) -> Result<Vec<GoalGroupId>> {
        let attractions = block.attractions()?;
        let windows = activity_windows(&scope.dates, self.config.activity.window)?;

        let mut groups = Vec::with_capacity(attractions.len());
        for attraction in &attractions {
            if problem.goal_group_named(&attraction.name).is_some() {
                warn!(
                    event = "duplicate_attraction",
                    name = %attraction.name,
                    "attraction listed twice, keeping the first"
                );
                continue;
            }
            groups.push(self.add_attraction(problem, scope, attraction, &windows));
        }
        Ok(groups)
    }

    fn add_attraction(
        &self,
        problem: &mut Problem,
        scope: &TripScope,
        attraction: &Attraction,
        windows: &[TimeWindow],
    ) -> GoalGroupId {
        let activity = &self.config.activity;
        let geo = &self.config.geo;
        let name = attraction.name.as_str();

        let visit = add_visit_variable(problem, name);
        let slot = add_slot(problem, scope, &visit);

        let (lat, lon) = if geo.use_real_coordinates {
            (attraction.latitude, attraction.longitude)
        } else {
            (geo.placeholder_lat, geo.placeholder_lon)
        };
        let location = problem.add_location(name, lat, lon);

        let choice =
            problem.add_decision_variable(format!("Choice_{name}"), [(name, activity.utility)]);
        problem[choice].add_guard(visit.clone());

        let duration = Some(activity.duration_secs);
        let episode = problem.add_episode(slot.start, slot.end, duration, duration);
        let visit_episode = &mut problem[episode];
        visit_episode.name = Some(name.to_string());
        visit_episode.start_location = Some(location);
        visit_episode.end_location = Some(location);
        visit_episode.time_windows = windows.to_vec();
        visit_episode.add_guard(Guard::new(choice, name));

        let group = problem.add_goal_group(
            name,
            slot.start,
            slot.end,
            slot.arrival,
            slot.departure,
            activity.priority,
        );
        let goal = &mut problem[group];
        goal.add_goal_episode(episode);
        goal.set_selection_variable(choice);
        goal.set_guard(visit);

        debug!(event = "goal_group", kind = "attraction", name = %name);
        group
    }

    /// One goal group per (meal, date), meal-major.
    fn add_restaurants(
        &self,
        problem: &mut Problem,
        scope: &TripScope,
        record: &TripRecord,
    ) -> Result<Vec<GoalGroupId>> {
        let restaurants = distinct_restaurants(record.restaurants()?);
        if restaurants.is_empty() {
            debug!(event = "restaurants_empty", "no restaurant candidates, skipping meals");
            return Ok(Vec::new());
        }

        let meals = self.config.dining.meals();
        let mut groups = Vec::with_capacity(Meal::ALL.len() * scope.dates.len());
        for meal in Meal::ALL {
            for &date in &scope.dates {
                let window = meal_window(meal, date, &meals)?;
                groups.push(self.add_meal(problem, scope, meal, date, window, &restaurants));
            }
        }
        Ok(groups)
    }

    fn add_meal(
        &self,
        problem: &mut Problem,
        scope: &TripScope,
        meal: Meal,
        date: NaiveDate,
        window: TimeWindow,
        restaurants: &[Restaurant],
    ) -> GoalGroupId {
        let dining = &self.config.dining;
        let geo = &self.config.geo;
        let label = format!("{meal}-{}", date.format("%m/%d"));

        let visit = add_visit_variable(problem, &label);
        let slot = add_slot(problem, scope, &visit);

        let group = problem.add_goal_group(
            label.as_str(),
            slot.start,
            slot.end,
            slot.arrival,
            slot.departure,
            dining.priority,
        );
        let no_options = std::iter::empty::<(String, f64)>();
        let choice = problem.add_decision_variable(format!("Choice_{label}"), no_options);
        problem[choice].add_guard(visit.clone());

        let duration = Some(dining.duration_secs);

        for restaurant in restaurants {
            // Restaurant tables carry no coordinates.
            let location =
                problem.add_location(&restaurant.name, geo.placeholder_lat, geo.placeholder_lon);
            let pick = problem[choice]
                .add_option(restaurant.name.as_str(), dining.rating_scale * restaurant.rating);

            let episode = problem.add_episode(slot.start, slot.end, duration, duration);
            let dining_episode = &mut problem[episode];
            dining_episode.name = Some(restaurant.name.clone());
            dining_episode.start_location = Some(location);
            dining_episode.end_location = Some(location);
            dining_episode.time_windows = vec![window];
            dining_episode.add_guard(pick);

            problem[group].add_goal_episode(episode);
        }

        let goal = &mut problem[group];
        goal.set_selection_variable(choice);
        goal.set_guard(visit);

        debug!(
            event = "goal_group",
            kind = "meal",
            name = %label,
            alternatives = restaurants.len()
        );
        group
    }
}

/// Collapses restaurants sharing a name, keeping the first position and the
/// last rating.
fn distinct_restaurants(restaurants: Vec<Restaurant>) -> Vec<Restaurant> {
    let mut by_name: IndexMap<String, Restaurant> = IndexMap::with_capacity(restaurants.len());
    for restaurant in restaurants {
        if let Some(earlier) = by_name.insert(restaurant.name.clone(), restaurant) {
            warn!(
                event = "duplicate_restaurant",
                name = %earlier.name,
                "restaurant listed twice, later rating wins"
            );
        }
    }
    by_name.into_values().collect()
}

/// Encodes a trip record with the default configuration.
pub fn encode(record: &TripRecord) -> Result<Problem> {
    ProblemEncoder::default().encode(record)
}

/// Adds the zero-utility `Visit`/`NotVisit` variable of a unit and returns
/// the guard selecting `Visit`.
fn add_visit_variable(problem: &mut Problem, unit: &str) -> Guard {
    let variable = problem.add_decision_variable(
        format!("IncludeOrNot_{unit}"),
        [(VISIT, 0.0), (NOT_VISIT, 0.0)],
    );
    Guard::new(variable, VISIT)
}

/// Adds the four boundary events and six structural episodes of a unit,
/// all guarded by `visit`.
fn add_slot(problem: &mut Problem, scope: &TripScope, visit: &Guard) -> Slot {
    let slot = Slot {
        arrival: problem.add_event(),
        start: problem.add_event(),
        end: problem.add_event(),
        departure: problem.add_event(),
    };

    let structural = [
        (scope.agent_start, slot.arrival, Some(0)),
        (slot.arrival, slot.start, Some(0)),
        (slot.start, slot.end, Some(1)),
        (slot.end, slot.departure, Some(0)),
        (slot.departure, scope.agent_end, Some(0)),
        // Skip shortcut
        (slot.arrival, slot.departure, Some(0)),
    ];
    for (from, to, min_duration) in structural {
        let episode = problem.add_episode(from, to, min_duration, None);
        problem[episode].add_guard(visit.clone());
    }
    slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_windows::DayWindow;
    use crate::validation::validate_problem;
    use serde_json::json;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn attractions_block(names: &[&str]) -> serde_json::Value {
        let mut name = serde_json::Map::new();
        let mut lat = serde_json::Map::new();
        let mut lon = serde_json::Map::new();
        for (i, n) in names.iter().enumerate() {
            name.insert(i.to_string(), json!(n));
            lat.insert(i.to_string(), json!(27.0 + i as f64));
            lon.insert(i.to_string(), json!(-82.0 - i as f64));
        }
        json!({
            "Info Type": "Attractions",
            "Number": names.len(),
            "Structured Content": {"Name": name, "Latitude": lat, "Longitude": lon}
        })
    }

    fn restaurants_block(rows: &[(&str, f64)]) -> serde_json::Value {
        let names: serde_json::Map<_, _> = rows
            .iter()
            .enumerate()
            .map(|(i, (n, _))| (i.to_string(), json!(n)))
            .collect();
        let ratings: serde_json::Map<_, _> = rows
            .iter()
            .enumerate()
            .map(|(i, (_, r))| (i.to_string(), json!(r)))
            .collect();
        json!({
            "Info Type": "Restaurants",
            "Number": rows.len(),
            "Structured Content": {"Name": names, "Aggregate Rating": ratings}
        })
    }

    fn record(dates: &[&str], blocks: Vec<serde_json::Value>) -> TripRecord {
        serde_json::from_value(json!({
            "days": dates.len(),
            "date": dates,
            "org": "Rockford",
            "dest": "St. Petersburg",
            "structured_ref_info": blocks,
        }))
        .unwrap()
    }

    #[test]
    fn test_single_attraction_scenario() {
        let rec = record(&["2022-03-16"], vec![attractions_block(&["Park"])]);
        let problem = encode(&rec).unwrap();

        assert_eq!(problem.goal_groups().len(), 1);
        let group = problem.goal_group_named("Park").unwrap();
        assert_eq!(group.goal_episodes.len(), 1);
        assert_eq!(group.priority, 100.0);

        let episode = &problem[group.goal_episodes[0]];
        assert_eq!(episode.min_duration, Some(3600));
        assert_eq!(episode.max_duration, Some(3600));
        assert_eq!(episode.name.as_deref(), Some("Park"));
        assert_eq!(episode.time_windows, vec![TimeWindow::new(at(16, 9), at(16, 18))]);
        assert!(validate_problem(&problem).is_ok());
    }

    #[test]
    fn test_global_and_agent_events() {
        let rec = record(&["2022-03-16", "2022-03-17"], vec![]);
        let problem = encode(&rec).unwrap();

        let start = &problem[problem.start_event()];
        assert!(start.is_pinned());
        assert_eq!(start.earliest_time, Some(at(16, 0)));
        assert_eq!(problem[problem.end_event()].latest_time, Some(at(18, 0)));

        let agent = &problem.agents()[0];
        assert!(agent.is_round_trip());
        assert_eq!(problem[agent.start].earliest_time, Some(at(16, 0)));
        assert_eq!(problem[agent.end].latest_time, Some(at(18, 0)));
        assert_eq!(problem[agent.origin].name, "St. Petersburg");

        // Agent span episodes: start→agent start, agent end→end, horizon
        assert_eq!(problem.episodes().len(), 3);
        let horizon = &problem.episodes()[2];
        assert_eq!(horizon.endpoints(), (problem.start_event(), agent.end));
        assert_eq!(horizon.max_duration, Some(2 * SECONDS_PER_DAY));
    }

    #[test]
    fn test_attraction_counts() {
        let dates = ["2022-03-16", "2022-03-17", "2022-03-18"];
        let rec = record(&dates, vec![attractions_block(&["Park", "Museum", "Pier"])]);
        let problem = encode(&rec).unwrap();

        assert_eq!(problem.goal_groups().len(), 3);
        for group in problem.goal_groups() {
            assert_eq!(group.goal_episodes.len(), 1);
            let episode = &problem[group.goal_episodes[0]];
            assert_eq!(episode.time_windows.len(), dates.len());
            assert_eq!(episode.time_windows[1], TimeWindow::new(at(17, 9), at(17, 18)));
        }
        assert_eq!(problem.agents()[0].goal_groups.len(), 3);
    }

    #[test]
    fn test_meal_counts_and_windows() {
        let dates = ["2022-03-16", "2022-03-17"];
        let rec = record(
            &dates,
            vec![restaurants_block(&[("Cafe", 4.2), ("Diner", 3.5), ("Bistro", 4.8)])],
        );
        let problem = encode(&rec).unwrap();

        assert_eq!(problem.goal_groups().len(), 3 * dates.len());
        for group in problem.goal_groups() {
            assert_eq!(group.goal_episodes.len(), 3);
        }

        let lunch = problem.goal_group_named("Lunch-03/17").unwrap();
        for episode in problem.goal_episodes(lunch) {
            assert_eq!(episode.time_windows, vec![TimeWindow::new(at(17, 12), at(17, 14))]);
        }
        let breakfast = problem.goal_group_named("Breakfast-03/16").unwrap();
        let first = problem.goal_episodes(breakfast).next().unwrap();
        assert_eq!(first.time_windows, vec![TimeWindow::new(at(16, 8), at(16, 10))]);

        // Meal-major ordering
        let names: Vec<&str> = problem.goal_groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Breakfast-03/16",
                "Breakfast-03/17",
                "Lunch-03/16",
                "Lunch-03/17",
                "Dinner-03/16",
                "Dinner-03/17"
            ]
        );
        assert!(validate_problem(&problem).is_ok());
    }

    fn sorted_utilities(problem: &Problem, variable: &str) -> Vec<f64> {
        let mut values: Vec<f64> = problem
            .variable_named(variable)
            .unwrap()
            .domain
            .values()
            .copied()
            .collect();
        values.sort_by(f64::total_cmp);
        values
    }

    #[test]
    fn test_meal_utilities_scale_ratings() {
        let rows = [("Cafe", 4.2), ("Diner", 3.5), ("Bistro", 4.8)];
        let mut reversed = rows;
        reversed.reverse();

        let a = encode(&record(&["2022-03-16"], vec![restaurants_block(&rows)])).unwrap();
        let b = encode(&record(&["2022-03-16"], vec![restaurants_block(&reversed)])).unwrap();

        let expected = {
            let mut v: Vec<f64> = rows.iter().map(|(_, r)| r * 10.0).collect();
            v.sort_by(f64::total_cmp);
            v
        };
        assert_eq!(sorted_utilities(&a, "Choice_Dinner-03/16"), expected);
        assert_eq!(sorted_utilities(&b, "Choice_Dinner-03/16"), expected);
    }

    #[test]
    fn test_dining_episode_guarded_by_its_option() {
        let rec = record(
            &["2022-03-16"],
            vec![restaurants_block(&[("Cafe", 4.0), ("Diner", 3.0)])],
        );
        let problem = encode(&rec).unwrap();

        let group = problem.goal_group_named("Lunch-03/16").unwrap();
        let choice = group.selection_variable.unwrap();
        for episode in problem.goal_episodes(group) {
            let name = episode.name.clone().unwrap();
            assert_eq!(episode.guards, vec![Guard::new(choice, name)]);
        }
    }

    #[test]
    fn test_visit_variable_guards_unit() {
        let rec = record(&["2022-03-16"], vec![attractions_block(&["Park"])]);
        let problem = encode(&rec).unwrap();

        let visit_var = problem.variable_named("IncludeOrNot_Park").unwrap();
        assert_eq!(visit_var.utility(VISIT), Some(0.0));
        assert_eq!(visit_var.utility(NOT_VISIT), Some(0.0));
        let visit = Guard::new(visit_var.id, VISIT);

        let guarded = problem
            .episodes()
            .iter()
            .filter(|e| e.guards.contains(&visit))
            .count();
        assert_eq!(guarded, 6);

        let choice = problem.variable_named("Choice_Park").unwrap();
        assert_eq!(choice.guards, vec![visit.clone()]);
        assert_eq!(choice.utility("Park"), Some(50.0));

        let group = problem.goal_group_named("Park").unwrap();
        assert_eq!(group.guard, Some(visit));
        assert_eq!(group.selection_variable, Some(choice.id));
    }

    #[test]
    fn test_slot_structure() {
        let rec = record(&["2022-03-16"], vec![attractions_block(&["Park"])]);
        let problem = encode(&rec).unwrap();
        let group = problem.goal_group_named("Park").unwrap();
        let agent = &problem.agents()[0];

        let has = |from: EventId, to: EventId, min: i64| {
            problem.episodes().iter().any(|e| {
                e.endpoints() == (from, to)
                    && e.min_duration == Some(min)
                    && e.max_duration.is_none()
            })
        };
        assert!(has(agent.start, group.arrival, 0));
        assert!(has(group.arrival, group.start, 0));
        assert!(has(group.start, group.end, 1));
        assert!(has(group.end, group.departure, 0));
        assert!(has(group.departure, agent.end, 0));
        assert!(has(group.arrival, group.departure, 0));
    }

    #[test]
    fn test_duration_bounds_ordered() {
        let rec = record(
            &["2022-03-16", "2022-03-17"],
            vec![
                attractions_block(&["Park", "Museum"]),
                restaurants_block(&[("Cafe", 4.0)]),
            ],
        );
        let problem = encode(&rec).unwrap();
        assert!(problem.episodes().iter().all(|e| e.has_ordered_bounds()));
        for group in problem.goal_groups() {
            assert!(problem
                .goal_episodes(group)
                .all(|e| e.endpoints() == (group.start, group.end)));
        }
    }

    #[test]
    fn test_blocks_encoded_in_record_order() {
        let rec = record(
            &["2022-03-16"],
            vec![restaurants_block(&[("Cafe", 4.0)]), attractions_block(&["Park"])],
        );
        let problem = encode(&rec).unwrap();
        let last = problem.goal_groups().last().unwrap();
        assert_eq!(last.name, "Park");
        assert_eq!(problem.agents()[0].goal_groups.len(), 4);
    }

    #[test]
    fn test_locations_shared_across_meals() {
        let rec = record(&["2022-03-16", "2022-03-17"], vec![restaurants_block(&[("Cafe", 4.0)])]);
        let problem = encode(&rec).unwrap();
        // Home + Cafe
        assert_eq!(problem.locations().len(), 2);
    }

    #[test]
    fn test_real_coordinates() {
        let rec = record(&["2022-03-16"], vec![attractions_block(&["Park"])]);
        let encoder = ProblemEncoder::new(ItineraryConfig::default().with_real_coordinates(true));
        let problem = encoder.encode(&rec).unwrap();

        let home = &problem[problem.agents()[0].origin];
        assert_eq!(home.name, "Rockford");
        assert_eq!(home.latitude, 42.2773242);

        let park = problem.locations().iter().find(|l| l.name == "Park").unwrap();
        assert_eq!(park.latitude, 27.0);
        assert_eq!(park.longitude, -82.0);
    }

    #[test]
    fn test_placeholder_coordinates() {
        let rec = record(&["2022-03-16"], vec![attractions_block(&["Park"])]);
        let problem = encode(&rec).unwrap();
        assert!(problem
            .locations()
            .iter()
            .all(|l| l.latitude == 0.0 && l.longitude == 0.0));
    }

    #[test]
    fn test_empty_restaurant_table_adds_no_meals() {
        let rec = record(&["2022-03-16"], vec![restaurants_block(&[])]);
        let problem = encode(&rec).unwrap();
        assert!(problem.goal_groups().is_empty());
    }

    #[test]
    fn test_repeated_restaurant_collapses_to_one_alternative() {
        let rec = record(
            &["2022-03-16"],
            vec![restaurants_block(&[("Cafe", 4.0), ("Diner", 3.5), ("Cafe", 3.0)])],
        );
        let problem = encode(&rec).unwrap();

        for group in problem.goal_groups() {
            let names: Vec<_> = problem
                .goal_episodes(group)
                .map(|e| e.name.clone().unwrap())
                .collect();
            assert_eq!(names, vec!["Cafe", "Diner"]);
        }
        let choice = problem.variable_named("Choice_Lunch-03/16").unwrap();
        assert_eq!(choice.option_count(), 2);
        assert_eq!(choice.utility("Cafe"), Some(30.0));
        assert!(validate_problem(&problem).is_ok());
    }

    #[test]
    fn test_restaurant_tables_share_meal_groups() {
        let rec = record(
            &["2022-03-16"],
            vec![
                restaurants_block(&[("Cafe", 4.0)]),
                attractions_block(&["Park"]),
                restaurants_block(&[("Diner", 3.0), ("Cafe", 4.5)]),
            ],
        );
        let problem = encode(&rec).unwrap();

        let names: Vec<&str> = problem.goal_groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Breakfast-03/16", "Lunch-03/16", "Dinner-03/16", "Park"]);
        let dinner = problem.goal_group_named("Dinner-03/16").unwrap();
        assert_eq!(dinner.goal_episodes.len(), 2);
        assert_eq!(
            problem.variable_named("Choice_Dinner-03/16").unwrap().utility("Cafe"),
            Some(45.0)
        );
        assert!(validate_problem(&problem).is_ok());
    }

    #[test]
    fn test_repeated_attraction_keeps_first() {
        let rec = record(
            &["2022-03-16"],
            vec![
                attractions_block(&["Park", "Museum", "Park"]),
                attractions_block(&["Museum"]),
            ],
        );
        let problem = encode(&rec).unwrap();

        let names: Vec<&str> = problem.goal_groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Park", "Museum"]);
        assert_eq!(problem.agents()[0].goal_groups.len(), 2);
        assert!(validate_problem(&problem).is_ok());
    }

    #[test]
    fn test_trip_beyond_calendar_fails() {
        let mut rec = record(&["2022-03-16"], vec![attractions_block(&["Park"])]);
        rec.days = 4_000_000_000;
        assert!(matches!(
            encode(&rec),
            Err(ItineraryError::TripTooLong { days: 4_000_000_000 })
        ));
    }

    #[test]
    fn test_unrepresentable_window_fails() {
        let mut config = ItineraryConfig::default();
        config.activity.window = DayWindow::new(0, i64::MAX);
        let rec = record(&["2022-03-16"], vec![attractions_block(&["Park"])]);

        let err = ProblemEncoder::new(config).encode(&rec).unwrap_err();
        assert!(matches!(err, ItineraryError::DateOutOfRange { .. }));
    }

    #[test]
    fn test_malformed_date_fails() {
        let rec = record(&["2022/03/16"], vec![attractions_block(&["Park"])]);
        assert!(matches!(encode(&rec), Err(ItineraryError::DateParse { .. })));
    }

    #[test]
    fn test_no_dates_fails() {
        let rec = record(&[], vec![]);
        assert!(matches!(encode(&rec), Err(ItineraryError::EmptyDates)));
    }

    #[test]
    fn test_missing_field_fails() {
        let mut block = attractions_block(&["Park"]);
        block["Structured Content"]
            .as_object_mut()
            .unwrap()
            .remove("Latitude");
        let rec = record(&["2022-03-16"], vec![block]);
        assert!(matches!(encode(&rec), Err(ItineraryError::MissingField { .. })));
    }

    #[test]
    fn test_custom_activity_config() {
        let config = ItineraryConfig::from_toml_str(
            "[activity]\nduration_secs = 5400\nutility = 80.0\n",
        )
        .unwrap();
        let rec = record(&["2022-03-16"], vec![attractions_block(&["Park"])]);
        let problem = ProblemEncoder::new(config).encode(&rec).unwrap();

        let group = problem.goal_group_named("Park").unwrap();
        assert_eq!(problem[group.goal_episodes[0]].min_duration, Some(5400));
        assert_eq!(problem.variable_named("Choice_Park").unwrap().utility("Park"), Some(80.0));
    }
}

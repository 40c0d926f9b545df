//! Solved routes → day-by-day itinerary.
//!
//! A solution lists one route per trip day; each route is the ordered list
//! of segments the traveller performs. Decoding classifies every segment
//! by the point of interest it names, using the same reference tables the
//! encoder read, and folds the day's segments into a [`DayPlan`].
//!
//! # Segment handling
//!
//! | Category | Effect on the day |
//! |----------|-------------------|
//! | Restaurant | breakfast / lunch / dinner, chosen by start time of day |
//! | Attraction | appended to `attraction` (`"; "`-separated) |
//! | Accommodation | `accommodation`, only when it ends the route |
//! | Flight | `transportation` = flight number |
//! | Self-driving / taxi | `transportation`, and `current_city` = "from A to B" |
//! | Unknown | locations registered for later back-references |
//!
//! Location objects appear inline the first time and as bare `@id`
//! references afterwards, possibly on later days. The [`ScanState`]
//! carrying those locations is threaded explicitly through the fold.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::ItineraryConfig;
use crate::error::{ItineraryError, Result};
use crate::record::{InfoType, TripRecord};
use crate::time_windows::{meal_for_time_of_day, Meal, MealWindows};

/// Value of a day-plan field that was never set.
pub const UNSET: &str = "-";
/// Segment name of a self-driving leg.
pub const SELF_DRIVING_SEGMENT: &str = "self-driving";
/// Segment name of a taxi leg.
pub const TAXI_SEGMENT: &str = "taxi";

// ---- solution document ----

/// Solver output: one route per day, in day order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolutionDocument {
    pub routes: Vec<Vec<RouteSegment>>,
}

/// One solved segment of a route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    /// Point-of-interest name; absent for pure travel.
    #[serde(default)]
    pub name: Option<String>,
    /// Admissible start times (seconds); the first one is used.
    #[serde(default)]
    pub start_time_range: Vec<f64>,
    #[serde(default)]
    pub start_location: Option<LocationRef>,
    #[serde(default)]
    pub end_location: Option<LocationRef>,
}

/// Identifier of a solved location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationKey {
    Text(String),
    Number(i64),
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationKey::Text(s) => f.write_str(s),
            LocationKey::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A location object as emitted by the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedLocation {
    #[serde(rename = "@id")]
    pub id: LocationKey,
    #[serde(default)]
    pub name: Option<String>,
    /// Remaining solver attributes (coordinates, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Either an inline location or a back-reference to one seen earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationRef {
    Inline(SolvedLocation),
    Reference(LocationKey),
}

// ---- classification ----

/// Category of a named segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoiCategory {
    Attraction,
    Restaurant,
    Accommodation,
    Flight,
    SelfDriving,
    Taxi,
}

impl PoiCategory {
    fn of(info_type: InfoType) -> Option<Self> {
        match info_type {
            InfoType::Attractions => Some(PoiCategory::Attraction),
            InfoType::Restaurants => Some(PoiCategory::Restaurant),
            InfoType::Accommodations => Some(PoiCategory::Accommodation),
            InfoType::Flight => Some(PoiCategory::Flight),
            InfoType::Other => None,
        }
    }

    /// Transportation label of a ground leg.
    fn ground_label(self) -> Option<&'static str> {
        match self {
            PoiCategory::SelfDriving => Some("Self-driving"),
            PoiCategory::Taxi => Some("Taxi"),
            _ => None,
        }
    }
}

/// Point-of-interest name → category.
///
/// Later tables override earlier ones; the two ground-transport segment
/// names always map to their own categories.
#[derive(Debug, Clone, Default)]
pub struct PoiIndex {
    categories: HashMap<String, PoiCategory>,
}

impl PoiIndex {
    /// Builds the index from a record's reference tables.
    pub fn from_record(record: &TripRecord) -> Result<Self> {
        let mut categories = HashMap::new();
        for block in &record.structured_ref_info {
            let Some(category) = PoiCategory::of(block.info_type) else {
                continue;
            };
            for name in block.names()? {
                categories.insert(name, category);
            }
        }
        categories.insert(SELF_DRIVING_SEGMENT.to_string(), PoiCategory::SelfDriving);
        categories.insert(TAXI_SEGMENT.to_string(), PoiCategory::Taxi);
        Ok(Self { categories })
    }

    /// Category of a segment name.
    pub fn category(&self, name: &str) -> Option<PoiCategory> {
        self.categories.get(name).copied()
    }

    /// Number of classified names.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

// ---- scan state ----

/// Locations seen so far, by id.
#[derive(Debug, Clone, Default)]
pub struct LocationCache {
    by_id: HashMap<LocationKey, SolvedLocation>,
}

impl LocationCache {
    /// Resolves a location, registering inline objects.
    ///
    /// # Errors
    /// `UnresolvedLocation` if a back-reference names an id never seen
    /// inline.
    pub fn resolve(&mut self, location: &LocationRef) -> Result<&SolvedLocation> {
        match location {
            LocationRef::Inline(solved) => match self.by_id.entry(solved.id.clone()) {
                Entry::Occupied(mut seen) => {
                    seen.insert(solved.clone());
                    Ok(seen.into_mut())
                }
                Entry::Vacant(slot) => Ok(slot.insert(solved.clone())),
            },
            LocationRef::Reference(key) => self
                .by_id
                .get(key)
                .ok_or_else(|| ItineraryError::UnresolvedLocation(key.to_string())),
        }
    }

    /// Cached location by id.
    pub fn get(&self, key: &LocationKey) -> Option<&SolvedLocation> {
        self.by_id.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// State carried from segment to segment and from day to day.
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    pub locations: LocationCache,
    /// Destination of the most recent ground-transport leg.
    pub previous_city: Option<String>,
}

// ---- day plan ----

/// One day of the decoded itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number.
    pub days: u32,
    pub current_city: String,
    pub transportation: String,
    pub breakfast: String,
    pub attraction: String,
    pub lunch: String,
    pub dinner: String,
    pub accommodation: String,
}

impl DayPlan {
    /// A day with every field unset.
    pub fn new(days: u32) -> Self {
        Self {
            days,
            current_city: UNSET.to_string(),
            transportation: UNSET.to_string(),
            breakfast: UNSET.to_string(),
            attraction: UNSET.to_string(),
            lunch: UNSET.to_string(),
            dinner: UNSET.to_string(),
            accommodation: UNSET.to_string(),
        }
    }

    fn meal_mut(&mut self, meal: Meal) -> &mut String {
        match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Dinner => &mut self.dinner,
        }
    }

    /// Records a meal unless one is already set. Returns whether it was
    /// recorded.
    pub fn set_meal(&mut self, meal: Meal, restaurant: &str) -> bool {
        let field = self.meal_mut(meal);
        if field != UNSET {
            return false;
        }
        *field = restaurant.to_string();
        true
    }

    /// Appends an attraction.
    pub fn add_attraction(&mut self, name: &str) {
        if self.attraction == UNSET {
            self.attraction = name.to_string();
        } else {
            self.attraction.push_str("; ");
            self.attraction.push_str(name);
        }
    }
}

// ---- decoder ----

/// Decodes solved routes into day plans.
#[derive(Debug, Clone, Default)]
pub struct SolutionDecoder {
    meals: MealWindows,
}

impl SolutionDecoder {
    /// Creates a decoder using the configured meal hours.
    pub fn new(config: &ItineraryConfig) -> Self {
        Self {
            meals: config.dining.meals(),
        }
    }

    /// Decodes a solution against the record it was encoded from.
    ///
    /// # Errors
    /// Fails if the record's reference tables lack their key column, or
    /// if a segment cannot be interpreted (unresolved location reference,
    /// transport leg without locations, restaurant without start time).
    pub fn decode(&self, solution: &SolutionDocument, record: &TripRecord) -> Result<Vec<DayPlan>> {
        let index = PoiIndex::from_record(record)?;
        self.decode_with_index(solution, &index)
    }

    /// Decodes a solution with a prebuilt index.
    pub fn decode_with_index(
        &self,
        solution: &SolutionDocument,
        index: &PoiIndex,
    ) -> Result<Vec<DayPlan>> {
        info!(
            event = "decode_start",
            routes = solution.routes.len(),
            known_pois = index.len()
        );

        let mut state = ScanState::default();
        let mut plans = Vec::with_capacity(solution.routes.len());
        for (day, route) in (1u32..).zip(&solution.routes) {
            let (plan, next) = self.decode_route(index, day, route, state)?;
            plans.push(plan);
            state = next;
        }

        info!(event = "decode_end", days = plans.len(), locations = state.locations.len());
        Ok(plans)
    }

    /// Decodes one day's route.
    ///
    /// A day without a ground-transport leg inherits the destination of
    /// the most recent earlier leg as its current city.
    pub fn decode_route(
        &self,
        index: &PoiIndex,
        day: u32,
        route: &[RouteSegment],
        state: ScanState,
    ) -> Result<(DayPlan, ScanState)> {
        let mut plan = DayPlan::new(day);
        let last = route.len().saturating_sub(1);

        let state = route
            .iter()
            .enumerate()
            .try_fold(state, |state, (position, segment)| {
                self.apply_segment(index, &mut plan, segment, position == last, state)
            })?;

        if plan.current_city == UNSET {
            if let Some(city) = &state.previous_city {
                plan.current_city = city.clone();
            }
        }

        debug!(
            event = "day_decoded",
            day,
            segments = route.len(),
            current_city = %plan.current_city,
            transportation = %plan.transportation
        );
        Ok((plan, state))
    }

    /// Folds one segment into the day plan.
    pub fn apply_segment(
        &self,
        index: &PoiIndex,
        plan: &mut DayPlan,
        segment: &RouteSegment,
        is_last: bool,
        mut state: ScanState,
    ) -> Result<ScanState> {
        let classified = segment
            .name
            .as_deref()
            .and_then(|name| index.category(name).map(|category| (name, category)));

        let Some((name, category)) = classified else {
            for location in [&segment.start_location, &segment.end_location]
                .into_iter()
                .flatten()
            {
                state.locations.resolve(location)?;
            }
            return Ok(state);
        };

        match category {
            PoiCategory::Restaurant => {
                let start = segment
                    .start_time_range
                    .first()
                    .copied()
                    .ok_or_else(|| ItineraryError::MissingStartTime(name.to_string()))?;
                match meal_for_time_of_day(start, &self.meals) {
                    Some(meal) => {
                        plan.set_meal(meal, name);
                    }
                    None => warn!(
                        event = "meal_outside_windows",
                        restaurant = %name,
                        start,
                        "restaurant visit outside every meal window"
                    ),
                }
            }
            PoiCategory::Attraction => plan.add_attraction(name),
            PoiCategory::Accommodation => {
                if is_last {
                    plan.accommodation = name.to_string();
                }
            }
            PoiCategory::Flight => plan.transportation = name.to_string(),
            PoiCategory::SelfDriving | PoiCategory::Taxi => {
                let from = city_name(&mut state.locations, name, "start", &segment.start_location)?;
                let to = city_name(&mut state.locations, name, "end", &segment.end_location)?;
                if let Some(label) = category.ground_label() {
                    plan.transportation = label.to_string();
                }
                plan.current_city = format!("from {from} to {to}");
                state.previous_city = Some(to);
            }
        }
        Ok(state)
    }
}

/// Decodes a solution with the default meal hours.
pub fn decode(solution: &SolutionDocument, record: &TripRecord) -> Result<Vec<DayPlan>> {
    SolutionDecoder::default().decode(solution, record)
}

fn city_name(
    locations: &mut LocationCache,
    segment: &str,
    side: &'static str,
    location: &Option<LocationRef>,
) -> Result<String> {
    let location = location.as_ref().ok_or_else(|| ItineraryError::MissingLocation {
        segment: segment.to_string(),
        side,
    })?;
    let solved = locations.resolve(location)?;
    solved
        .name
        .clone()
        .ok_or_else(|| ItineraryError::UnnamedLocation(solved.id.to_string()))
}

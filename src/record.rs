//! Trip dataset records.
//!
//! A record describes one trip request: its length, dates, origin and
//! destination, and reference tables of candidate points of interest.
//! Reference tables arrive column-major, each column keyed by stringified
//! row index (`{"Name": {"0": "Park", "1": "Museum"}}`). The typed views
//! here turn them into ordered per-POI records so downstream code never
//! aligns parallel columns by hand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ItineraryError, Result};

/// Calendar format of trip dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One trip request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    /// Trip length in days.
    pub days: u32,
    /// Trip dates, `YYYY-MM-DD`. The first one anchors the trip.
    pub date: Vec<String>,
    /// Origin city.
    pub org: String,
    /// Destination city.
    pub dest: String,
    /// Reference tables.
    #[serde(default)]
    pub structured_ref_info: Vec<InfoBlock>,
}

/// Kind of reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfoType {
    Attractions,
    Restaurants,
    Accommodations,
    Flight,
    /// Tables not used for encoding (e.g. driving distances).
    #[serde(other)]
    Other,
}

impl InfoType {
    fn label(self) -> &'static str {
        match self {
            InfoType::Attractions => "Attractions",
            InfoType::Restaurants => "Restaurants",
            InfoType::Accommodations => "Accommodations",
            InfoType::Flight => "Flight",
            InfoType::Other => "Other",
        }
    }
}

/// One column-major reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoBlock {
    #[serde(rename = "Info Type")]
    pub info_type: InfoType,
    /// Row count.
    #[serde(rename = "Number", default)]
    pub number: usize,
    /// Column name → (row index → cell).
    #[serde(rename = "Structured Content", default)]
    pub content: Value,
}

/// An attraction candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
}

/// A restaurant candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    /// Aggregate rating (typically 0–5).
    pub rating: f64,
    pub average_cost: Option<f64>,
    pub cuisines: Option<String>,
    pub city: Option<String>,
}

/// An accommodation candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub name: String,
    pub price: Option<f64>,
    pub room_type: Option<String>,
    pub city: Option<String>,
}

/// A flight candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Flight number, e.g. `F3573659`.
    pub number: String,
    pub price: Option<f64>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
}

impl TripRecord {
    /// Parses every trip date.
    ///
    /// Fails on the first date that is not `YYYY-MM-DD`.
    pub fn parsed_dates(&self) -> Result<Vec<NaiveDate>> {
        self.date
            .iter()
            .map(|value| {
                NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| {
                    ItineraryError::DateParse {
                        value: value.clone(),
                        source,
                    }
                })
            })
            .collect()
    }

    /// Tables of one kind, in record order.
    pub fn blocks(&self, info_type: InfoType) -> impl Iterator<Item = &InfoBlock> {
        self.structured_ref_info
            .iter()
            .filter(move |b| b.info_type == info_type)
    }

    /// All attraction candidates.
    pub fn attractions(&self) -> Result<Vec<Attraction>> {
        collect_rows(self.blocks(InfoType::Attractions), InfoBlock::attractions)
    }

    /// All restaurant candidates.
    pub fn restaurants(&self) -> Result<Vec<Restaurant>> {
        collect_rows(self.blocks(InfoType::Restaurants), InfoBlock::restaurants)
    }

    /// All accommodation candidates.
    pub fn accommodations(&self) -> Result<Vec<Accommodation>> {
        collect_rows(
            self.blocks(InfoType::Accommodations),
            InfoBlock::accommodations,
        )
    }

    /// All flight candidates.
    pub fn flights(&self) -> Result<Vec<Flight>> {
        collect_rows(self.blocks(InfoType::Flight), InfoBlock::flights)
    }
}

fn collect_rows<'a, T>(
    blocks: impl Iterator<Item = &'a InfoBlock>,
    rows: fn(&InfoBlock) -> Result<Vec<T>>,
) -> Result<Vec<T>> {
    let mut all = Vec::new();
    for block in blocks {
        all.extend(rows(block)?);
    }
    Ok(all)
}

impl InfoBlock {
    /// Attraction rows.
    pub fn attractions(&self) -> Result<Vec<Attraction>> {
        (0..self.number)
            .map(|i| {
                Ok(Attraction {
                    name: self.text("Name", i)?,
                    latitude: self.numeric("Latitude", i)?,
                    longitude: self.numeric("Longitude", i)?,
                    address: self.optional_text("Address", i),
                    phone: self.optional_text("Phone", i),
                    website: self.optional_text("Website", i),
                    city: self.optional_text("City", i),
                })
            })
            .collect()
    }

    /// Restaurant rows.
    pub fn restaurants(&self) -> Result<Vec<Restaurant>> {
        (0..self.number)
            .map(|i| {
                Ok(Restaurant {
                    name: self.text("Name", i)?,
                    rating: self.numeric("Aggregate Rating", i)?,
                    average_cost: self.optional_number("Average Cost", i),
                    cuisines: self.optional_text("Cuisines", i),
                    city: self.optional_text("City", i),
                })
            })
            .collect()
    }

    /// Accommodation rows.
    pub fn accommodations(&self) -> Result<Vec<Accommodation>> {
        (0..self.number)
            .map(|i| {
                Ok(Accommodation {
                    name: self.text("NAME", i)?,
                    price: self.optional_number("price", i),
                    room_type: self.optional_text("room type", i),
                    city: self.optional_text("city", i),
                })
            })
            .collect()
    }

    /// Flight rows.
    pub fn flights(&self) -> Result<Vec<Flight>> {
        (0..self.number)
            .map(|i| {
                Ok(Flight {
                    number: self.text("Flight Number", i)?,
                    price: self.optional_number("Price", i),
                    departure_time: self.optional_text("DepTime", i),
                    arrival_time: self.optional_text("ArrTime", i),
                    origin_city: self.optional_text("OriginCityName", i),
                    destination_city: self.optional_text("DestCityName", i),
                })
            })
            .collect()
    }

    /// Column naming each row, if the table kind has one.
    pub fn key_field(&self) -> Option<&'static str> {
        match self.info_type {
            InfoType::Attractions | InfoType::Restaurants => Some("Name"),
            InfoType::Accommodations => Some("NAME"),
            InfoType::Flight => Some("Flight Number"),
            InfoType::Other => None,
        }
    }

    /// Row names (flight numbers for flights), without reading any other
    /// column.
    pub fn names(&self) -> Result<Vec<String>> {
        let Some(field) = self.key_field() else {
            return Ok(Vec::new());
        };
        (0..self.number).map(|i| self.text(field, i)).collect()
    }

    // ---- cell access ----

    fn missing(&self, field: &str, index: Option<usize>) -> ItineraryError {
        ItineraryError::MissingField {
            info_type: self.info_type.label().to_string(),
            field: field.to_string(),
            index,
        }
    }

    fn invalid(&self, field: &str, index: usize, expected: &'static str) -> ItineraryError {
        ItineraryError::InvalidField {
            info_type: self.info_type.label().to_string(),
            field: field.to_string(),
            index: Some(index),
            expected,
        }
    }

    fn cell(&self, field: &str, index: usize) -> Option<&Value> {
        self.content.get(field)?.get(index.to_string())
    }

    fn required(&self, field: &str, index: usize) -> Result<&Value> {
        if self.content.get(field).is_none() {
            return Err(self.missing(field, None));
        }
        self.cell(field, index)
            .ok_or_else(|| self.missing(field, Some(index)))
    }

    fn text(&self, field: &str, index: usize) -> Result<String> {
        match self.required(field, index)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(self.invalid(field, index, "a string")),
        }
    }

    fn numeric(&self, field: &str, index: usize) -> Result<f64> {
        as_number(self.required(field, index)?)
            .ok_or_else(|| self.invalid(field, index, "a number"))
    }

    fn optional_text(&self, field: &str, index: usize) -> Option<String> {
        match self.cell(field, index)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn optional_number(&self, field: &str, index: usize) -> Option<f64> {
        self.cell(field, index).and_then(as_number)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

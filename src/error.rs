//! Error types for u-itinerary

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for encoding and decoding operations
#[derive(Debug, Error)]
pub enum ItineraryError {
    /// A trip date does not match `YYYY-MM-DD`
    #[error("Invalid date '{value}': {source}")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The record lists no dates, so the trip has no anchor
    #[error("Trip record has no dates")]
    EmptyDates,

    /// The trip end lies beyond the representable calendar
    #[error("Trip of {days} days cannot be represented on the calendar")]
    TripTooLong { days: u32 },

    /// A window on this date lies beyond the representable calendar
    #[error("Time window on {date} cannot be represented on the calendar")]
    DateOutOfRange { date: NaiveDate },

    /// A structured-content column or cell is missing
    #[error("{info_type}: missing field '{field}'{}", at_index(.index))]
    MissingField {
        info_type: String,
        field: String,
        index: Option<usize>,
    },

    /// A structured-content cell has the wrong type
    #[error("{info_type}: field '{field}'{} is not {expected}", at_index(.index))]
    InvalidField {
        info_type: String,
        field: String,
        index: Option<usize>,
        expected: &'static str,
    },

    /// A segment refers to a location id never seen inline
    #[error("Unresolved location reference '{0}'")]
    UnresolvedLocation(String),

    /// A transportation segment lacks a start or end location
    #[error("Segment '{segment}' has no {side} location")]
    MissingLocation {
        segment: String,
        side: &'static str,
    },

    /// A resolved location has no display name
    #[error("Location '{0}' has no name")]
    UnnamedLocation(String),

    /// A restaurant segment has an empty start-time range
    #[error("Segment '{0}' has no start time")]
    MissingStartTime(String),
}

fn at_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

/// Result type alias for u-itinerary operations
pub type Result<T> = std::result::Result<T, ItineraryError>;

//! Encoding configuration.
//!
//! Activity and dining constants, meal hours and coordinate handling can
//! be loaded from TOML so trips can be re-encoded without code changes.
//! Every field has a default; a missing file or section falls back to it.
//!
//! # Examples
//!
//! ```
//! use u_itinerary::config::ItineraryConfig;
//!
//! let config = ItineraryConfig::from_toml_str(r#"
//!     [activity]
//!     utility = 75.0
//!
//!     [dining.lunch]
//!     start_secs = 41400
//!     end_secs = 50400
//! "#).unwrap();
//!
//! assert_eq!(config.activity.utility, 75.0);
//! assert_eq!(config.activity.duration_secs, 3600);
//! assert_eq!(config.dining.meals().lunch.start_secs, 41400);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time_windows::{DayWindow, MealWindows};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main encoding configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ItineraryConfig {
    /// Attraction visits.
    pub activity: ActivityConfig,
    /// Restaurant visits and meal hours.
    pub dining: DiningConfig,
    /// Coordinate handling.
    pub geo: GeoConfig,
}

impl ItineraryConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file is unreadable, is not valid TOML, or
    /// describes inconsistent windows or durations.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every window is well formed and durations are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("activity.window", self.activity.window),
            ("dining.breakfast", self.dining.breakfast),
            ("dining.lunch", self.dining.lunch),
            ("dining.dinner", self.dining.dinner),
        ];
        for (name, window) in windows {
            if !window.is_well_formed() {
                return Err(ConfigError::Invalid(format!(
                    "{name} starts at {} but ends at {}",
                    window.start_secs, window.end_secs
                )));
            }
        }
        if self.activity.duration_secs <= 0 {
            return Err(ConfigError::Invalid(
                "activity.duration_secs must be positive".into(),
            ));
        }
        if self.dining.duration_secs <= 0 {
            return Err(ConfigError::Invalid(
                "dining.duration_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Sets whether real coordinates are used.
    pub fn with_real_coordinates(mut self, enabled: bool) -> Self {
        self.geo.use_real_coordinates = enabled;
        self
    }
}

/// Attraction visit settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Fixed visit length (seconds).
    pub duration_secs: i64,
    /// Flat utility of visiting any attraction.
    pub utility: f64,
    /// Daily opening hours.
    pub window: DayWindow,
    /// Goal priority.
    pub priority: f64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60 * 60,
            utility: 50.0,
            window: DayWindow::hours(9, 18),
            priority: 100.0,
        }
    }
}

/// Restaurant visit settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiningConfig {
    /// Fixed meal length (seconds).
    pub duration_secs: i64,
    /// Utility per rating point.
    pub rating_scale: f64,
    /// Goal priority.
    pub priority: f64,
    pub breakfast: DayWindow,
    pub lunch: DayWindow,
    pub dinner: DayWindow,
}

impl DiningConfig {
    /// Meal hours as one table.
    pub fn meals(&self) -> MealWindows {
        MealWindows {
            breakfast: self.breakfast,
            lunch: self.lunch,
            dinner: self.dinner,
        }
    }
}

impl Default for DiningConfig {
    fn default() -> Self {
        let meals = MealWindows::default();
        Self {
            duration_secs: 60 * 60,
            rating_scale: 10.0,
            priority: 100.0,
            breakfast: meals.breakfast,
            lunch: meals.lunch,
            dinner: meals.dinner,
        }
    }
}

/// Coordinate handling.
///
/// Without geocoding every location sits at the placeholder point and
/// travel between points of interest is free.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoConfig {
    pub use_real_coordinates: bool,
    pub placeholder_lat: f64,
    pub placeholder_lon: f64,
    /// Origin coordinates used with real coordinates.
    pub origin_lat: f64,
    pub origin_lon: f64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            use_real_coordinates: false,
            placeholder_lat: 0.0,
            placeholder_lon: 0.0,
            origin_lat: 42.2773242,
            origin_lon: -89.08814249,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ItineraryConfig::default();
        assert_eq!(config.activity.duration_secs, 3600);
        assert_eq!(config.activity.window, DayWindow::hours(9, 18));
        assert_eq!(config.dining.rating_scale, 10.0);
        assert_eq!(config.dining.meals(), MealWindows::default());
        assert!(!config.geo.use_real_coordinates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = ItineraryConfig::from_toml_str(
            r#"
            [dining]
            rating_scale = 20.0

            [geo]
            use_real_coordinates = true
            "#,
        )
        .unwrap();

        assert_eq!(config.dining.rating_scale, 20.0);
        assert_eq!(config.dining.duration_secs, 3600);
        assert!(config.geo.use_real_coordinates);
        assert_eq!(config.geo.origin_lat, 42.2773242);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ItineraryConfig::from_toml_str("").unwrap();
        assert_eq!(config, ItineraryConfig::default());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = ItineraryConfig::from_toml_str(
            r#"
            [dining.dinner]
            start_secs = 72000
            end_secs = 64800
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("dining.dinner")));
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let err = ItineraryConfig::from_toml_str("[activity]\nduration_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = ItineraryConfig::from_toml_str("[activity\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ItineraryConfig::load("/nonexistent/itinerary.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

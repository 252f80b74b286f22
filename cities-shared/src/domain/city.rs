use serde::{Deserialize, Serialize};

use super::error::DomainError;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// The six cities offers can be published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

impl City {
    pub const ALL: [City; 6] = [
        City::Paris,
        City::Cologne,
        City::Brussels,
        City::Amsterdam,
        City::Hamburg,
        City::Dusseldorf,
    ];

    /// Parses the display name used in TSV rows and stored documents.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Paris" => Some(City::Paris),
            "Cologne" => Some(City::Cologne),
            "Brussels" => Some(City::Brussels),
            "Amsterdam" => Some(City::Amsterdam),
            "Hamburg" => Some(City::Hamburg),
            "Dusseldorf" => Some(City::Dusseldorf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            City::Paris => "Paris",
            City::Cologne => "Cologne",
            City::Brussels => "Brussels",
            City::Amsterdam => "Amsterdam",
            City::Hamburg => "Hamburg",
            City::Dusseldorf => "Dusseldorf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(DomainError::Validation {
                field: "latitude",
                message: "must be within -90..90",
            });
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(DomainError::Validation {
                field: "longitude",
                message: "must be within -180..180",
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{City, Location};

    #[test]
    fn city_parse_accepts_display_names_only() {
        assert_eq!(City::parse("Paris"), Some(City::Paris));
        assert_eq!(City::parse("Dusseldorf"), Some(City::Dusseldorf));
        assert_eq!(City::parse("paris"), None);
        assert_eq!(City::parse("Moscow"), None);
    }

    #[test]
    fn city_round_trips_through_as_str() {
        for city in City::ALL {
            assert_eq!(City::parse(city.as_str()), Some(city));
        }
    }

    #[test]
    fn location_new_checks_bounds() {
        assert!(Location::new(48.85661, 2.351499).is_ok());
        assert!(Location::new(90.0, 180.0).is_ok());
        assert!(Location::new(90.5, 0.0).is_err());
        assert!(Location::new(0.0, -180.5).is_err());
    }
}

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// A "part" of a coordinate
pub type CoordinateComponent = f64;

const LAT_RANGE: std::ops::RangeInclusive<CoordinateComponent> = -90.0..=90.0;
const LNG_RANGE: std::ops::RangeInclusive<CoordinateComponent> = -180.0..=180.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidCoordinate {
    #[error("Latitude {0} is outside of [-90, 90]")]
    Latitude(CoordinateComponent),
    #[error("Longitude {0} is outside of [-180, 180]")]
    Longitude(CoordinateComponent),
    #[error("Expected \"<lat>,<lng>\", got \"{0}\"")]
    Format(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
/// Some point in the world, usually as resolved by a geocoding service
pub struct Coordinate {
    /// Latitude in degrees
    lat: CoordinateComponent,
    /// Longitude in degrees
    lng: CoordinateComponent,
}

impl Coordinate {
    pub fn new(
        lat: CoordinateComponent,
        lng: CoordinateComponent,
    ) -> Result<Self, InvalidCoordinate> {
        // `contains` is false for NaN, so non-finite components are rejected here too
        if !LAT_RANGE.contains(&lat) {
            return Err(InvalidCoordinate::Latitude(lat));
        }
        if !LNG_RANGE.contains(&lng) {
            return Err(InvalidCoordinate::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> CoordinateComponent {
        self.lat
    }

    pub fn lng(&self) -> CoordinateComponent {
        self.lng
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = InvalidCoordinate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || InvalidCoordinate::Format(s.to_string());
        let (lat, lng) = s.split_once(',').ok_or_else(format_err)?;
        let lat = lat.trim().parse().map_err(|_| format_err())?;
        let lng = lng.trim().parse().map_err(|_| format_err())?;
        Self::new(lat, lng)
    }
}

use std::fmt;

use serde::Serialize;

use crate::{compass::InvalidBearing, location::Coordinate};

/// Degrees in a full turn of the compass
pub const FULL_CIRCLE: f64 = 360.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, PartialOrd)]
/// Initial bearing (forward azimuth) in degrees clockwise from true north, always within [0, 360)
pub struct Bearing(f64);

impl Bearing {
    pub const NORTH: Self = Self(0.0);

    /// Normalize an arbitrary finite angle into [0, 360)
    pub fn from_degrees(degrees: f64) -> Result<Self, InvalidBearing> {
        if degrees.is_finite() {
            Ok(Self::normalize(degrees))
        } else {
            Err(InvalidBearing(degrees))
        }
    }

    fn normalize(degrees: f64) -> Self {
        if (0.0..FULL_CIRCLE).contains(&degrees) {
            Self(degrees)
        } else {
            // Double modulo as `%` keeps the sign of the dividend
            Self(((degrees % FULL_CIRCLE) + FULL_CIRCLE) % FULL_CIRCLE)
        }
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// What to report when there's no direction to speak of, the two points are the same or one of
/// them is missing
pub enum ZeroDistancePolicy {
    /// Report a bearing of 0, which maps to North
    #[default]
    DueNorth,
    /// Report no bearing at all
    Undefined,
}

impl ZeroDistancePolicy {
    pub fn fallback(&self) -> Option<Bearing> {
        match self {
            Self::DueNorth => Some(Bearing::NORTH),
            Self::Undefined => None,
        }
    }
}

/// Computes bearings between coordinates, applying a [ZeroDistancePolicy] to degenerate input
#[derive(Debug, Clone, Copy, Default)]
pub struct BearingCalculator {
    policy: ZeroDistancePolicy,
}

impl BearingCalculator {
    pub fn new(policy: ZeroDistancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ZeroDistancePolicy {
        self.policy
    }

    pub fn bearing(&self, start: Option<&Coordinate>, end: Option<&Coordinate>) -> Option<Bearing> {
        match (start, end) {
            (Some(start), Some(end)) if start != end => Some(forward_azimuth(start, end)),
            _ => self.policy.fallback(),
        }
    }
}

/// Bearing from `start` to `end` using the default [ZeroDistancePolicy::DueNorth], identical
/// points give 0
pub fn bearing(start: &Coordinate, end: &Coordinate) -> Bearing {
    if start == end {
        Bearing::NORTH
    } else {
        forward_azimuth(start, end)
    }
}

/// Great-circle initial bearing, see <https://www.movable-type.co.uk/scripts/latlong.html>
fn forward_azimuth(start: &Coordinate, end: &Coordinate) -> Bearing {
    let start_lat = start.lat().to_radians();
    let end_lat = end.lat().to_radians();
    let delta_lng = (end.lng() - start.lng()).to_radians();

    let y = delta_lng.sin() * end_lat.cos();
    let x = start_lat.cos() * end_lat.sin() - start_lat.sin() * end_lat.cos() * delta_lng.cos();

    // Coordinates are validated as finite, so atan2 is too
    Bearing::normalize(y.atan2(x).to_degrees())
}

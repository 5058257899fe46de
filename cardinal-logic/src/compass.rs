use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bearing::Bearing;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Bearing of {0} degrees is outside of [0, 360)")]
pub struct InvalidBearing(pub f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// One of the eight cardinal and intercardinal points of the compass
pub enum CompassDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassDirection {
    /// All directions, clockwise from North
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::North => "North",
            Self::NorthEast => "NorthEast",
            Self::East => "East",
            Self::SouthEast => "SouthEast",
            Self::South => "South",
            Self::SouthWest => "SouthWest",
            Self::West => "West",
            Self::NorthWest => "NorthWest",
        }
    }

    /// Position on the rose, clockwise from North
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn opposite(&self) -> Self {
        Self::ALL[(self.index() + 4) % Self::ALL.len()]
    }

    /// Look up the sector a whole degree value falls in, sectors are half-open `[min, max)`
    fn from_whole_degrees(degrees: u16) -> Option<Self> {
        let dir = match degrees {
            0..23 => Self::North,
            23..67 => Self::NorthEast,
            67..112 => Self::East,
            112..157 => Self::SouthEast,
            157..202 => Self::South,
            202..247 => Self::SouthWest,
            247..292 => Self::West,
            292..337 => Self::NorthWest,
            337..360 => Self::North,
            _ => return None,
        };
        Some(dir)
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Bearing> for CompassDirection {
    fn from(bearing: Bearing) -> Self {
        to_direction(bearing.degrees())
    }
}

/// Strictly map degrees to a direction.
///
/// The value is truncated toward zero *before* the sector lookup, not rounded. 22.9 is North
/// and 291.9 is West. Existing callers depend on exactly these boundaries, so keep it that way.
pub fn try_to_direction(degrees: f64) -> Result<CompassDirection, InvalidBearing> {
    let whole = degrees.trunc();
    if !(0.0..360.0).contains(&whole) {
        return Err(InvalidBearing(degrees));
    }
    CompassDirection::from_whole_degrees(whole as u16).ok_or(InvalidBearing(degrees))
}

/// Map degrees to a direction, out of range values are re-normalized into [0, 360) first.
///
/// Non-finite input can't be normalized and falls back to North.
pub fn to_direction(degrees: f64) -> CompassDirection {
    try_to_direction(degrees).unwrap_or_else(|why| {
        warn!("{why}, re-normalizing");
        Bearing::from_degrees(degrees)
            .ok()
            .and_then(|bearing| try_to_direction(bearing.degrees()).ok())
            .unwrap_or(CompassDirection::North)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use CompassDirection::*;

    const SECTOR_MINIMUMS: [(u16, CompassDirection); 8] = [
        (23, NorthEast),
        (67, East),
        (112, SouthEast),
        (157, South),
        (202, SouthWest),
        (247, West),
        (292, NorthWest),
        (337, North),
    ];

    #[test]
    fn sector_minimum_is_inclusive() {
        let mut previous = North;
        for (min, dir) in SECTOR_MINIMUMS {
            assert_eq!(to_direction(f64::from(min)), dir, "{min}");
            assert_eq!(to_direction(f64::from(min - 1)), previous, "{}", min - 1);
            previous = dir;
        }
        assert_eq!(to_direction(0.0), North);
        assert_eq!(to_direction(359.0), North);
    }

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(to_direction(22.999), North);
        assert_eq!(to_direction(66.9), NorthEast);
        assert_eq!(to_direction(291.883), West);
        assert_eq!(to_direction(336.99), NorthWest);
        assert_eq!(to_direction(359.999), North);
    }

    #[test]
    fn total_over_whole_degrees() {
        for deg in 0..360 {
            assert!(try_to_direction(f64::from(deg)).is_ok(), "{deg}");
        }
    }

    #[test]
    fn sectors_are_contiguous() {
        let mut changes = 0;
        for deg in 1..360 {
            let prev = try_to_direction(f64::from(deg - 1)).unwrap();
            let cur = try_to_direction(f64::from(deg)).unwrap();
            if prev != cur {
                assert_eq!(cur.index(), (prev.index() + 1) % 8, "{deg}");
                changes += 1;
            }
        }
        // The wrap at 360/0 stays in North
        assert_eq!(changes, 8);
    }

    #[test]
    fn strict_rejects_out_of_range() {
        assert_eq!(try_to_direction(360.0), Err(InvalidBearing(360.0)));
        assert_eq!(try_to_direction(-1.0), Err(InvalidBearing(-1.0)));
        assert!(try_to_direction(f64::NAN).is_err());
        // Truncation toward zero keeps small negatives in range
        assert_eq!(try_to_direction(-0.5), Ok(North));
    }

    #[test]
    fn lenient_renormalizes() {
        assert_eq!(to_direction(-90.0), West);
        assert_eq!(to_direction(405.0), NorthEast);
        assert_eq!(to_direction(-23.5), NorthWest);
        assert_eq!(to_direction(f64::NAN), North);
    }

    #[test]
    fn opposites() {
        assert_eq!(North.opposite(), South);
        assert_eq!(NorthEast.opposite(), SouthWest);
        assert_eq!(West.opposite(), East);
        for dir in CompassDirection::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn labels_match_variant_names() {
        let labels = CompassDirection::ALL.map(|d| d.to_string());
        assert_eq!(
            labels,
            [
                "North",
                "NorthEast",
                "East",
                "SouthEast",
                "South",
                "SouthWest",
                "West",
                "NorthWest"
            ]
        );
    }
}

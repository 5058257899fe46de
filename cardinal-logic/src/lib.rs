mod bearing;
mod cache;
mod compass;
mod finder;
mod geocoder;
mod location;

pub use bearing::{Bearing, BearingCalculator, ZeroDistancePolicy, bearing};
pub use cache::CachedGeocoder;
pub use compass::{CompassDirection, InvalidBearing, to_direction, try_to_direction};
pub use finder::{DirectionFinder, DirectionReport};
pub use geocoder::{Geocoder, Lookup, LookupError};
pub use location::{Coordinate, CoordinateComponent, InvalidCoordinate};

pub mod prelude {
    use anyhow::Error as AnyhowError;
    use std::result::Result as StdResult;
    pub type Result<T = (), E = AnyhowError> = StdResult<T, E>;
    pub use anyhow::Context;
}

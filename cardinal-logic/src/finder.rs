use std::fmt;

use anyhow::bail;
use log::debug;
use serde::Serialize;

use crate::{
    bearing::{Bearing, BearingCalculator, ZeroDistancePolicy},
    compass::CompassDirection,
    geocoder::{Geocoder, Lookup},
    location::Coordinate,
    prelude::*,
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
/// Result of pointing from one coordinate to another
pub struct DirectionReport {
    pub from: Coordinate,
    pub to: Coordinate,
    /// `None` when the points coincide and the policy is [ZeroDistancePolicy::Undefined]
    pub bearing: Option<Bearing>,
    pub direction: Option<CompassDirection>,
}

impl DirectionReport {
    pub fn compute(calculator: &BearingCalculator, from: Coordinate, to: Coordinate) -> Self {
        let bearing = calculator.bearing(Some(&from), Some(&to));
        let direction = bearing.map(CompassDirection::from);

        match bearing {
            Some(bearing) => debug!("{from} -> {to}: {bearing} ({direction:?})"),
            None => debug!("{from} -> {to}: no bearing, points coincide"),
        }

        Self {
            from,
            to,
            bearing,
            direction,
        }
    }
}

impl fmt::Display for DirectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Some(direction) => write!(f, "{direction}"),
            None => f.write_str("Undefined"),
        }
    }
}

/// Resolves place names with a [Geocoder] and works out which way one lies from the other
pub struct DirectionFinder<G: Geocoder> {
    geocoder: G,
    calculator: BearingCalculator,
}

impl<G: Geocoder> DirectionFinder<G> {
    pub fn new(geocoder: G) -> Self {
        Self::with_policy(geocoder, ZeroDistancePolicy::default())
    }

    pub fn with_policy(geocoder: G, policy: ZeroDistancePolicy) -> Self {
        Self {
            geocoder,
            calculator: BearingCalculator::new(policy),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub async fn locate(&self, place_name: &str) -> Result<Coordinate> {
        let lookup = self
            .geocoder
            .lookup(place_name)
            .await
            .with_context(|| format!("Failed to look up \"{place_name}\""))?;

        match lookup {
            Lookup::Found(coord) => Ok(coord),
            Lookup::NotFound => bail!("No location found for \"{place_name}\""),
        }
    }

    pub async fn direction_between_places(&self, from: &str, to: &str) -> Result<DirectionReport> {
        let start = self.locate(from).await?;
        let end = self.locate(to).await?;
        Ok(self.direction_between(start, end))
    }

    pub fn direction_between(&self, from: Coordinate, to: Coordinate) -> DirectionReport {
        DirectionReport::compute(&self.calculator, from, to)
    }
}

use thiserror::Error;

use crate::location::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Outcome of resolving a place name
pub enum Lookup {
    /// The first match the service returned
    Found(Coordinate),
    /// The service knows of no such place
    NotFound,
}

impl Lookup {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Found(coord) => Some(*coord),
            Self::NotFound => None,
        }
    }
}

impl From<Option<Coordinate>> for Lookup {
    fn from(v: Option<Coordinate>) -> Self {
        v.map_or(Self::NotFound, Self::Found)
    }
}

/// Failure to get an answer out of the geocoding service at all
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request denied: {0}")]
    Auth(String),
    #[error("Quota exceeded: {0}")]
    Quota(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Bad response: {0}")]
    Response(String),
}

pub trait Geocoder: Send + Sync {
    /// Resolve a place name to a single coordinate
    fn lookup(
        &self,
        place_name: &str,
    ) -> impl std::future::Future<Output = Result<Lookup, LookupError>> + Send;
}

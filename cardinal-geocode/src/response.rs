use cardinal_logic::{Coordinate, Lookup, LookupError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Turn a geocoding API response body into a [Lookup].
///
/// When there are several results the first one wins.
pub fn parse_response(body: &[u8]) -> Result<Lookup, LookupError> {
    let resp: GeocodeResponse = serde_json::from_slice(body)
        .map_err(|e| LookupError::Response(format!("Failed to parse response: {e}")))?;

    let message = || resp.error_message.clone().unwrap_or_else(|| resp.status.clone());

    match resp.status.as_str() {
        "OK" => {
            let Some(first) = resp.results.first() else {
                return Ok(Lookup::NotFound);
            };
            let location = &first.geometry.location;
            Coordinate::new(location.lat, location.lng)
                .map(Lookup::Found)
                .map_err(|e| LookupError::Response(e.to_string()))
        }
        "ZERO_RESULTS" => Ok(Lookup::NotFound),
        "REQUEST_DENIED" => Err(LookupError::Auth(message())),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(LookupError::Quota(message())),
        "INVALID_REQUEST" => Err(LookupError::InvalidRequest(message())),
        other => Err(LookupError::Response(format!(
            "Unexpected status {other}: {}",
            message()
        ))),
    }
}

mod config;
mod google;
mod response;

pub use config::{API_KEY_VAR, GeocoderConfig};
pub use google::GoogleGeocoder;
pub use response::parse_response;

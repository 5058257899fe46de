use std::{env::VarError, fmt, time::Duration};

use anyhow::bail;
use cardinal_logic::prelude::*;

/// Environment variable holding the Google Maps API key
pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

const fn default_endpoint() -> &'static str {
    if let Some(endpoint) = option_env!("GEOCODE_ENDPOINT") {
        endpoint
    } else {
        "https://maps.googleapis.com/maps/api/geocode/json"
    }
}

const fn default_timeout_secs() -> u64 {
    if let Some(secs) = option_env!("GEOCODE_TIMEOUT_SECS") {
        const_str::parse!(secs, u64)
    } else {
        30
    }
}

const DEFAULT_ENDPOINT: &str = default_endpoint();
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(default_timeout_secs());

/// Settings for talking to the geocoding API
#[derive(Clone)]
pub struct GeocoderConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl GeocoderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the API key from [API_KEY_VAR], everything else is default
    pub fn from_env() -> Result<Self> {
        Self::from_key_var(std::env::var(API_KEY_VAR))
    }

    fn from_key_var(var: Result<String, VarError>) -> Result<Self> {
        let key = var.with_context(|| format!("{API_KEY_VAR} is not set"))?;
        if key.trim().is_empty() {
            bail!("{API_KEY_VAR} is empty");
        }
        Ok(Self::new(key.trim()))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for GeocoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocoderConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

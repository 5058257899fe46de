use std::{collections::HashMap, sync::Arc};

use log::debug;
use tokio::sync::{Mutex, OnceCell};

use crate::geocoder::{Geocoder, Lookup, LookupError};

type Entry = Arc<OnceCell<Lookup>>;

/// Memoizes lookups of an inner [Geocoder] by exact place name.
///
/// Both [Lookup::Found] and [Lookup::NotFound] are remembered. Only one request per place name
/// is ever in flight, concurrent callers wait on it. Errors aren't cached so the next call
/// retries.
pub struct CachedGeocoder<G: Geocoder> {
    inner: G,
    entries: Mutex<HashMap<String, Entry>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Number of place names with a settled answer
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|e| e.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn entry(&self, place_name: &str) -> Entry {
        let mut entries = self.entries.lock().await;
        entries.entry(place_name.to_string()).or_default().clone()
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn lookup(&self, place_name: &str) -> Result<Lookup, LookupError> {
        let entry = self.entry(place_name).await;

        if let Some(hit) = entry.get() {
            debug!("Cache hit for [{place_name}]");
            return Ok(*hit);
        }

        entry
            .get_or_try_init(|| self.inner.lookup(place_name))
            .await
            .copied()
    }
}

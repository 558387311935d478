//! External place lookup
//!
//! The pipeline depends on two capabilities it does not implement itself:
//! geocoding a free-text address and searching for nearby points of
//! interest. Both are slow, rate-limited network calls behind the
//! `PlaceLookup` trait, with two implementations:
//!
//! - `GoogleMaps`: live Geocoding + Places (Nearby Search) client
//! - `StaticPlaceLookup`: deterministic in-memory lookup for tests

pub mod fake;
pub mod google;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::Coordinates;

pub use fake::StaticPlaceLookup;
pub use google::GoogleMaps;

/// A point of interest as retrieved from the upstream provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// Geocoding and nearby-search capabilities
///
/// Upstream results carry no ordering or completeness guarantee beyond
/// best-effort nearby matches for the given keywords. Implementations must
/// deduplicate by `(name, address)` and return an empty list, not an error,
/// when nothing matches.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    /// Resolve a free-text address to coordinates
    async fn geocode(&self, address: &str) -> Result<Coordinates>;

    /// Find places matching any of the keywords within `radius_km` of `center`
    async fn search_nearby(
        &self,
        center: Coordinates,
        radius_km: f64,
        keywords: &[&str],
    ) -> Result<Vec<PlaceRecord>>;
}

/// Deduplicate places by `(name, address)`, preserving first-seen order
///
/// Later duplicates overwrite earlier ones (last-write-wins), which keeps
/// the merge of concurrent keyword searches deterministic for a given
/// input order.
pub fn dedupe_places(places: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    use std::collections::HashMap;

    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut deduped: Vec<PlaceRecord> = Vec::with_capacity(places.len());

    for place in places {
        let key = (place.name.clone(), place.address.clone());
        match index.get(&key) {
            Some(&i) => deduped[i] = place,
            None => {
                index.insert(key, deduped.len());
                deduped.push(place);
            }
        }
    }

    deduped
}

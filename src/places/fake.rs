//! Deterministic in-memory place lookup
//!
//! Stands in for the live Google client so the pipeline and HTTP layer can
//! be tested without network access. Geocoding resolves every address to a
//! fixed center (or fails when configured to), and nearby search filters a
//! fixed place list by actual haversine distance.

use async_trait::async_trait;

use crate::error::{KippoError, Result};
use crate::geo::{self, Coordinates};
use crate::places::{dedupe_places, PlaceLookup, PlaceRecord};

/// In-memory `PlaceLookup` with a fixed center and place list
pub struct StaticPlaceLookup {
    center: Option<Coordinates>,
    places: Vec<PlaceRecord>,
}

impl StaticPlaceLookup {
    /// Lookup that geocodes every address to `center` and serves `places`
    pub fn new(center: Coordinates, places: Vec<PlaceRecord>) -> Self {
        Self {
            center: Some(center),
            places,
        }
    }

    /// Lookup whose geocoding always fails
    pub fn failing() -> Self {
        Self {
            center: None,
            places: Vec::new(),
        }
    }
}

#[async_trait]
impl PlaceLookup for StaticPlaceLookup {
    async fn geocode(&self, address: &str) -> Result<Coordinates> {
        self.center.ok_or_else(|| {
            KippoError::lookup_failed(format!("Geocoding failed for address: {}", address))
        })
    }

    async fn search_nearby(
        &self,
        center: Coordinates,
        radius_km: f64,
        _keywords: &[&str],
    ) -> Result<Vec<PlaceRecord>> {
        let within = self
            .places
            .iter()
            .filter(|place| {
                let target = Coordinates {
                    lat: place.lat,
                    lng: place.lng,
                };
                geo::distance_km(center, target) <= radius_km
            })
            .cloned()
            .collect();
        Ok(dedupe_places(within))
    }
}

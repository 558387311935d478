//! Google Maps client
//!
//! Live `PlaceLookup` implementation backed by the Geocoding API and the
//! Places Nearby Search API. Responses are requested in Japanese to match
//! the shrine/temple keywords.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::debug;

use crate::error::{KippoError, Result};
use crate::geo::Coordinates;
use crate::places::{dedupe_places, PlaceLookup, PlaceRecord};

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// Google Maps Geocoding + Places client
pub struct GoogleMaps {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    name: String,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

impl GoogleMaps {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Run a single Nearby Search for one keyword
    async fn search_keyword(
        &self,
        center: Coordinates,
        radius_meters: f64,
        keyword: &str,
    ) -> Result<Vec<PlaceRecord>> {
        let response = self
            .client
            .get(NEARBY_SEARCH_URL)
            .query(&[
                ("location", format!("{},{}", center.lat, center.lng)),
                ("radius", radius_meters.to_string()),
                ("keyword", keyword.to_string()),
                ("key", self.api_key.clone()),
                ("language", "ja".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(KippoError::lookup_failed(format!(
                "Places API request failed: {}",
                response.status()
            )));
        }

        let body: NearbyResponse = response.json().await?;

        if body.status != "OK" && body.status != "ZERO_RESULTS" {
            return Err(KippoError::lookup_failed(format!(
                "Places API failed: {} - {}",
                body.status,
                body.error_message.as_deref().unwrap_or("Unknown error")
            )));
        }

        debug!(keyword, count = body.results.len(), "nearby search done");

        Ok(body
            .results
            .into_iter()
            .map(|result| PlaceRecord {
                name: result.name,
                address: result
                    .vicinity
                    .or(result.formatted_address)
                    .unwrap_or_default(),
                lat: result.geometry.location.lat,
                lng: result.geometry.location.lng,
            })
            .collect())
    }
}

#[async_trait]
impl PlaceLookup for GoogleMaps {
    async fn geocode(&self, address: &str) -> Result<Coordinates> {
        let response = self
            .client
            .get(GEOCODE_URL)
            .query(&[
                ("address", address),
                ("key", self.api_key.as_str()),
                ("language", "ja"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(KippoError::lookup_failed(format!(
                "Geocoding API request failed: {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response.json().await?;

        if body.status != "OK" {
            return Err(KippoError::lookup_failed(format!(
                "Geocoding failed: {} - {}",
                body.status,
                body.error_message.as_deref().unwrap_or("Unknown error")
            )));
        }

        let location = body
            .results
            .first()
            .map(|r| &r.geometry.location)
            .ok_or_else(|| {
                KippoError::lookup_failed("No results found for the given address")
            })?;

        Coordinates::new(location.lat, location.lng).map_err(|_| {
            KippoError::lookup_failed(format!(
                "Geocoding returned invalid coordinates: {},{}",
                location.lat, location.lng
            ))
        })
    }

    async fn search_nearby(
        &self,
        center: Coordinates,
        radius_km: f64,
        keywords: &[&str],
    ) -> Result<Vec<PlaceRecord>> {
        // Nearby Search takes its radius in meters.
        let radius_meters = radius_km * 1000.0;

        // Keyword searches are independent reads against the same center;
        // issue them concurrently and merge by dedupe key.
        let searches = keywords
            .iter()
            .map(|keyword| self.search_keyword(center, radius_meters, keyword));
        let batches = try_join_all(searches).await?;

        Ok(dedupe_places(batches.into_iter().flatten().collect()))
    }
}

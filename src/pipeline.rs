//! Recommendation pipeline
//!
//! Orchestrates star calculation → favorable directions → geocoding →
//! nearby search → geo filtering into the final ranked candidate list.
//! Every step fails fast: the first error aborts the whole request and no
//! partial result is returned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{KippoError, Result};
use crate::fortune::{compute_star, favorable_directions, Octant, Star};
use crate::geo::{self, Coordinates};
use crate::places::PlaceLookup;

/// Default search radius when the request omits one
pub const DEFAULT_RADIUS_KM: f64 = 20.0;
/// Accepted search radius range
pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 100.0;

/// Keywords covering both shrines and temples
pub const SEARCH_KEYWORDS: [&str; 5] = ["神社", "shrine", "寺", "寺院", "temple"];

/// A place lying in a favorable direction from the query center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub distance_km: f64,
    pub direction8: Octant,
}

/// The assembled recommendation response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub star: Star,
    pub lucky_directions: [Octant; 4],
    pub center: Coordinates,
    pub candidates: Vec<Candidate>,
}

/// Compute ranked shrine/temple recommendations in favorable directions
///
/// Steps:
/// 1. validate the radius, 2. compute the base star, 3. look up favorable
/// octants, 4. geocode the address, 5. search nearby shrines and temples,
/// 6. derive distance and octant per place, 7. keep favorable octants only,
/// 8. sort ascending by distance (stable, ties keep input order).
pub async fn recommend<L: PlaceLookup + ?Sized>(
    lookup: &L,
    birth_date: NaiveDate,
    address: &str,
    year_month: Option<&str>,
    radius_km: f64,
) -> Result<Recommendation> {
    if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&radius_km) {
        return Err(KippoError::invalid_input(format!(
            "radiusKm must be between {} and {}, got {}",
            MIN_RADIUS_KM, MAX_RADIUS_KM, radius_km
        )));
    }

    let star = compute_star(birth_date)?;
    info!(%star, "base star computed");

    let lucky_directions = favorable_directions(star, year_month)?;
    debug!(?lucky_directions, "favorable directions");

    let center = lookup.geocode(address).await?;
    info!(lat = center.lat, lng = center.lng, "address geocoded");

    let places = lookup
        .search_nearby(center, radius_km, &SEARCH_KEYWORDS)
        .await?;
    info!(count = places.len(), radius_km, "nearby places retrieved");

    let mut candidates: Vec<Candidate> = places
        .into_iter()
        .filter_map(|place| {
            let target = Coordinates {
                lat: place.lat,
                lng: place.lng,
            };
            let dd = geo::distance_and_direction(center, target);
            lucky_directions
                .contains(&dd.direction8)
                .then(|| Candidate {
                    name: place.name,
                    address: place.address,
                    lat: place.lat,
                    lng: place.lng,
                    distance_km: dd.distance_km,
                    direction8: dd.direction8,
                })
        })
        .collect();

    // Stable sort: equal distances keep upstream order.
    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    info!(count = candidates.len(), "candidates in favorable directions");

    Ok(Recommendation {
        star,
        lucky_directions,
        center,
        candidates,
    })
}

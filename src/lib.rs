//! kippo - Nine-star ki lucky-direction shrine and temple finder
//!
//! Computes a person's base star (本命星) from their birth date, maps it to
//! a fixed set of favorable compass directions (吉方位), geocodes an
//! address, and ranks nearby shrines and temples that lie in a favorable
//! direction.
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file) and its modules: pure logic plus the HTTP
//!   router, no process concerns
//! - **bin/kippo.rs**: thin wrapper that loads config and runs the server
//!
//! Modules:
//! - `fortune`: star calculation and the favorable-direction table
//! - `geo`: haversine distance, bearing, octant classification
//! - `places`: `PlaceLookup` capability trait with Google Maps and
//!   in-memory implementations
//! - `pipeline`: the request orchestration
//! - `server`: axum routes and error mapping
//! - `config`: environment configuration

pub mod config;
pub mod error;
pub mod fortune;
pub mod geo;
pub mod pipeline;
pub mod places;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{KippoError, Result};
pub use fortune::{compute_star, favorable_directions, parse_birth_date, Octant, Star};
pub use geo::{bearing_degrees, distance_and_direction, distance_km, to_octant, Coordinates};
pub use pipeline::{recommend, Candidate, Recommendation, DEFAULT_RADIUS_KM};
pub use places::{GoogleMaps, PlaceLookup, PlaceRecord, StaticPlaceLookup};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

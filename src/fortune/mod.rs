//! Nine-star ki (九星気学) fortune calculations
//!
//! This module derives a person's base star (本命星) from their birth year
//! and maps it to a fixed set of favorable compass directions (吉方位).
//!
//! - `star`: birth year → base star via digit-sum reduction
//! - `directions`: base star → favorable octants via a static lookup table

pub mod directions;
pub mod star;

pub use directions::{favorable_directions, Octant};
pub use star::{compute_star, parse_birth_date, Star};

//! Favorable direction (吉方位) lookup
//!
//! Maps a base star to its fixed set of four favorable compass octants.
//!
//! This table is a simplified placeholder. Full nine-star methodology layers
//! year/month/day charts, the five-element cycles, and forbidden directions
//! (暗剣殺, 五黄殺); none of that is modeled here. The `year_month` parameter
//! is accepted and format-checked for signature parity but does not vary the
//! result.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{KippoError, Result};
use crate::fortune::star::Star;

/// One of the eight 45°-wide compass direction bins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Octant {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Octant {
    /// All eight octants clockwise from north
    pub const ALL: [Octant; 8] = [
        Octant::N,
        Octant::NE,
        Octant::E,
        Octant::SE,
        Octant::S,
        Octant::SW,
        Octant::W,
        Octant::NW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Octant::N => "N",
            Octant::NE => "NE",
            Octant::E => "E",
            Octant::SE => "SE",
            Octant::S => "S",
            Octant::SW => "SW",
            Octant::W => "W",
            Octant::NW => "NW",
        }
    }
}

impl std::fmt::Display for Octant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

lazy_static! {
    /// Star → favorable octants, built once at process start
    static ref LUCKY_DIRECTIONS: HashMap<Star, [Octant; 4]> = {
        use Octant::*;
        let mut table = HashMap::new();
        table.insert(Star::OneWhiteWater, [E, SE, S, SW]);
        table.insert(Star::TwoBlackEarth, [N, NE, W, NW]);
        table.insert(Star::ThreeJadeWood, [S, SW, W, N]);
        table.insert(Star::FourGreenWood, [N, E, SE, NW]);
        table.insert(Star::FiveYellowEarth, [NE, E, SW, W]);
        table.insert(Star::SixWhiteMetal, [SE, S, N, NE]);
        table.insert(Star::SevenRedMetal, [E, S, W, NW]);
        table.insert(Star::EightWhiteEarth, [NE, SE, SW, NW]);
        table.insert(Star::NinePurpleFire, [N, E, W, NW]);
        table
    };

    /// YYYY-MM with a valid month
    static ref YEAR_MONTH_RE: Regex = Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").unwrap();
}

/// Look up the favorable octants for a star
///
/// `year_month`, when present, must match `YYYY-MM` or the call fails with
/// an invalid input error. The value itself is otherwise ignored: the table
/// carries no time-based variation.
pub fn favorable_directions(star: Star, year_month: Option<&str>) -> Result<[Octant; 4]> {
    if let Some(ym) = year_month {
        if !YEAR_MONTH_RE.is_match(ym) {
            return Err(KippoError::invalid_input(format!(
                "invalid yearMonth: {} (expected YYYY-MM)",
                ym
            )));
        }
    }

    // Every star has a table entry; the map is total over Star::ALL.
    LUCKY_DIRECTIONS
        .get(&star)
        .copied()
        .ok_or_else(|| KippoError::invalid_input(format!("unknown star: {}", star)))
}

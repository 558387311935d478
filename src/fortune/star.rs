//! Base star (本命星) calculation
//!
//! Maps a birth year to one of the nine stars by digit-sum reduction.
//!
//! Note: this is the simplified year-chart rule. No setsubun correction is
//! applied for birthdays near the early-February solar boundary, and month
//! stars (月命星) are out of scope. Existing clients depend on these exact
//! results, so the simplification is load-bearing.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{KippoError, Result};

/// Supported birth year range
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// One of the nine stars, ordinal 1-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Star {
    #[serde(rename = "一白水星")]
    OneWhiteWater,
    #[serde(rename = "二黒土星")]
    TwoBlackEarth,
    #[serde(rename = "三碧木星")]
    ThreeJadeWood,
    #[serde(rename = "四緑木星")]
    FourGreenWood,
    #[serde(rename = "五黄土星")]
    FiveYellowEarth,
    #[serde(rename = "六白金星")]
    SixWhiteMetal,
    #[serde(rename = "七赤金星")]
    SevenRedMetal,
    #[serde(rename = "八白土星")]
    EightWhiteEarth,
    #[serde(rename = "九紫火星")]
    NinePurpleFire,
}

impl Star {
    /// All nine stars in ordinal order
    pub const ALL: [Star; 9] = [
        Star::OneWhiteWater,
        Star::TwoBlackEarth,
        Star::ThreeJadeWood,
        Star::FourGreenWood,
        Star::FiveYellowEarth,
        Star::SixWhiteMetal,
        Star::SevenRedMetal,
        Star::EightWhiteEarth,
        Star::NinePurpleFire,
    ];

    /// 1-indexed ordinal of this star
    pub fn ordinal(&self) -> u8 {
        *self as u8 + 1
    }

    /// Look up a star by its 1-indexed ordinal
    pub fn from_ordinal(n: u8) -> Option<Star> {
        match n {
            1..=9 => Some(Star::ALL[(n - 1) as usize]),
            _ => None,
        }
    }

    /// Traditional kanji label (e.g. "四緑木星")
    pub fn name(&self) -> &'static str {
        match self {
            Star::OneWhiteWater => "一白水星",
            Star::TwoBlackEarth => "二黒土星",
            Star::ThreeJadeWood => "三碧木星",
            Star::FourGreenWood => "四緑木星",
            Star::FiveYellowEarth => "五黄土星",
            Star::SixWhiteMetal => "六白金星",
            Star::SevenRedMetal => "七赤金星",
            Star::EightWhiteEarth => "八白土星",
            Star::NinePurpleFire => "九紫火星",
        }
    }

    /// Look up a star by its kanji label
    pub fn from_name(name: &str) -> Result<Star> {
        Star::ALL
            .iter()
            .copied()
            .find(|s| s.name() == name)
            .ok_or_else(|| KippoError::invalid_input(format!("unknown star: {}", name)))
    }
}

impl std::fmt::Display for Star {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a `YYYY-MM-DD` birth date string
pub fn parse_birth_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        KippoError::invalid_input(format!(
            "invalid birthDate: {} (expected YYYY-MM-DD)",
            value
        ))
    })
}

/// Reduce a year to a single digit by repeatedly summing its decimal digits
///
/// Example: 1978 → 1+9+7+8 = 25 → 2+5 = 7
fn digit_sum_to_single(year: u32) -> u32 {
    let mut sum = year;
    while sum >= 10 {
        let mut n = sum;
        sum = 0;
        while n > 0 {
            sum += n % 10;
            n /= 10;
        }
    }
    sum
}

/// Compute the base star for a birth date
///
/// The birth year must lie in [1900, 2100]. The star is derived from the
/// year alone: reduce the year's digits to a single digit `d`, then take
/// `11 - d` with 10 corrected to 1 and 0 corrected to 9.
pub fn compute_star(birth_date: NaiveDate) -> Result<Star> {
    let year = birth_date.year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(KippoError::invalid_input(format!(
            "birth year {} out of supported range [{}, {}]",
            year, MIN_YEAR, MAX_YEAR
        )));
    }

    let single_digit = digit_sum_to_single(year as u32);

    let ordinal = match 11 - single_digit {
        10 => 1,
        0 => 9,
        n => n,
    };

    // digit_sum_to_single never returns 0 for a positive year, so the
    // ordinal is always in range.
    Star::from_ordinal(ordinal as u8)
        .ok_or_else(|| KippoError::invalid_input(format!("star ordinal {} out of range", ordinal)))
}

use crate::error::ChartError;
use crate::zodiac::ZodiacPlacement;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Campanus,
    Regiomontanus,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(HouseSystem, &str, u8)] = &[
    (HouseSystem::Placidus, "placidus", b'P'),
    (HouseSystem::Koch, "koch", b'K'),
    (HouseSystem::Equal, "equal", b'E'),
    (HouseSystem::WholeSign, "whole_sign", b'W'),
    (HouseSystem::Campanus, "campanus", b'C'),
    (HouseSystem::Regiomontanus, "regiomontanus", b'R'),
];

impl HouseSystem {
    /// One-letter Swiss Ephemeris code.
    pub fn code(self) -> char {
        self.entry().2 as char
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    fn entry(self) -> &'static (HouseSystem, &'static str, u8) {
        HOUSE_SYSTEMS
            .iter()
            .find(|(system, _, _)| *system == self)
            .unwrap_or(&HOUSE_SYSTEMS[0])
    }

    /// Accepts the one-letter code (`"P"`) or the name (`"placidus"`), case-insensitively.
    pub fn from_code(code: &str) -> Result<HouseSystem, ChartError> {
        let trimmed = code.trim();
        let lower = trimmed.to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, name, byte)| {
                *name == lower
                    || (trimmed.len() == 1 && trimmed.eq_ignore_ascii_case(&(*byte as char).to_string()))
            })
            .map(|(system, _, _)| *system)
            .ok_or_else(|| ChartError::InvalidHouseSystem {
                system: code.to_string(),
                valid: HOUSE_SYSTEMS
                    .iter()
                    .map(|(_, name, byte)| format!("{} ({})", *byte as char, name))
                    .collect(),
            })
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HouseSystem::from_code(s)
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A house cusp and the sign it falls in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number 1..=12
    pub number: u8,
    pub longitude: f64,
    pub placement: ZodiacPlacement,
}

/// No house interval contained a longitude. Only happens with a malformed cusp set.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("No house contains longitude {longitude} for cusps {cusps:?}; defaulted to house {fallback_house}")]
pub struct HouseInconsistency {
    pub longitude: f64,
    pub cusps: [f64; 12],
    pub fallback_house: u8,
}

//! Fixed ephemeris snapshot.
//!
//! Replays provider output captured for a single instant. Used for golden
//! fixtures, offline chart rendering and benchmarks where a live ephemeris
//! is unavailable or would make results non-reproducible.

use crate::ephemeris::provider::{south_node_from, EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, RawHouses, RawPosition};
use crate::houses::HouseSystem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Julian days closer than this are treated as the same instant.
const JD_TOLERANCE: f64 = 1e-6;

/// Coordinates closer than this (degrees) are treated as the same site.
const COORDINATE_TOLERANCE: f64 = 1e-6;

/// Provider output for one instant, as stored on disk.
///
/// Houses are only valid for the site and system they were captured with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemerisSnapshot {
    pub julian_day: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub house_system: HouseSystem,
    pub bodies: BTreeMap<Body, RawPosition>,
    pub houses: RawHouses,
}

/// Ephemeris provider backed by a single [`EphemerisSnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotEphemeris {
    snapshot: EphemerisSnapshot,
}

impl SnapshotEphemeris {
    pub fn new(snapshot: EphemerisSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json(json: &str) -> Result<Self, EphemerisError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, EphemerisError> {
        let text = std::fs::read_to_string(path).map_err(|e| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    pub fn snapshot(&self) -> &EphemerisSnapshot {
        &self.snapshot
    }

    pub fn julian_day_value(&self) -> f64 {
        self.snapshot.julian_day
    }

    fn check_instant(&self, julian_day: f64) -> Result<(), EphemerisError> {
        if (julian_day - self.snapshot.julian_day).abs() <= JD_TOLERANCE {
            Ok(())
        } else {
            Err(EphemerisError::InstantMismatch {
                expected: self.snapshot.julian_day,
                requested: julian_day,
            })
        }
    }

    fn check_site(&self, latitude: f64, longitude: f64, system: HouseSystem) -> Result<(), EphemerisError> {
        let same_site = (latitude - self.snapshot.latitude).abs() <= COORDINATE_TOLERANCE
            && (longitude - self.snapshot.longitude).abs() <= COORDINATE_TOLERANCE;
        if same_site && system == self.snapshot.house_system {
            return Ok(());
        }
        Err(EphemerisError::HouseRequestMismatch {
            expected: format!(
                "{} at ({}, {})",
                self.snapshot.house_system, self.snapshot.latitude, self.snapshot.longitude
            ),
            requested: format!("{} at ({}, {})", system, latitude, longitude),
        })
    }
}

impl EphemerisProvider for SnapshotEphemeris {
    fn planet_position(&self, body: Body, julian_day: f64) -> Result<RawPosition, EphemerisError> {
        self.check_instant(julian_day)?;
        if let Some(pos) = self.snapshot.bodies.get(&body) {
            return Ok(*pos);
        }
        if body == Body::SouthNode {
            if let Some(north) = self.snapshot.bodies.get(&Body::NorthNode) {
                log::debug!("Deriving south node from north node at JD {}", julian_day);
                return Ok(south_node_from(*north));
            }
        }
        Err(EphemerisError::MissingBody { body, julian_day })
    }

    fn houses(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError> {
        self.check_instant(julian_day)?;
        self.check_site(latitude, longitude, system)?;
        Ok(self.snapshot.houses)
    }
}

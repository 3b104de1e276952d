use crate::ephemeris::types::{Body, RawHouses, RawPosition};
use crate::houses::HouseSystem;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: Body,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("No position available for {body} at JD {julian_day}")]
    MissingBody { body: Body, julian_day: f64 },
    #[error("Ephemeris holds JD {expected} but JD {requested} was requested")]
    InstantMismatch { expected: f64, requested: f64 },
    #[error("Houses were captured for {expected}, not {requested}")]
    HouseRequestMismatch { expected: String, requested: String },
    #[error("Ephemeris returned malformed {what}: {value}")]
    Malformed { what: String, value: f64 },
    #[error("Failed to load ephemeris snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Source of raw planetary and house positions.
///
/// Implementations are expected to be fast, synchronous and deterministic for
/// a given input. The chart engine does not retry or time out calls.
pub trait EphemerisProvider {
    /// Julian day (UT) for a UTC instant.
    fn julian_day(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        Ok(julian_day_from_utc(instant))
    }

    fn planet_position(&self, body: Body, julian_day: f64) -> Result<RawPosition, EphemerisError>;

    fn houses(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn julian_day(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).julian_day(instant)
    }

    fn planet_position(&self, body: Body, julian_day: f64) -> Result<RawPosition, EphemerisError> {
        (**self).planet_position(body, julian_day)
    }

    fn houses(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError> {
        (**self).houses(julian_day, latitude, longitude, system)
    }
}

/// Convert UTC datetime to Julian Day (UT).
pub fn julian_day_from_utc(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// South node mirrors the north node across the ecliptic.
pub(crate) fn south_node_from(north: RawPosition) -> RawPosition {
    RawPosition {
        longitude: (north.longitude + 180.0).rem_euclid(360.0),
        latitude: -north.latitude,
        distance: north.distance,
        speed: north.speed,
    }
}

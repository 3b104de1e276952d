use crate::ephemeris::EphemerisError;
use crate::houses::HouseInconsistency;
use thiserror::Error;

/// Errors surfaced by the chart engine.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Latitude must be within [-90, 90], got {0}")]
    InvalidLatitude(f64),
    #[error("Longitude must be within [-180, 180], got {0}")]
    InvalidLongitude(f64),
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Non-finite value for {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Inconsistent(#[from] HouseInconsistency),
}

impl ChartError {
    /// True for errors raised by input validation, before any ephemeris call.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ChartError::InvalidLatitude(_)
                | ChartError::InvalidLongitude(_)
                | ChartError::InvalidHouseSystem { .. }
                | ChartError::NonFinite { .. }
        )
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ChartError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::NonFinite { field, value })
    }
}

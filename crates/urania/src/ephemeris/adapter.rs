use crate::ephemeris::provider::{south_node_from, EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, RawHouses, RawPosition};
use crate::houses::HouseSystem;
use chrono::{DateTime, Datelike, Timelike, Utc};
use swisseph::swe::{calc_ut, houses_ex, julday};

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

/// Swiss Ephemeris body codes; the south node has none and is derived.
fn swiss_body_code(body: Body) -> Option<u32> {
    match body {
        Body::Sun => Some(0),
        Body::Moon => Some(1),
        Body::Mercury => Some(2),
        Body::Venus => Some(3),
        Body::Mars => Some(4),
        Body::Jupiter => Some(5),
        Body::Saturn => Some(6),
        Body::Uranus => Some(7),
        Body::Neptune => Some(8),
        Body::Pluto => Some(9),
        Body::NorthNode => Some(11), // TRUE_NODE
        Body::SouthNode => None,
    }
}

/// Swiss Ephemeris adapter implementation.
///
/// Data files come from the library's own default search path; without them
/// it falls back to its built-in Moshier theory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwissEphemerisAdapter;

impl SwissEphemerisAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn julian_day(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let hour_decimal = instant.hour() as f64
            + instant.minute() as f64 / 60.0
            + instant.second() as f64 / 3600.0;
        // GREG_CAL = 1
        Ok(julday(
            instant.year(),
            instant.month() as i32,
            instant.day() as i32,
            hour_decimal,
            1,
        ))
    }

    fn planet_position(&self, body: Body, julian_day: f64) -> Result<RawPosition, EphemerisError> {
        let Some(code) = swiss_body_code(body) else {
            let north = self.planet_position(Body::NorthNode, julian_day)?;
            return Ok(south_node_from(north));
        };

        let result = calc_ut(julian_day, code, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                julian_day,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(RawPosition {
            longitude: out[0],
            latitude: out[1],
            distance: out[2],
            speed: out[3],
        })
    }

    fn houses(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError> {
        use swisseph::{AscMc, Cusp};

        let (c, a) = houses_ex(julian_day, CALC_FLAGS, latitude, longitude, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let raw = RawHouses {
            cusps: [
                cusps.first,
                cusps.second,
                cusps.third,
                cusps.fourth,
                cusps.fifth,
                cusps.sixth,
                cusps.seventh,
                cusps.eighth,
                cusps.ninth,
                cusps.tenth,
                cusps.eleventh,
                cusps.twelfth,
            ],
            ascendant: ascmc.ascendant,
            midheaven: ascmc.mc,
        };

        if raw.cusps.iter().all(|c| *c == 0.0) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "{} houses undefined at latitude {}",
                    system.name(),
                    latitude
                ),
            });
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_body_codes() {
        let codes: Vec<u32> = Body::ALL.iter().filter_map(|b| swiss_body_code(*b)).collect();
        assert_eq!(codes.len(), 11);
        assert_eq!(swiss_body_code(Body::SouthNode), None);
        assert_eq!(swiss_body_code(Body::NorthNode), Some(11));
    }

    #[test]
    fn test_julian_day_needs_no_data_files() {
        let adapter = SwissEphemerisAdapter::new();
        let instant = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((adapter.julian_day(instant).unwrap() - 2451545.0).abs() < 1e-9);
    }
}

use crate::aspects::{AspectDetector, AspectRecord};
use crate::chart::settings::ChartSettings;
use crate::chart::summary::ChartAggregator;
use crate::chart::types::{BirthChart, BirthData, ChartPlanet, ChartPoint};
use crate::ephemeris::{Body, EphemerisError, EphemerisProvider, GeoLocation, PlanetPosition, RawHouses};
use crate::error::{ensure_finite, ChartError};
use crate::houses::{HouseAssigner, HouseCusp, HouseSystem, HOUSE_COUNT};
use crate::zodiac::{normalize_degrees, ZodiacMapper};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Computes natal charts from an ephemeris provider.
///
/// Holds no mutable state; one engine may serve concurrent callers when the
/// provider allows it.
pub struct ChartEngine<E> {
    ephemeris: E,
    settings: ChartSettings,
    mapper: ZodiacMapper,
    assigner: HouseAssigner,
    detector: AspectDetector,
}

impl<E: EphemerisProvider> ChartEngine<E> {
    pub fn new(ephemeris: E) -> Self {
        Self::with_settings(ephemeris, ChartSettings::default())
    }

    pub fn with_settings(ephemeris: E, settings: ChartSettings) -> Self {
        Self {
            ephemeris,
            detector: AspectDetector::new(settings.overlap_policy),
            settings,
            mapper: ZodiacMapper::new(),
            assigner: HouseAssigner::new(),
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    /// Compute a full natal chart for a Julian day (UT) and location.
    ///
    /// `house_system_code` accepts `P`, `K`, `E`, `W`, `C`, `R` or the system
    /// name. Input is validated before the ephemeris is consulted; ephemeris
    /// failures are returned unchanged.
    pub fn compute_birth_chart(
        &self,
        julian_day: f64,
        latitude: f64,
        longitude: f64,
        house_system_code: &str,
        include_minor_aspects: bool,
    ) -> Result<BirthChart, ChartError> {
        let system = validate_request(julian_day, latitude, longitude, house_system_code)?;

        let positions = self.fetch_positions(julian_day)?;
        let raw_houses = self.ephemeris.houses(julian_day, latitude, longitude, system)?;
        let (cusps, ascendant, midheaven) = validate_houses(&raw_houses)?;

        let mut inconsistencies = Vec::new();
        let mut planets = Vec::with_capacity(positions.len());
        for position in positions {
            let (house, issue) = self.assigner.assign_or_fallback(position.longitude, &cusps);
            if let Some(issue) = issue {
                log::warn!(
                    "{} at {:.6}° fits no house at JD {} ({} system, lat {}, lon {}): {}",
                    position.body,
                    position.longitude,
                    julian_day,
                    system,
                    latitude,
                    longitude,
                    issue
                );
                inconsistencies.push(issue);
            }
            planets.push(ChartPlanet {
                placement: self.mapper.map(position.longitude)?,
                position,
                house,
            });
        }

        let houses = cusps
            .iter()
            .enumerate()
            .map(|(i, &cusp)| {
                Ok(HouseCusp {
                    number: (i + 1) as u8,
                    longitude: cusp,
                    placement: self.mapper.map(cusp)?,
                })
            })
            .collect::<Result<Vec<_>, ChartError>>()?;

        let ascendant = self.chart_point(ascendant)?;
        let midheaven = self.chart_point(midheaven)?;

        let mut planets_in_houses: BTreeMap<u8, Vec<Body>> =
            (1..=HOUSE_COUNT as u8).map(|n| (n, Vec::new())).collect();
        for planet in &planets {
            planets_in_houses.entry(planet.house).or_default().push(planet.body());
        }

        let chart_positions: Vec<PlanetPosition> = planets.iter().map(|p| p.position.clone()).collect();
        let aspects = self.detector.detect(&chart_positions, &self.settings.catalog, include_minor_aspects)?;

        let summary = ChartAggregator::new(&self.settings).aggregate(&planets, &ascendant, &midheaven, &aspects);

        log::debug!(
            "Computed chart at JD {}: {} bodies, {} aspects, {} inconsistencies",
            julian_day,
            planets.len(),
            aspects.len(),
            inconsistencies.len()
        );

        Ok(BirthChart {
            birth_data: BirthData {
                julian_day,
                location: GeoLocation { lat: latitude, lon: longitude },
                house_system: system,
                include_minor_aspects,
            },
            planets,
            houses,
            ascendant,
            midheaven,
            planets_in_houses,
            aspects,
            summary,
            inconsistencies,
        })
    }

    /// Like [`compute_birth_chart`](Self::compute_birth_chart) for a UTC instant.
    pub fn compute_birth_chart_at(
        &self,
        instant: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        house_system_code: &str,
        include_minor_aspects: bool,
    ) -> Result<BirthChart, ChartError> {
        // Reject bad coordinates before the provider converts the instant
        validate_site(latitude, longitude, house_system_code)?;
        let julian_day = self.ephemeris.julian_day(instant)?;
        self.compute_birth_chart(julian_day, latitude, longitude, house_system_code, include_minor_aspects)
    }

    /// Chart using the configured default house system and minor-aspect setting.
    pub fn compute_default_chart(&self, julian_day: f64, latitude: f64, longitude: f64) -> Result<BirthChart, ChartError> {
        let code = self.settings.default_house_system.code().to_string();
        self.compute_birth_chart(julian_day, latitude, longitude, &code, self.settings.include_minor_aspects)
    }

    /// Aspects between arbitrary positions (transits, synastry) with the engine's catalog and policy.
    pub fn compute_aspects(
        &self,
        positions: &[PlanetPosition],
        include_minor_aspects: bool,
    ) -> Result<Vec<AspectRecord>, ChartError> {
        self.detector.detect(positions, &self.settings.catalog, include_minor_aspects)
    }

    fn fetch_positions(&self, julian_day: f64) -> Result<Vec<PlanetPosition>, EphemerisError> {
        Body::ALL
            .iter()
            .map(|&body| {
                let raw = self.ephemeris.planet_position(body, julian_day)?;
                for (what, value) in [
                    ("longitude", raw.longitude),
                    ("latitude", raw.latitude),
                    ("distance", raw.distance),
                    ("speed", raw.speed),
                ] {
                    if !value.is_finite() {
                        return Err(EphemerisError::Malformed {
                            what: format!("{} {}", body.id(), what),
                            value,
                        });
                    }
                }
                Ok(PlanetPosition::from_raw(body, raw))
            })
            .collect()
    }

    fn chart_point(&self, longitude: f64) -> Result<ChartPoint, ChartError> {
        Ok(ChartPoint {
            longitude,
            placement: self.mapper.map(longitude)?,
        })
    }
}

fn validate_request(
    julian_day: f64,
    latitude: f64,
    longitude: f64,
    house_system_code: &str,
) -> Result<HouseSystem, ChartError> {
    ensure_finite("julian_day", julian_day)?;
    validate_site(latitude, longitude, house_system_code)
}

/// Coordinates and house system, everything but the instant.
fn validate_site(latitude: f64, longitude: f64, house_system_code: &str) -> Result<HouseSystem, ChartError> {
    if ensure_finite("latitude", latitude)?.abs() > 90.0 {
        return Err(ChartError::InvalidLatitude(latitude));
    }
    if ensure_finite("longitude", longitude)?.abs() > 180.0 {
        return Err(ChartError::InvalidLongitude(longitude));
    }
    HouseSystem::from_code(house_system_code)
}

fn validate_houses(raw: &RawHouses) -> Result<([f64; HOUSE_COUNT], f64, f64), EphemerisError> {
    let mut cusps = [0.0; HOUSE_COUNT];
    for (i, &cusp) in raw.cusps.iter().enumerate() {
        if !cusp.is_finite() {
            return Err(EphemerisError::Malformed {
                what: format!("cusp {}", i + 1),
                value: cusp,
            });
        }
        cusps[i] = normalize_degrees(cusp);
    }
    for (what, value) in [("ascendant", raw.ascendant), ("midheaven", raw.midheaven)] {
        if !value.is_finite() {
            return Err(EphemerisError::Malformed { what: what.to_string(), value });
        }
    }
    Ok((cusps, normalize_degrees(raw.ascendant), normalize_degrees(raw.midheaven)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::RawPosition;
    use std::cell::Cell;

    /// Places body `i` at `i * 31°` and counts provider calls.
    struct CountingEphemeris {
        calls: Cell<usize>,
        cusps: [f64; 12],
    }

    impl CountingEphemeris {
        fn new(cusps: [f64; 12]) -> Self {
            Self { calls: Cell::new(0), cusps }
        }
    }

    impl EphemerisProvider for CountingEphemeris {
        fn planet_position(&self, body: Body, _julian_day: f64) -> Result<RawPosition, EphemerisError> {
            self.calls.set(self.calls.get() + 1);
            let i = body as usize as f64;
            Ok(RawPosition { longitude: i * 31.0, latitude: 0.0, distance: 1.0, speed: 1.0 - i * 0.2 })
        }

        fn houses(&self, _jd: f64, _lat: f64, _lon: f64, _system: HouseSystem) -> Result<RawHouses, EphemerisError> {
            self.calls.set(self.calls.get() + 1);
            Ok(RawHouses { cusps: self.cusps, ascendant: self.cusps[0], midheaven: self.cusps[9] })
        }
    }

    const EQUAL: [f64; 12] = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0];

    #[test]
    fn test_invalid_input_rejected_before_ephemeris() {
        let engine = ChartEngine::new(CountingEphemeris::new(EQUAL));
        let cases = [
            (2451545.0, 91.0, 0.0, "P"),
            (2451545.0, 0.0, -180.5, "P"),
            (2451545.0, 0.0, 0.0, "Z"),
            (f64::NAN, 0.0, 0.0, "P"),
            (2451545.0, f64::INFINITY, 0.0, "P"),
        ];
        for (jd, lat, lon, code) in cases {
            let err = engine.compute_birth_chart(jd, lat, lon, code, true).unwrap_err();
            assert!(err.is_invalid_input(), "{err}");
        }
        assert_eq!(engine.ephemeris().calls.get(), 0);
    }

    #[test]
    fn test_boundary_coordinates_accepted() {
        let engine = ChartEngine::new(CountingEphemeris::new(EQUAL));
        assert!(engine.compute_birth_chart(2451545.0, 90.0, -180.0, "E", false).is_ok());
        assert!(engine.compute_birth_chart(2451545.0, -90.0, 180.0, "whole_sign", false).is_ok());
    }

    #[test]
    fn test_chart_structure() {
        let engine = ChartEngine::new(CountingEphemeris::new(EQUAL));
        let chart = engine.compute_birth_chart(2451545.0, 10.0, 20.0, "E", true).unwrap();
        assert_eq!(chart.planets.len(), 12);
        assert_eq!(chart.houses.len(), 12);
        assert_eq!(chart.planets_in_houses.len(), 12);
        assert!(chart.is_consistent());

        // Mercury at 62° sits in house 3 of an equal-from-Aries set
        let mercury = chart.planet(Body::Mercury).unwrap();
        assert_eq!(mercury.house, 3);
        assert!(chart.planets_in_houses[&3].contains(&Body::Mercury));

        let placed: usize = chart.planets_in_houses.values().map(|v| v.len()).sum();
        assert_eq!(placed, 12);
    }

    #[test]
    fn test_malformed_cusps_surface_inconsistency() {
        let engine = ChartEngine::new(CountingEphemeris::new([200.0; 12]));
        let chart = engine.compute_birth_chart(2451545.0, 0.0, 0.0, "P", false).unwrap();
        assert_eq!(chart.inconsistencies.len(), 12);
        assert!(chart.planets.iter().all(|p| p.house == 1));
        assert!(matches!(chart.ensure_consistent(), Err(ChartError::Inconsistent(_))));
    }

    struct BrokenEphemeris;

    impl EphemerisProvider for BrokenEphemeris {
        fn planet_position(&self, body: Body, julian_day: f64) -> Result<RawPosition, EphemerisError> {
            if body == Body::Moon {
                return Ok(RawPosition { longitude: f64::NAN, latitude: 0.0, distance: 1.0, speed: 13.0 });
            }
            Err(EphemerisError::CalculationFailed { body, julian_day, message: "offline".into() })
        }

        fn houses(&self, _jd: f64, _lat: f64, _lon: f64, _system: HouseSystem) -> Result<RawHouses, EphemerisError> {
            Err(EphemerisError::HouseCalculationFailed { message: "offline".into() })
        }
    }

    #[test]
    fn test_ephemeris_failure_propagates() {
        let engine = ChartEngine::new(BrokenEphemeris);
        let err = engine.compute_birth_chart(2451545.0, 0.0, 0.0, "P", true).unwrap_err();
        assert!(matches!(
            err,
            ChartError::Ephemeris(EphemerisError::CalculationFailed { body: Body::Sun, .. })
        ));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn test_instant_entry_point_validates_site_first() {
        use chrono::TimeZone;
        let engine = ChartEngine::new(CountingEphemeris::new(EQUAL));
        let instant = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!(matches!(
            engine.compute_birth_chart_at(instant, 91.0, 0.0, "P", true),
            Err(ChartError::InvalidLatitude(_))
        ));
        assert!(engine.compute_birth_chart_at(instant, 0.0, 0.0, "Q", true).is_err());
        assert_eq!(engine.ephemeris().calls.get(), 0);

        let chart = engine.compute_birth_chart_at(instant, 0.0, 0.0, "E", true).unwrap();
        assert_eq!(chart.birth_data.julian_day, 2451545.0);
    }

    #[test]
    fn test_engine_aspects_reject_non_finite() {
        let engine = ChartEngine::new(CountingEphemeris::new(EQUAL));
        let positions = [
            PlanetPosition::new(Body::Sun, 10.0, 0.0, 1.0, f64::NAN),
            PlanetPosition::new(Body::Moon, 15.0, 0.0, 1.0, 13.0),
        ];
        assert!(engine.compute_aspects(&positions, true).unwrap_err().is_invalid_input());
    }
}

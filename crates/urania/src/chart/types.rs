use crate::aspects::{AspectNature, AspectRecord};
use crate::ephemeris::{Body, GeoLocation, PlanetPosition};
use crate::error::ChartError;
use crate::houses::{HouseCusp, HouseInconsistency, HouseSystem};
use crate::zodiac::{Element, Modality, Sign, ZodiacPlacement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ascendant or midheaven.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub longitude: f64,
    pub placement: ZodiacPlacement,
}

/// A body with its sign and house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPlanet {
    #[serde(flatten)]
    pub position: PlanetPosition,
    pub placement: ZodiacPlacement,
    /// House number 1..=12
    pub house: u8,
}

impl ChartPlanet {
    pub fn body(&self) -> Body {
        self.position.body
    }
}

/// Inputs the chart was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub julian_day: f64,
    pub location: GeoLocation,
    pub house_system: HouseSystem,
    pub include_minor_aspects: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSummary {
    pub elements: BTreeMap<Element, u32>,
    pub dominant_element: Element,
    pub modalities: BTreeMap<Modality, u32>,
    pub dominant_modality: Modality,
    pub aspect_counts: BTreeMap<AspectNature, u32>,
    pub total_aspects: usize,
    pub retrograde_planets: Vec<Body>,
    pub sun_sign: Option<Sign>,
    pub moon_sign: Option<Sign>,
    pub ascendant_sign: Sign,
    pub ascendant: ChartPoint,
    pub midheaven: ChartPoint,
}

/// A complete natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthChart {
    pub birth_data: BirthData,
    pub planets: Vec<ChartPlanet>,
    pub houses: Vec<HouseCusp>,
    pub ascendant: ChartPoint,
    pub midheaven: ChartPoint,
    /// House number -> bodies in that house, every house present
    pub planets_in_houses: BTreeMap<u8, Vec<Body>>,
    /// Sorted by orb, most exact first
    pub aspects: Vec<AspectRecord>,
    pub summary: ChartSummary,
    /// Planets that could not be placed and were defaulted to house 1
    #[serde(default)]
    pub inconsistencies: Vec<HouseInconsistency>,
}

impl BirthChart {
    pub fn planet(&self, body: Body) -> Option<&ChartPlanet> {
        self.planets.iter().find(|p| p.body() == body)
    }

    pub fn aspects_for(&self, body: Body) -> impl Iterator<Item = &AspectRecord> {
        self.aspects.iter().filter(move |a| a.involves(body))
    }

    pub fn is_consistent(&self) -> bool {
        self.inconsistencies.is_empty()
    }

    /// Turn the first recorded house inconsistency into a hard error.
    pub fn ensure_consistent(self) -> Result<Self, ChartError> {
        match self.inconsistencies.first() {
            Some(issue) => Err(ChartError::Inconsistent(issue.clone())),
            None => Ok(self),
        }
    }
}

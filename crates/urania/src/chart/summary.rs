use crate::aspects::{AspectNature, AspectRecord};
use crate::chart::settings::ChartSettings;
use crate::chart::types::{ChartPlanet, ChartPoint, ChartSummary};
use crate::ephemeris::Body;
use crate::zodiac::{Element, Modality};
use std::collections::BTreeMap;

/// Derives chart-level statistics from already placed planets and aspects.
#[derive(Debug, Clone)]
pub struct ChartAggregator<'a> {
    settings: &'a ChartSettings,
}

impl<'a> ChartAggregator<'a> {
    pub fn new(settings: &'a ChartSettings) -> Self {
        Self { settings }
    }

    pub fn aggregate(
        &self,
        planets: &[ChartPlanet],
        ascendant: &ChartPoint,
        midheaven: &ChartPoint,
        aspects: &[AspectRecord],
    ) -> ChartSummary {
        // Only the ten planets count towards element/modality balance
        let primaries: Vec<&ChartPlanet> = planets.iter().filter(|p| p.body().is_primary()).collect();

        let mut elements = histogram(Element::ALL);
        let mut modalities = histogram(Modality::ALL);
        for planet in &primaries {
            *elements.entry(planet.placement.element).or_default() += 1;
            *modalities.entry(planet.placement.modality).or_default() += 1;
        }

        let mut aspect_counts = histogram(AspectNature::ALL);
        for aspect in aspects {
            *aspect_counts.entry(aspect.nature()).or_default() += 1;
        }

        let retrograde_planets = primaries
            .iter()
            .filter(|p| p.position.speed < 0.0)
            .map(|p| p.body())
            .collect();

        let sign_of = |body: Body| {
            planets
                .iter()
                .find(|p| p.body() == body)
                .map(|p| p.placement.sign)
        };

        ChartSummary {
            dominant_element: dominant(&elements, &self.settings.element_priority),
            elements,
            dominant_modality: dominant(&modalities, &self.settings.modality_priority),
            modalities,
            aspect_counts,
            total_aspects: aspects.len(),
            retrograde_planets,
            sun_sign: sign_of(Body::Sun),
            moon_sign: sign_of(Body::Moon),
            ascendant_sign: ascendant.placement.sign,
            ascendant: ascendant.clone(),
            midheaven: midheaven.clone(),
        }
    }
}

fn histogram<K: Ord, const N: usize>(keys: [K; N]) -> BTreeMap<K, u32> {
    keys.into_iter().map(|k| (k, 0)).collect()
}

/// Highest-count bucket; equal counts resolve to whichever comes first in `priority`.
///
/// Keys missing from `priority` are considered after it, in key order.
/// `priority` must not be empty.
pub fn dominant<K: Ord + Copy>(counts: &BTreeMap<K, u32>, priority: &[K]) -> K {
    let max = counts.values().copied().max().unwrap_or(0);
    priority
        .iter()
        .copied()
        .chain(counts.keys().copied())
        .find(|k| counts.get(k).copied().unwrap_or(0) == max)
        .unwrap_or(priority[0])
}

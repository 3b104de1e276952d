use crate::aspects::motion::is_applying;
use crate::aspects::types::{AspectCatalog, AspectRecord, AspectType, OverlapPolicy};
use crate::ephemeris::PlanetPosition;
use crate::error::{ensure_finite, ChartError};
use crate::zodiac::normalize_degrees;
use std::cmp::Ordering;

/// Angular distance between two longitudes, folded to 0..=180.
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (normalize_degrees(lon1) - normalize_degrees(lon2)).abs();
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Aspect detector
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectDetector {
    policy: OverlapPolicy,
}

// Catalog position travels with each match so sorting can break orb ties.
struct Candidate {
    catalog_index: usize,
    record: AspectRecord,
}

impl AspectDetector {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Find aspects between every unordered pair of `positions`.
    ///
    /// Each pair is matched against every catalog entry (minor entries only
    /// when `include_minor`), so overlapping orb windows can yield several
    /// records for one pair unless the policy is [`OverlapPolicy::TightestOnly`].
    /// The result is sorted by orb, most exact first; equal orbs keep catalog
    /// declaration order, then pair order.
    ///
    /// Non-finite longitudes or speeds are rejected before any pair is matched.
    pub fn detect(
        &self,
        positions: &[PlanetPosition],
        catalog: &AspectCatalog,
        include_minor: bool,
    ) -> Result<Vec<AspectRecord>, ChartError> {
        for position in positions {
            ensure_finite("longitude", position.longitude)?;
            ensure_finite("speed", position.speed)?;
        }

        let active: Vec<(usize, &AspectType)> = catalog
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, aspect)| include_minor || aspect.kind.is_major())
            .collect();

        let mut candidates = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let pair_matches = self.match_pair(&positions[i], &positions[j], &active);
                match self.policy {
                    OverlapPolicy::KeepAll => candidates.extend(pair_matches),
                    OverlapPolicy::TightestOnly => {
                        if let Some(best) = pair_matches.into_iter().min_by(compare_candidates) {
                            candidates.push(best);
                        }
                    }
                }
            }
        }

        // sort_by is stable: pair enumeration order survives full ties
        candidates.sort_by(compare_candidates);
        Ok(candidates.into_iter().map(|c| c.record).collect())
    }

    fn match_pair(
        &self,
        p1: &PlanetPosition,
        p2: &PlanetPosition,
        active: &[(usize, &AspectType)],
    ) -> Vec<Candidate> {
        let separation = angular_separation(p1.longitude, p2.longitude);

        active
            .iter()
            .filter_map(|(catalog_index, aspect)| {
                let orb = (separation - aspect.angle).abs();
                // negated so a NaN orb never matches
                if !(orb <= aspect.orb) {
                    return None;
                }
                Some(Candidate {
                    catalog_index: *catalog_index,
                    record: AspectRecord {
                        first: p1.body,
                        second: p2.body,
                        aspect: **aspect,
                        separation,
                        orb,
                        applying: is_applying(p1.speed, p2.speed, separation, aspect.angle),
                    },
                })
            })
            .collect()
    }
}

fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    a.record
        .orb
        .total_cmp(&b.record.orb)
        .then(a.catalog_index.cmp(&b.catalog_index))
}

/// Aspects between `positions` using the standard catalog, keeping overlaps.
pub fn compute_aspects(
    positions: &[PlanetPosition],
    include_minor_aspects: bool,
) -> Result<Vec<AspectRecord>, ChartError> {
    AspectDetector::default().detect(positions, &AspectCatalog::standard(), include_minor_aspects)
}

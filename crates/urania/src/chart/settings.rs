use crate::aspects::{AspectCatalog, OverlapPolicy};
use crate::houses::HouseSystem;
use crate::zodiac::{Element, Modality};
use serde::{Deserialize, Serialize};

/// Engine-wide chart options.
///
/// The tie-break orders and the overlap policy have no astrological ground
/// truth; they are settings so callers can pin them explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// House system used when the caller does not name one
    pub default_house_system: HouseSystem,
    pub include_minor_aspects: bool,
    pub overlap_policy: OverlapPolicy,
    pub catalog: AspectCatalog,

    // Dominant element/modality tie-breaks, highest priority first
    pub element_priority: [Element; 4],
    pub modality_priority: [Modality; 3],
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_house_system: HouseSystem::Placidus,
            include_minor_aspects: true,
            overlap_policy: OverlapPolicy::KeepAll,
            catalog: AspectCatalog::standard(),

            element_priority: Element::ALL,
            modality_priority: Modality::ALL,
        }
    }
}

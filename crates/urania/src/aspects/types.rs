use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    SemiSextile,
    SemiSquare,
    Sesquiquadrate,
    Quincunx,
}

impl AspectKind {
    pub const ALL: [AspectKind; 9] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::Sesquiquadrate,
        AspectKind::Quincunx,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Sextile => "Sextile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::Opposition => "Opposition",
            AspectKind::SemiSextile => "Semi-sextile",
            AspectKind::SemiSquare => "Semi-square",
            AspectKind::Sesquiquadrate => "Sesquiquadrate",
            AspectKind::Quincunx => "Quincunx",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "☌",
            AspectKind::Sextile => "⚹",
            AspectKind::Square => "□",
            AspectKind::Trine => "△",
            AspectKind::Opposition => "☍",
            AspectKind::SemiSextile => "⚺",
            AspectKind::SemiSquare => "∠",
            AspectKind::Sesquiquadrate => "⚼",
            AspectKind::Quincunx => "⚻",
        }
    }

    pub fn is_major(self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction
                | AspectKind::Sextile
                | AspectKind::Square
                | AspectKind::Trine
                | AspectKind::Opposition
        )
    }

    /// snake_case identifier, as used in configuration files.
    pub fn id(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
            AspectKind::SemiSextile => "semi_sextile",
            AspectKind::SemiSquare => "semi_square",
            AspectKind::Sesquiquadrate => "sesquiquadrate",
            AspectKind::Quincunx => "quincunx",
        }
    }

    pub fn from_id(id: &str) -> Option<AspectKind> {
        let id = id.trim().to_lowercase().replace('-', "_");
        AspectKind::ALL.iter().copied().find(|k| k.id() == id)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Harmonious,
    Challenging,
    Neutral,
    Minor,
}

impl AspectNature {
    pub const ALL: [AspectNature; 4] = [
        AspectNature::Harmonious,
        AspectNature::Challenging,
        AspectNature::Neutral,
        AspectNature::Minor,
    ];
}

/// One catalog entry: what angle counts as the aspect and how far off it may be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectType {
    pub kind: AspectKind,
    /// Exact angle in degrees (0..=180)
    pub angle: f64,
    /// Maximum allowed deviation from `angle`
    pub orb: f64,
    pub nature: AspectNature,
}

impl AspectType {
    pub const fn new(kind: AspectKind, angle: f64, orb: f64, nature: AspectNature) -> Self {
        Self { kind, angle, orb, nature }
    }
}

/// Standard aspect table, in declaration order.
pub const STANDARD_ASPECTS: [AspectType; 9] = [
    AspectType::new(AspectKind::Conjunction, 0.0, 8.0, AspectNature::Neutral),
    AspectType::new(AspectKind::Sextile, 60.0, 6.0, AspectNature::Harmonious),
    AspectType::new(AspectKind::Square, 90.0, 8.0, AspectNature::Challenging),
    AspectType::new(AspectKind::Trine, 120.0, 8.0, AspectNature::Harmonious),
    AspectType::new(AspectKind::Opposition, 180.0, 8.0, AspectNature::Challenging),
    AspectType::new(AspectKind::SemiSextile, 30.0, 2.0, AspectNature::Minor),
    AspectType::new(AspectKind::SemiSquare, 45.0, 2.0, AspectNature::Minor),
    AspectType::new(AspectKind::Sesquiquadrate, 135.0, 2.0, AspectNature::Minor),
    AspectType::new(AspectKind::Quincunx, 150.0, 2.0, AspectNature::Minor),
];

/// Ordered set of aspect types. Order is significant: it breaks orb ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectCatalog {
    entries: Vec<AspectType>,
}

impl AspectCatalog {
    pub fn new(entries: Vec<AspectType>) -> Self {
        Self { entries }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_ASPECTS.to_vec())
    }

    pub fn entries(&self) -> &[AspectType] {
        &self.entries
    }

    pub fn get(&self, kind: AspectKind) -> Option<&AspectType> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Replace the orb of `kind`, leaving declaration order untouched.
    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Self {
        for entry in self.entries.iter_mut().filter(|e| e.kind == kind) {
            entry.orb = orb;
        }
        self
    }
}

impl Default for AspectCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// What to do when one planet pair falls inside several orb windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Report every matching aspect type.
    #[default]
    KeepAll,
    /// Report only the most exact match per pair (catalog order breaks ties).
    TightestOnly,
}

/// A detected aspect between two bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectRecord {
    pub first: Body,
    pub second: Body,
    pub aspect: AspectType,
    /// Angular distance between the bodies, folded to 0..=180
    pub separation: f64,
    /// Deviation from the exact angle, 0 <= orb <= aspect.orb
    pub orb: f64,
    /// Approaching exactness (see [`crate::aspects::motion`])
    pub applying: bool,
}

impl AspectRecord {
    pub fn kind(&self) -> AspectKind {
        self.aspect.kind
    }

    pub fn nature(&self) -> AspectNature {
        self.aspect.nature
    }

    pub fn involves(&self, body: Body) -> bool {
        self.first == body || self.second == body
    }
}

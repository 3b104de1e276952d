use crate::zodiac::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bodies tracked by a natal chart, in canonical chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
}

// (id, display name, glyph), indexed by body
const BODY_TABLE: [(&str, &str, &str); 12] = [
    ("sun", "Sun", "☉"),
    ("moon", "Moon", "☽"),
    ("mercury", "Mercury", "☿"),
    ("venus", "Venus", "♀"),
    ("mars", "Mars", "♂"),
    ("jupiter", "Jupiter", "♃"),
    ("saturn", "Saturn", "♄"),
    ("uranus", "Uranus", "♅"),
    ("neptune", "Neptune", "♆"),
    ("pluto", "Pluto", "♇"),
    ("north_node", "North Node", "☊"),
    ("south_node", "South Node", "☋"),
];

impl Body {
    pub const ALL: [Body; 12] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
        Body::SouthNode,
    ];

    /// The ten planets counted by element/modality statistics.
    pub const PRIMARY: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn id(self) -> &'static str {
        BODY_TABLE[self as usize].0
    }

    pub fn name(self) -> &'static str {
        BODY_TABLE[self as usize].1
    }

    pub fn symbol(self) -> &'static str {
        BODY_TABLE[self as usize].2
    }

    pub fn is_primary(self) -> bool {
        !matches!(self, Body::NorthNode | Body::SouthNode)
    }

    pub fn from_id(id: &str) -> Option<Body> {
        let id = id.to_lowercase();
        Body::ALL.iter().copied().find(|b| b.id() == id)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw provider output for one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    pub longitude: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

/// Raw provider output for a house computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawHouses {
    /// Cusps of houses 1..12 in order
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

/// Planetary position data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub body: Body,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
    /// Whether the planet is retrograde
    pub retrograde: bool,
}

impl PlanetPosition {
    pub fn new(body: Body, longitude: f64, latitude: f64, distance: f64, speed: f64) -> Self {
        Self {
            body,
            longitude: normalize_degrees(longitude),
            latitude,
            distance,
            speed,
            retrograde: speed < 0.0,
        }
    }

    pub fn from_raw(body: Body, raw: RawPosition) -> Self {
        Self::new(body, raw.longitude, raw.latitude, raw.distance, raw.speed)
    }
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_position_normalizes_and_flags_retrograde() {
        let p = PlanetPosition::new(Body::Mercury, -20.0, 1.0, 0.9, -0.4);
        assert_eq!(p.longitude, 340.0);
        assert!(p.retrograde);

        let p = PlanetPosition::new(Body::Mars, 400.0, 0.0, 1.5, 0.6);
        assert_eq!(p.longitude, 40.0);
        assert!(!p.retrograde);
    }

    #[test]
    fn test_body_ids_round_trip() {
        for body in Body::ALL {
            assert_eq!(Body::from_id(body.id()), Some(body));
        }
        assert_eq!(Body::from_id("North_Node"), Some(Body::NorthNode));
        assert_eq!(Body::from_id("chiron"), None);
        assert_eq!(Body::PRIMARY.len(), 10);
        assert!(!Body::SouthNode.is_primary());
    }
}

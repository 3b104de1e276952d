use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    /// Canonical cycle order; sign `i` has element `ALL[i % 4]`.
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Modality {
    /// Canonical cycle order; sign `i` has modality `ALL[i % 3]`.
    pub const ALL: [Modality; 3] = [Modality::Cardinal, Modality::Fixed, Modality::Mutable];

    pub fn name(self) -> &'static str {
        match self {
            Modality::Cardinal => "Cardinal",
            Modality::Fixed => "Fixed",
            Modality::Mutable => "Mutable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

// (display name, glyph), indexed by sign
const SIGN_TABLE: [(&str, &str); 12] = [
    ("Aries", "♈"),
    ("Taurus", "♉"),
    ("Gemini", "♊"),
    ("Cancer", "♋"),
    ("Leo", "♌"),
    ("Virgo", "♍"),
    ("Libra", "♎"),
    ("Scorpio", "♏"),
    ("Sagittarius", "♐"),
    ("Capricorn", "♑"),
    ("Aquarius", "♒"),
    ("Pisces", "♓"),
];

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign for an index; wraps modulo 12.
    pub fn from_index(index: usize) -> Sign {
        Sign::ALL[index % 12]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        SIGN_TABLE[self as usize].0
    }

    pub fn symbol(self) -> &'static str {
        SIGN_TABLE[self as usize].1
    }

    pub fn element(self) -> Element {
        Element::ALL[self as usize % 4]
    }

    pub fn modality(self) -> Modality {
        Modality::ALL[self as usize % 3]
    }
}

/// Where a longitude falls on the zodiac.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZodiacPlacement {
    pub sign: Sign,
    pub sign_index: u8,
    pub sign_name: String,
    pub sign_symbol: String,
    /// Degrees into the sign, 0 <= x < 30
    pub degree_in_sign: f64,
    pub element: Element,
    pub modality: Modality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_and_modality_cycles() {
        assert_eq!(Sign::Aries.element(), Element::Fire);
        assert_eq!(Sign::Taurus.element(), Element::Earth);
        assert_eq!(Sign::Gemini.element(), Element::Air);
        assert_eq!(Sign::Cancer.element(), Element::Water);
        assert_eq!(Sign::Sagittarius.element(), Element::Fire);
        assert_eq!(Sign::Pisces.element(), Element::Water);

        assert_eq!(Sign::Aries.modality(), Modality::Cardinal);
        assert_eq!(Sign::Leo.modality(), Modality::Fixed);
        assert_eq!(Sign::Virgo.modality(), Modality::Mutable);
        assert_eq!(Sign::Capricorn.modality(), Modality::Cardinal);
    }

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(Sign::from_index(0), Sign::Aries);
        assert_eq!(Sign::from_index(11), Sign::Pisces);
        assert_eq!(Sign::from_index(12), Sign::Aries);
        assert_eq!(Sign::Scorpio.index(), 7);
        assert_eq!(Sign::Scorpio.name(), "Scorpio");
        assert_eq!(Sign::Scorpio.symbol(), "♏");
    }
}

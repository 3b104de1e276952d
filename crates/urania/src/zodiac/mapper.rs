use crate::error::{ensure_finite, ChartError};
use crate::zodiac::types::{Sign, ZodiacPlacement};

pub const SIGN_SPAN: f64 = 30.0;

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Maps ecliptic longitudes onto the tropical zodiac.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZodiacMapper;

impl ZodiacMapper {
    pub fn new() -> Self {
        Self
    }

    /// Sign, degree-in-sign, element and modality for a longitude.
    ///
    /// Any finite longitude is accepted; values outside [0, 360) are wrapped.
    pub fn map(&self, longitude: f64) -> Result<ZodiacPlacement, ChartError> {
        let lon = normalize_degrees(ensure_finite("longitude", longitude)?);
        let sign = Sign::from_index((lon / SIGN_SPAN).floor() as usize);
        let degree_in_sign = lon % SIGN_SPAN;

        Ok(ZodiacPlacement {
            sign,
            sign_index: sign.index(),
            sign_name: sign.name().to_string(),
            sign_symbol: sign.symbol().to_string(),
            degree_in_sign,
            element: sign.element(),
            modality: sign.modality(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::types::{Element, Modality};

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert!(normalize_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn test_map_zero_is_aries() {
        let p = ZodiacMapper.map(0.0).unwrap();
        assert_eq!(p.sign, Sign::Aries);
        assert_eq!(p.degree_in_sign, 0.0);
        assert_eq!(p.element, Element::Fire);
        assert_eq!(p.modality, Modality::Cardinal);
    }

    #[test]
    fn test_map_end_of_pisces() {
        let p = ZodiacMapper.map(359.999).unwrap();
        assert_eq!(p.sign, Sign::Pisces);
        assert!((p.degree_in_sign - 29.999).abs() < 1e-9);
    }

    #[test]
    fn test_map_wraps_out_of_range() {
        assert_eq!(ZodiacMapper.map(-15.0).unwrap().sign, Sign::Pisces);
        assert_eq!(ZodiacMapper.map(405.0).unwrap().sign, Sign::Taurus);
        assert_eq!(ZodiacMapper.map(-1e-15).unwrap().sign_index, 0);
    }

    #[test]
    fn test_map_rejects_non_finite() {
        let err = ZodiacMapper.map(f64::NAN).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(ZodiacMapper.map(f64::INFINITY).is_err());
    }

    #[test]
    fn test_sign_and_degree_ranges() {
        let mut lon = -720.0;
        while lon < 720.0 {
            let p = ZodiacMapper.map(lon).unwrap();
            assert!(p.sign_index <= 11);
            assert!(p.degree_in_sign >= 0.0 && p.degree_in_sign < 30.0);
            lon += 0.37;
        }
    }
}

use crate::houses::types::HouseInconsistency;
use crate::zodiac::normalize_degrees;

pub const HOUSE_COUNT: usize = 12;

/// House used when no interval contains a longitude.
pub const FALLBACK_HOUSE: u8 = 1;

/// Places longitudes into the 12 houses delimited by a cusp set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseAssigner;

impl HouseAssigner {
    pub fn new() -> Self {
        Self
    }

    /// House number (1..=12) whose half-open interval `[cusp_i, cusp_{i+1})`
    /// contains `longitude`. House 12 closes on cusp 1.
    ///
    /// A longitude sitting exactly on a cusp belongs to the house starting
    /// there. Intervals whose start is greater than their end cross 0° Aries.
    ///
    /// Linear scan over the fixed 12 houses; a sorted-interval binary search
    /// would replace it if the house count ever became variable.
    pub fn assign(&self, longitude: f64, cusps: &[f64; HOUSE_COUNT]) -> Result<u8, HouseInconsistency> {
        let lon = normalize_degrees(longitude);

        for i in 0..HOUSE_COUNT {
            let start = cusps[i];
            let end = cusps[(i + 1) % HOUSE_COUNT];

            let contains = if start <= end {
                start <= lon && lon < end
            } else {
                lon >= start || lon < end
            };
            if contains {
                return Ok((i + 1) as u8);
            }
        }

        Err(HouseInconsistency {
            longitude: lon,
            cusps: *cusps,
            fallback_house: FALLBACK_HOUSE,
        })
    }

    /// Like [`assign`](Self::assign) but always yields a house, returning the
    /// inconsistency alongside the fallback so the caller can report it.
    pub fn assign_or_fallback(&self, longitude: f64, cusps: &[f64; HOUSE_COUNT]) -> (u8, Option<HouseInconsistency>) {
        match self.assign(longitude, cusps) {
            Ok(house) => (house, None),
            Err(inconsistency) => (inconsistency.fallback_house, Some(inconsistency)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EQUAL_FROM_ARIES: [f64; 12] =
        [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0];

    // Placidus-like set with house 12 crossing 0°
    const WRAPPING: [f64; 12] =
        [15.5, 42.0, 71.3, 100.8, 131.0, 163.9, 195.5, 222.0, 251.3, 280.8, 311.0, 343.9];

    #[test]
    fn test_direct_intervals() {
        let a = HouseAssigner;
        assert_eq!(a.assign(0.0, &EQUAL_FROM_ARIES).unwrap(), 1);
        assert_eq!(a.assign(29.999, &EQUAL_FROM_ARIES).unwrap(), 1);
        assert_eq!(a.assign(45.0, &EQUAL_FROM_ARIES).unwrap(), 2);
        assert_eq!(a.assign(359.9, &EQUAL_FROM_ARIES).unwrap(), 12);
    }

    #[test]
    fn test_cusp_belongs_to_starting_house() {
        let a = HouseAssigner;
        assert_eq!(a.assign(30.0, &EQUAL_FROM_ARIES).unwrap(), 2);
        assert_eq!(a.assign(42.0, &WRAPPING).unwrap(), 2);
        assert_eq!(a.assign(343.9, &WRAPPING).unwrap(), 12);
        assert_eq!(a.assign(15.5, &WRAPPING).unwrap(), 1);
    }

    #[test]
    fn test_wraparound_interval() {
        let a = HouseAssigner;
        assert_eq!(a.assign(350.0, &WRAPPING).unwrap(), 12);
        assert_eq!(a.assign(0.0, &WRAPPING).unwrap(), 12);
        assert_eq!(a.assign(15.4, &WRAPPING).unwrap(), 12);
        assert_eq!(a.assign(-5.0, &WRAPPING).unwrap(), 12);
        assert_eq!(a.assign(375.0, &WRAPPING).unwrap(), 12);
    }

    #[test]
    fn test_malformed_cusps_fall_back() {
        let a = HouseAssigner;
        let degenerate = [100.0; 12];
        let err = a.assign(50.0, &degenerate).unwrap_err();
        assert_eq!(err.fallback_house, 1);
        assert_eq!(err.longitude, 50.0);

        let (house, issue) = a.assign_or_fallback(50.0, &degenerate);
        assert_eq!(house, 1);
        assert!(issue.is_some());

        let (house, issue) = a.assign_or_fallback(50.0, &EQUAL_FROM_ARIES);
        assert_eq!(house, 2);
        assert!(issue.is_none());
    }
}

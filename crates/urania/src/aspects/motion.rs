//! Applying / separating classification.
//!
//! This is a heuristic on relative angular velocity along the ecliptic. It
//! does not model simultaneous retrogrades, stations or near-zero relative
//! speed, and should be presented as an approximation rather than a
//! prediction of when the aspect perfects.

/// True when the aspect is applying (moving towards exact).
///
/// `separation` is the folded angular distance (0..=180) and `target_angle`
/// the aspect's exact angle. Below the target the pair must be closing
/// (negative relative speed); at or above it, opening.
pub fn is_applying(speed_first: f64, speed_second: f64, separation: f64, target_angle: f64) -> bool {
    let relative_speed = speed_first - speed_second;
    if separation < target_angle {
        relative_speed < 0.0
    } else {
        relative_speed > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_below_target_with_positive_relative_speed_separates() {
        assert!(!is_applying(1.0, 0.5, 88.0, 90.0));
    }

    #[test]
    fn test_below_target_closing_applies() {
        assert!(is_applying(0.5, 1.0, 88.0, 90.0));
    }

    #[test]
    fn test_above_target() {
        assert!(is_applying(13.0, 1.0, 122.0, 120.0));
        assert!(!is_applying(1.0, 13.0, 122.0, 120.0));
    }

    #[test]
    fn test_equal_speeds_never_apply() {
        assert!(!is_applying(1.0, 1.0, 5.0, 0.0));
        assert!(!is_applying(1.0, 1.0, 85.0, 90.0));
    }
}

use crate::error::{MarantzError, Result};
use crate::types::{Decibel, VolumeLevel};

/// Linear mapping between receiver decibels and a 0..1 volume level
///
/// Neither direction clamps: decibels outside the configured bounds map
/// outside 0..1 and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeScale {
    min: i32,
    max: i32,
}

impl VolumeScale {
    /// Create a scale for the given decibel bounds
    ///
    /// Fails when the bounds are equal, since the span is used as a divisor.
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min == max {
            return Err(MarantzError::InvalidConfig(format!(
                "min_volume and max_volume must differ (both {})",
                min
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower decibel bound
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper decibel bound
    pub fn max(&self) -> i32 {
        self.max
    }

    fn span(&self) -> f64 {
        (f64::from(self.min) - f64::from(self.max)).abs()
    }

    /// Convert a decibel reading to a volume level
    pub fn decibel_to_fraction(&self, decibel: Decibel) -> VolumeLevel {
        (f64::from(self.min) - decibel).abs() / self.span()
    }

    /// Convert a volume level to the nearest decibel value
    ///
    /// Ties round to the even neighbour. Levels outside 0..1 are converted
    /// as given; results beyond the `i64` range saturate. NaN and infinite
    /// levels have no decibel value and are rejected.
    pub fn fraction_to_decibel(&self, fraction: VolumeLevel) -> Result<i64> {
        let offset = self.span() * fraction;
        if !offset.is_finite() {
            return Err(MarantzError::VolumeOutOfRange(fraction));
        }
        // `as` saturates for floats beyond i64
        Ok(i64::from(self.min).saturating_add(offset.round_ties_even() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_scale() -> VolumeScale {
        VolumeScale::new(-71, -1).unwrap()
    }

    #[test]
    fn test_equal_bounds_rejected() {
        assert!(matches!(
            VolumeScale::new(-20, -20),
            Err(MarantzError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_decibel_to_fraction_endpoints() {
        let scale = default_scale();
        assert_eq!(scale.decibel_to_fraction(-71.0), 0.0);
        assert_eq!(scale.decibel_to_fraction(-1.0), 1.0);
        assert!((scale.decibel_to_fraction(-36.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fraction_to_decibel_endpoints() {
        let scale = default_scale();
        assert_eq!(scale.fraction_to_decibel(0.0).unwrap(), -71);
        assert_eq!(scale.fraction_to_decibel(1.0).unwrap(), -1);
        assert_eq!(scale.fraction_to_decibel(0.5).unwrap(), -36);
    }

    #[test]
    fn test_out_of_range_is_not_clamped() {
        let scale = default_scale();
        assert!(scale.decibel_to_fraction(10.0) > 1.0);
        assert_eq!(scale.fraction_to_decibel(1.5).unwrap(), 34);
        assert_eq!(scale.fraction_to_decibel(-0.5).unwrap(), -106);
    }

    #[test]
    fn test_extreme_fractions_keep_sign() {
        let scale = default_scale();
        assert_eq!(scale.fraction_to_decibel(-1e10).unwrap(), -700_000_000_071);
        assert_eq!(scale.fraction_to_decibel(1e10).unwrap(), 699_999_999_929);
        assert_eq!(scale.fraction_to_decibel(-1e300).unwrap(), i64::MIN);
        assert_eq!(scale.fraction_to_decibel(1e300).unwrap(), i64::MAX - 71);

        let scale = VolumeScale::new(1, 10).unwrap();
        assert_eq!(scale.fraction_to_decibel(1e10).unwrap(), 90_000_000_001);
        assert_eq!(scale.fraction_to_decibel(-1e10).unwrap(), -89_999_999_999);
        assert_eq!(scale.fraction_to_decibel(1e300).unwrap(), i64::MAX);
        assert_eq!(scale.fraction_to_decibel(-1e300).unwrap(), i64::MIN + 1);
    }

    #[test]
    fn test_non_finite_fractions_rejected() {
        for scale in [default_scale(), VolumeScale::new(1, 10).unwrap()] {
            for fraction in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                assert!(matches!(
                    scale.fraction_to_decibel(fraction),
                    Err(MarantzError::VolumeOutOfRange(_))
                ));
            }
        }
    }

    #[test]
    fn test_rounding_ties_to_even() {
        let scale = VolumeScale::new(0, 3).unwrap();
        assert_eq!(scale.fraction_to_decibel(0.5).unwrap(), 2);
        let scale = VolumeScale::new(0, 5).unwrap();
        assert_eq!(scale.fraction_to_decibel(0.5).unwrap(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_fraction_in_unit_range(db in -71i32..=-1) {
            let fraction = default_scale().decibel_to_fraction(f64::from(db));
            prop_assert!((0.0..=1.0).contains(&fraction));
        }

        #[test]
        fn prop_fraction_monotonic(a in -71i32..=-1, b in -71i32..=-1) {
            let scale = default_scale();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                scale.decibel_to_fraction(f64::from(lo)) <= scale.decibel_to_fraction(f64::from(hi))
            );
        }

        #[test]
        fn prop_round_trip_within_one(min in -100i32..0, width in 1i32..100, offset in 0i32..100) {
            let max = min + width;
            let db = min + offset % (width + 1);
            let scale = VolumeScale::new(min, max).unwrap();
            let back = scale.fraction_to_decibel(scale.decibel_to_fraction(f64::from(db))).unwrap();
            prop_assert!((back - i64::from(db)).abs() <= 1, "{} -> {}", db, back);
        }
    }
}

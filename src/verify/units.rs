/// Conversion from the document's native length units.
///
/// PresentationML measures long distances in English Metric Units and font
/// sizes in EMU font units. The divisors are exact; any deviation shows up
/// as a measurable mismatch against reference decks.

/// EMUs per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// EMUs per point.
pub const EMU_PER_POINT: f64 = 12_700.0;

/// Convert EMUs to inches.
#[inline]
pub fn emu_to_inches(value: i64) -> f64 {
    value as f64 / EMU_PER_INCH
}

/// Convert EMU font units to points.
#[inline]
pub fn emu_to_points(value: i64) -> f64 {
    value as f64 / EMU_PER_POINT
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_divisors() {
        assert!((emu_to_inches(914_400) - 1.0).abs() < 1e-9);
        assert!((emu_to_inches(457_200) - 0.5).abs() < 1e-9);
        assert!((emu_to_points(12_700) - 1.0).abs() < 1e-9);
        assert!((emu_to_points(228_600) - 18.0).abs() < 1e-9);
        assert_eq!(emu_to_inches(0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_inches_match_divisor(v in -10_000_000_000i64..10_000_000_000i64) {
            prop_assert!((emu_to_inches(v) - v as f64 / 914_400.0).abs() < 1e-9);
        }

        #[test]
        fn prop_points_match_divisor(v in -10_000_000_000i64..10_000_000_000i64) {
            prop_assert!((emu_to_points(v) - v as f64 / 12_700.0).abs() < 1e-9);
        }
    }
}

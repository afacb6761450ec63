use fixed::types::I16F16;

/// Q16.16 fixed-point used for paint and sticker wear.
pub type Fixed32 = I16F16;

/// Simulated time in milliseconds. Never compared against a wall clock.
pub type Millis = u64;

/// Convert an f32 to Fixed32. Use only for initialization and configuration.
/// NaN maps to zero; out-of-range values saturate.
#[inline]
pub fn f32_to_fixed32(v: f32) -> Fixed32 {
    if v.is_nan() {
        return Fixed32::ZERO;
    }
    Fixed32::saturating_from_num(v)
}

/// Convert Fixed32 to f32. Use only for display.
#[inline]
pub fn fixed32_to_f32(v: Fixed32) -> f32 {
    v.to_num::<f32>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed32_round_trip_exact_values() {
        assert_eq!(fixed32_to_f32(f32_to_fixed32(0.5)), 0.5);
        assert_eq!(fixed32_to_f32(f32_to_fixed32(1.25)), 1.25);
    }

    #[test]
    fn fixed32_accumulation_is_deterministic() {
        let step = f32_to_fixed32(0.12);
        let mut a = Fixed32::ZERO;
        let mut b = Fixed32::ZERO;
        for _ in 0..9 {
            a += step;
            b += step;
        }
        assert_eq!(a, b);
        assert!(a > Fixed32::ONE);
    }

    #[test]
    fn nan_maps_to_zero() {
        assert_eq!(f32_to_fixed32(f32::NAN), Fixed32::ZERO);
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(f32_to_fixed32(1.0e9), Fixed32::MAX);
        assert_eq!(f32_to_fixed32(-1.0e9), Fixed32::MIN);
    }
}

//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn count_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(f64::MAX)
}

/// Convert a door count to f64.
#[must_use]
pub fn doors_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Ratio of two counts, returning 0.0 when the denominator is zero.
#[must_use]
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    count_to_f64(numerator) / count_to_f64(denominator)
}

/// Widen a door count to `usize` for indexing.
#[must_use]
pub fn doors_to_usize(value: u32) -> usize {
    cast::<u32, usize>(value).unwrap_or(usize::MAX)
}

/// Round a f64 and clamp it to `0..=max`, returning 0 for NaN values.
#[must_use]
pub fn round_to_index(value: f64, max: usize) -> usize {
    if value.is_nan() {
        return 0;
    }
    let upper = count_to_f64(max);
    let clamped = value.round().clamp(0.0, upper);
    cast::<f64, usize>(clamped).unwrap_or(0).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_handles_zero_denominator() {
        assert!(ratio(3, 0).abs() < f64::EPSILON);
        assert!((ratio(1, 4) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn conversions_are_exact_for_small_counts() {
        assert!((count_to_f64(10_000) - 10_000.0).abs() < f64::EPSILON);
        assert_eq!(doors_to_usize(7), 7);
        assert!((doors_to_f64(3) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn round_to_index_clamps_and_handles_nan() {
        assert_eq!(round_to_index(2.6, 10), 3);
        assert_eq!(round_to_index(-4.0, 10), 0);
        assert_eq!(round_to_index(40.0, 10), 10);
        assert_eq!(round_to_index(f64::NAN, 10), 0);
    }
}

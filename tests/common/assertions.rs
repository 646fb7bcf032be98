//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point comparisons.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that two tick arrays are approximately element-wise equal.
///
/// # Panics
///
/// Panics if the arrays have different lengths or if any element-wise comparison fails.
pub fn assert_ticks_approx_eq(actual: &[f64], expected: &[f64]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Tick arrays have different lengths: actual = {:?}, expected = {:?}",
        actual,
        expected
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() <= DEFAULT_EPSILON,
            "Ticks differ at index {}: actual = {:?}, expected = {:?}",
            i,
            actual,
            expected
        );
    }
}

/// Assert that every tick lies inside the closed range and the ticks ascend
pub fn assert_ticks_within(ticks: &[f64], min: f64, max: f64) {
    for &tick in ticks {
        assert!(
            tick >= min - DEFAULT_EPSILON && tick <= max + DEFAULT_EPSILON,
            "Tick {} not in range [{}, {}]",
            tick,
            min,
            max
        );
    }
    assert!(
        ticks.windows(2).all(|w| w[0] < w[1]),
        "Ticks are not strictly ascending: {:?}",
        ticks
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(0.1 + 0.2, 0.3, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_ticks() {
        assert_ticks_approx_eq(&[0.0, 0.2, 0.4], &[0.0, 0.1 + 0.1, 0.4]);
        assert_ticks_within(&[40.0, 50.0, 60.0], 40.0, 60.0);
    }
}

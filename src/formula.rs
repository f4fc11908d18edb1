//! The closed-form magic constant `S(n, d, a) = n·a + n(n^d - 1)/2`.

/// The magic constant of an order-`n`, dimension-`d` magic hypercube whose smallest entry is `a`
/// and whose entries are `a, a+1, ..., a + n^d - 1`.
///
/// Any line through the hypercube holds `n` entries, and there are `n^(d-1)` disjoint lines in
/// each direction, so each line sums to `n·a + n(n^d - 1)/2`.
///
/// The order isn't checked: even orders and `d = 1` just evaluate the formula.
pub fn magic_constant(n: u32, d: u32, a: f64) -> f64 {
    let n_f = n as f64;
    n_f * a + n_f * (exact_pow(n, d) - 1.0) / 2.0
}

/// The textbook constant `n(n² + 1)/2` for a square holding `1..=n²`. Same as
/// `magic_constant(n, 2, 1.0)`.
pub fn classical_magic_constant(n: u32) -> f64 {
    let n_f = n as f64;
    n_f * (n_f * n_f + 1.0) / 2.0
}

/// How much the constant grows when going from dimension `d` to `d + 1`: `n^d · n(n-1)/2`. Doesn't
/// depend on the starting value.
pub fn dimension_step(n: u32, d: u32) -> f64 {
    let n_f = n as f64;
    exact_pow(n, d) * n_f * (n_f - 1.0) / 2.0
}

// Integer power when it fits, so that `n^d - 1` doesn't lose the `- 1`.
fn exact_pow(n: u32, d: u32) -> f64 {
    match (n as u128).checked_pow(d) {
        Some(pow) => pow as f64,
        None => (n as f64).powf(d as f64),
    }
}

#[cfg(test)]
const TOLERANCE: f64 = 1e-10;

#[test]
fn test_classical_case() {
    for n in [3, 5, 7, 9] {
        let classical = classical_magic_constant(n);
        let general = magic_constant(n, 2, 1.0);
        assert!(
            (classical - general).abs() < TOLERANCE,
            "n={}: classical={} general={}",
            n,
            classical,
            general
        );
    }
}

#[test]
fn test_known_values() {
    let cases: &[(u32, u32, f64, f64)] = &[
        (3, 2, 1.0, 15.0),
        (3, 2, 100.0, 312.0),
        (5, 3, 500.5, 2812.5),
        (4, 2, 50.0, 230.0),
        (3, 3, 1.0, 42.0),
        (5, 2, 500.5, 2562.5),
    ];
    for &(n, d, a, expected) in cases {
        let result = magic_constant(n, d, a);
        assert!(
            (result - expected).abs() < TOLERANCE,
            "S({},{},{}) = {}, expected {}",
            n,
            d,
            a,
            result,
            expected
        );
    }
}

#[test]
fn test_negative_start() {
    assert!((magic_constant(3, 2, -5.0) - -3.0).abs() < TOLERANCE);
    assert!((magic_constant(5, 2, -100.0) - -440.0).abs() < TOLERANCE);
}

#[test]
fn test_zero_start() {
    for (n, d, expected) in [(3, 2, 12.0), (4, 2, 30.0), (3, 3, 39.0)] {
        let result = magic_constant(n, d, 0.0);
        assert!((result - expected).abs() < TOLERANCE);
        let simplified = n as f64 * ((n as f64).powi(d as i32) - 1.0) / 2.0;
        assert!((result - simplified).abs() < TOLERANCE);
    }
}

#[test]
fn test_dimension_monotonic() {
    let (n, a) = (3, 1.0);
    let s2 = magic_constant(n, 2, a);
    let s3 = magic_constant(n, 3, a);
    let s4 = magic_constant(n, 4, a);
    assert!(s3 > s2);
    assert!(s4 > s3);
    assert_eq!(s3 - s2, dimension_step(n, 2));
    assert_eq!(s4 - s3, dimension_step(n, 3));
}

#[test]
fn test_large_power_is_exact() {
    // 21^9 is above 2^39; the `- 1` must survive.
    assert_eq!(magic_constant(21, 9, 0.0), 21.0 * (794280046581.0 - 1.0) / 2.0);
    // Overflows u128, falls back to floating point.
    assert!(magic_constant(1000, 20, 0.0).is_finite());
    assert!(magic_constant(1000, 21, 0.0) > magic_constant(1000, 20, 0.0));
}

#[test]
fn test_huge_dimension() {
    // Dimensions past i32::MAX must not wrap around to a tiny power.
    let low = magic_constant(2, 3_000_000_000, 0.0);
    let high = magic_constant(2, 3_000_000_001, 0.0);
    assert!(low.is_infinite() && low > 0.0, "got {}", low);
    assert!(high.is_infinite() && high > 0.0, "got {}", high);
    assert!(magic_constant(2, 200, 0.0) > magic_constant(2, 199, 0.0));
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn linear_in_start(n in 1u32..20, d in 1u32..6, a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let slope = (magic_constant(n, d, a) - magic_constant(n, d, b)) / n as f64;
            prop_assert!((slope - (a - b)).abs() <= 1e-6 * (1.0 + (a - b).abs()));
        }

        #[test]
        fn grows_with_dimension(n in 2u32..20, d in 1u32..8, a in -1e6f64..1e6) {
            prop_assert!(magic_constant(n, d + 1, a) > magic_constant(n, d, a));
        }
    }
}

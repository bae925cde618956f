//! Floating-point comparison helpers.

/// Default number of machine epsilons tolerated by [`close`].
pub const DEFAULT_ULPS: u32 = 42;

/// Returns true if `x` and `y` agree within `DEFAULT_ULPS` relative epsilons.
///
/// Used by the interpolators to accept query points that sit on a boundary
/// knot up to rounding noise.
#[must_use]
pub fn close(x: f64, y: f64) -> bool {
    close_n(x, y, DEFAULT_ULPS)
}

/// Returns true if `x` and `y` agree within `n` relative epsilons.
///
/// When either argument is zero the comparison falls back to an absolute
/// tolerance of `(n * EPSILON)^2`.
#[must_use]
pub fn close_n(x: f64, y: f64, n: u32) -> bool {
    if x == y {
        return true;
    }

    let diff = (x - y).abs();
    let tolerance = f64::from(n) * f64::EPSILON;

    if x * y == 0.0 {
        return diff < tolerance * tolerance;
    }

    diff <= tolerance * x.abs() && diff <= tolerance * y.abs()
}

/// Returns true if `x` lies in `[min, max]`, accepting rounding noise at
/// either end.
#[must_use]
pub fn within(x: f64, min: f64, max: f64) -> bool {
    (x >= min && x <= max) || close(x, min) || close(x, max)
}

//! Linear algebra utilities.
//!
//! Spline fitting only ever needs banded systems, so this module is limited
//! to the tridiagonal solver used by [`crate::interpolation::CubicInterpolation`].

use crate::error::{MathError, MathResult};

/// Solves a tridiagonal system of equations efficiently.
///
/// The system has the form:
/// ```text
/// | b[0]  c[0]   0    ...   0   | | x[0]   |   | d[0]   |
/// | a[0]  b[1]  c[1]  ...   0   | | x[1]   |   | d[1]   |
/// |  0    a[1]  b[2]  ...   0   | | x[2]   | = | d[2]   |
/// | ...   ...   ...   ...  ...  | | ...    |   | ...    |
/// |  0     0     0   a[n-2] b[n-1] | | x[n-1] |   | d[n-1] |
/// ```
///
/// Uses the Thomas algorithm (forward elimination followed by back
/// substitution), O(n). No pivoting is performed; spline systems are
/// diagonally dominant in the interior.
///
/// # Arguments
///
/// * `a` - Lower diagonal (length n-1)
/// * `b` - Main diagonal (length n)
/// * `c` - Upper diagonal (length n-1)
/// * `d` - Right-hand side (length n)
///
/// # Returns
///
/// Solution vector x.
///
/// # Example
///
/// ```rust
/// use knotwork_math::linear_algebra::solve_tridiagonal;
///
/// let x = solve_tridiagonal(&[1.0], &[2.0, 2.0], &[1.0], &[3.0, 3.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-15);
/// assert!((x[1] - 1.0).abs() < 1e-15);
/// ```
pub fn solve_tridiagonal(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> MathResult<Vec<f64>> {
    let n = b.len();

    if n == 0 {
        return Ok(vec![]);
    }

    if a.len() != n - 1 || c.len() != n - 1 || d.len() != n {
        return Err(MathError::invalid_input(
            "Tridiagonal system has inconsistent dimensions",
        ));
    }

    if b[0] == 0.0 {
        return Err(MathError::SingularMatrix);
    }

    // Forward elimination
    let mut c_prime = vec![0.0; n];
    let mut x = vec![0.0; n];

    let mut pivot = b[0];
    x[0] = d[0] / pivot;

    for i in 1..n {
        c_prime[i] = c[i - 1] / pivot;
        pivot = b[i] - a[i - 1] * c_prime[i];
        if pivot == 0.0 {
            return Err(MathError::SingularMatrix);
        }
        x[i] = (d[i] - a[i - 1] * x[i - 1]) / pivot;
    }

    // Back substitution
    for i in (0..n - 1).rev() {
        x[i] -= c_prime[i + 1] * x[i + 1];
    }

    Ok(x)
}

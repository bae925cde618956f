//! Integration tests validated against reference spline behaviour.
//!
//! The datasets are the classic ones used to stress-test interpolation
//! libraries: a Gaussian bump (smooth, even), a parabola with known end
//! derivatives, and the RPN15A sigmoid (where unconstrained splines
//! overshoot).

use knotwork_math::interpolation::{
    BackwardFlat, BoundaryCondition, CubicInterpolation, DerivativeApprox, ForwardFlat,
    Interpolator, LinearInterpolator,
};
use knotwork_math::MathError;

// ============================================================================
// Test Data
// ============================================================================

/// `n` equally spaced points from `start` to `finish` inclusive.
fn x_range(start: f64, finish: f64, n: usize) -> Vec<f64> {
    let dx = finish - start;
    (0..n)
        .map(|i| start + dx * i as f64 / (n - 1) as f64)
        .collect()
}

fn gaussian(xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|x| (-x * x).exp()).collect()
}

fn parabolic(xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|x| -x * x).collect()
}

const RPN15A_X: [f64; 9] = [7.99, 8.09, 8.19, 8.7, 9.2, 10.0, 12.0, 15.0, 20.0];
const RPN15A_Y: [f64; 9] = [
    0.0, 2.76429e-5, 4.37498e-2, 0.169183, 0.469428, 0.943740, 0.998636, 0.999919, 0.999994,
];

fn spline(
    xs: &[f64],
    ys: &[f64],
    monotonic: bool,
    left: BoundaryCondition,
    right: BoundaryCondition,
) -> CubicInterpolation {
    CubicInterpolation::new(
        xs.to_vec(),
        ys.to_vec(),
        DerivativeApprox::Spline,
        monotonic,
        left,
        right,
    )
    .unwrap()
}

fn check_reproduction(interp: &CubicInterpolation, xs: &[f64], ys: &[f64], tolerance: f64) {
    for (x, y) in xs.iter().zip(ys) {
        let error = (interp.value(*x).unwrap() - y).abs();
        assert!(
            error <= tolerance,
            "value({}) = {}, expected {} (error {:e})",
            x,
            interp.value(*x).unwrap(),
            y,
            error
        );
    }
}

fn check_not_a_knot(interp: &CubicInterpolation) {
    let c = interp.c_coefficients();
    let n = c.len();
    let left = (c[0] - c[1]).abs();
    let right = (c[n - 1] - c[n - 2]).abs();
    assert!(left < 1e-14, "left not-a-knot mismatch {:e}", left);
    assert!(right < 1e-14, "right not-a-knot mismatch {:e}", right);
}

// ============================================================================
// Gaussian Data
// ============================================================================

#[test]
fn test_gaussian_not_a_knot() {
    let xs = x_range(-1.8, 1.8, 9);
    let ys = gaussian(&xs);

    let interp = spline(
        &xs,
        &ys,
        false,
        BoundaryCondition::NotAKnot,
        BoundaryCondition::NotAKnot,
    );

    check_reproduction(&interp, &xs, &ys, 2e-15);
    check_not_a_knot(&interp);
}

#[test]
fn test_gaussian_symmetry() {
    let xs = x_range(-1.8, 1.8, 9);
    let ys = gaussian(&xs);

    let interp = spline(
        &xs,
        &ys,
        false,
        BoundaryCondition::NotAKnot,
        BoundaryCondition::NotAKnot,
    );

    let mut x = xs[0];
    while x < 0.0 {
        let left = interp.value(x).unwrap();
        let right = interp.value(-x).unwrap();
        assert!(
            (left - right).abs() <= 1e-15,
            "asymmetry at {}: {} vs {}",
            x,
            left,
            right
        );
        x += 0.1;
    }
}

#[test]
fn test_gaussian_every_end_condition_reproduces_knots() {
    let xs = x_range(-1.8, 1.8, 9);
    let ys = gaussian(&xs);

    let ends = [
        BoundaryCondition::NotAKnot,
        BoundaryCondition::NATURAL,
        BoundaryCondition::FirstDerivative(0.0),
        BoundaryCondition::Lagrange,
    ];
    for left in ends {
        for right in ends {
            for monotonic in [false, true] {
                let interp = spline(&xs, &ys, monotonic, left, right);
                check_reproduction(&interp, &xs, &ys, 2e-15);
            }
        }
    }
}

// ============================================================================
// End Derivatives On A Parabola
// ============================================================================

#[test]
fn test_parabola_end_derivatives() {
    let xs = x_range(-2.0, 2.0, 4);
    let ys = parabolic(&xs);

    let cases = [
        (BoundaryCondition::NotAKnot, BoundaryCondition::NotAKnot),
        (
            BoundaryCondition::FirstDerivative(4.0),
            BoundaryCondition::FirstDerivative(-4.0),
        ),
        (
            BoundaryCondition::SecondDerivative(-2.0),
            BoundaryCondition::SecondDerivative(-2.0),
        ),
    ];

    for monotonic in [false, true] {
        for (left, right) in cases {
            let interp = spline(&xs, &ys, monotonic, left, right);
            let label = format!("{} / {} (monotonic: {})", left, right, monotonic);

            let d_left = interp.derivative(-2.0).unwrap();
            let d_right = interp.derivative(2.0).unwrap();
            assert!((d_left - 4.0).abs() < 1e-14, "{}: left slope {}", label, d_left);
            assert!((d_right + 4.0).abs() < 1e-14, "{}: right slope {}", label, d_right);

            let c_left = interp.second_derivative(-2.0).unwrap();
            let c_right = interp.second_derivative(2.0).unwrap();
            assert!((c_left + 2.0).abs() < 1e-13, "{}: left curvature {}", label, c_left);
            assert!((c_right + 2.0).abs() < 1e-13, "{}: right curvature {}", label, c_right);
        }
    }
}

#[test]
fn test_parabola_filter_leaves_exact_slopes() {
    let xs = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
    let ys = parabolic(&xs);

    let interp = spline(
        &xs,
        &ys,
        true,
        BoundaryCondition::FirstDerivative(4.0),
        BoundaryCondition::FirstDerivative(-4.0),
    );

    assert!(interp.monotonicity_adjustments().iter().all(|adj| !adj));
    for x in &xs {
        assert!((interp.derivative(*x).unwrap() + 2.0 * x).abs() < 1e-15);
    }
}

// ============================================================================
// RPN15A Sigmoid
// ============================================================================

#[test]
fn test_rpn15a_overshoot_and_monotonic_fix() {
    let cases = [
        ("natural", BoundaryCondition::NATURAL, BoundaryCondition::NATURAL),
        (
            "clamped",
            BoundaryCondition::FirstDerivative(0.0),
            BoundaryCondition::FirstDerivative(0.0),
        ),
        (
            "not-a-knot",
            BoundaryCondition::NotAKnot,
            BoundaryCondition::NotAKnot,
        ),
    ];

    for (name, left, right) in cases {
        let plain = spline(&RPN15A_X, &RPN15A_Y, false, left, right);
        let value = plain.value(11.0).unwrap();
        assert!(value >= 1.0, "{} spline should overshoot, got {}", name, value);

        let filtered = spline(&RPN15A_X, &RPN15A_Y, true, left, right);
        let value = filtered.value(11.0).unwrap();
        assert!(value < 1.0, "monotonic {} spline overshoots: {}", name, value);

        check_reproduction(&filtered, &RPN15A_X, &RPN15A_Y, 2e-15);
    }
}

#[test]
fn test_rpn15a_monotonic_spline_is_non_decreasing() {
    let interp = spline(
        &RPN15A_X,
        &RPN15A_Y,
        true,
        BoundaryCondition::NotAKnot,
        BoundaryCondition::NotAKnot,
    );

    let mut previous = interp.value(RPN15A_X[0]).unwrap();
    let mut x = RPN15A_X[0];
    while x < 20.0 {
        let value = interp.value(x).unwrap();
        assert!(value >= previous - 1e-15, "decrease at {}", x);
        assert!(value <= 1.0, "overshoot at {}: {}", x, value);
        previous = value;
        x += 0.01;
    }
}

#[test]
fn test_rpn15a_local_schemes_stay_bounded() {
    for scheme in [
        DerivativeApprox::FritschButland,
        DerivativeApprox::Kruger,
        DerivativeApprox::Harmonic,
    ] {
        let interp = CubicInterpolation::new(
            RPN15A_X.to_vec(),
            RPN15A_Y.to_vec(),
            scheme,
            true,
            BoundaryCondition::default(),
            BoundaryCondition::default(),
        )
        .unwrap();
        assert!(interp.value(11.0).unwrap() < 1.0, "{} overshoots", scheme);
    }
}

// ============================================================================
// Flat Interpolants
// ============================================================================

#[test]
fn test_backward_flat_scenario() {
    let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let ys = vec![5.0, 4.0, 3.0, 2.0, 1.0];
    let interp = BackwardFlat::new(xs, ys).unwrap();

    assert_eq!(interp.value(1.5).unwrap(), 3.0);
    assert_eq!(interp.primitive(0.0).unwrap(), 0.0);
    assert_eq!(interp.primitive(1.0).unwrap(), 4.0);
}

#[test]
fn test_forward_flat_scenario() {
    let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let ys = vec![5.0, 4.0, 3.0, 2.0, 1.0];
    let interp = ForwardFlat::new(xs, ys).unwrap();

    assert_eq!(interp.value(1.5).unwrap(), 4.0);
    assert_eq!(interp.primitive(0.0).unwrap(), 0.0);
    assert_eq!(interp.primitive(1.0).unwrap(), 5.0);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_extrapolation_toggle() {
    let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let ys = vec![5.0, 4.0, 3.0, 2.0, 1.0];

    let mut flat = BackwardFlat::new(xs.clone(), ys.clone()).unwrap();
    let mut cubic = CubicInterpolation::natural(xs, ys).unwrap();

    assert!(matches!(
        flat.value(5.0),
        Err(MathError::ExtrapolationNotAllowed { .. })
    ));
    assert!(matches!(
        cubic.primitive(-0.5),
        Err(MathError::ExtrapolationNotAllowed { .. })
    ));

    flat.enable_extrapolation();
    cubic.enable_extrapolation();

    assert_eq!(flat.value(5.0).unwrap(), 1.0);
    // The data is a straight line, so the boundary cubic continues it
    assert!((cubic.value(-0.5).unwrap() - 5.5).abs() < 1e-12);
}

/// Composite Simpson rule on `value`; exact for the cubic pieces used here.
fn simpson(interp: &dyn Interpolator, a: f64, b: f64) -> f64 {
    let panels = 64;
    let h = (b - a) / f64::from(panels);
    let mut sum = interp.value(a).unwrap() + interp.value(b).unwrap();
    for k in 1..panels {
        let weight = if k % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * interp.value(a + h * f64::from(k)).unwrap();
    }
    sum * h / 3.0
}

#[test]
fn test_extrapolated_primitive_matches_extrapolated_value() {
    let xs = vec![0.0, 1.0, 2.5, 3.0, 4.0];
    let ys = vec![1.0, 3.0, 2.0, 4.5, 4.0];

    let interpolators: Vec<(&str, Box<dyn Interpolator>)> = vec![
        (
            "linear",
            Box::new(LinearInterpolator::new(xs.clone(), ys.clone()).unwrap()),
        ),
        (
            "backward flat",
            Box::new(BackwardFlat::new(xs.clone(), ys.clone()).unwrap()),
        ),
        (
            "forward flat",
            Box::new(ForwardFlat::new(xs.clone(), ys.clone()).unwrap()),
        ),
        (
            "natural",
            Box::new(CubicInterpolation::natural(xs.clone(), ys.clone()).unwrap()),
        ),
        (
            "not-a-knot",
            Box::new(CubicInterpolation::not_a_knot(xs.clone(), ys.clone()).unwrap()),
        ),
        (
            "fritsch-butland",
            Box::new(
                CubicInterpolation::new(
                    xs.clone(),
                    ys.clone(),
                    DerivativeApprox::FritschButland,
                    true,
                    BoundaryCondition::NotAKnot,
                    BoundaryCondition::NotAKnot,
                )
                .unwrap(),
            ),
        ),
    ];

    for (name, mut interp) in interpolators {
        interp.enable_extrapolation();
        for (a, b) in [(-1.5, 0.0), (-1.0, -0.25), (4.0, 5.5), (4.5, 6.0)] {
            let integral = interp.primitive(b).unwrap() - interp.primitive(a).unwrap();
            let expected = simpson(interp.as_ref(), a, b);
            assert!(
                (integral - expected).abs() < 1e-12,
                "{}: primitive gives {} on [{}, {}], value integrates to {}",
                name,
                integral,
                a,
                b,
                expected
            );
        }
    }
}

#[test]
fn test_malformed_input_is_rejected() {
    let err = CubicInterpolation::natural(vec![0.0, 2.0, 1.0], vec![0.0; 3]).unwrap_err();
    assert!(err.is_invalid_input());

    let err = BackwardFlat::new(vec![0.0, 1.0], vec![0.0]).unwrap_err();
    assert!(err.is_invalid_input());

    let err = ForwardFlat::new(vec![0.0], vec![0.0]).unwrap_err();
    assert!(err.is_invalid_input());
}

extern crate pretty_env_logger;

use std::f64::consts::TAU;

use argus::dynamics::PointMass;
use argus::ephemeris::{
    AnalyticEphemeris, Ephemeris, EphemerisError, IntegratedEphemeris, SplineEphemeris,
    StateFunction,
};
use argus::linalg::{DMatrix, DVector, Matrix6};
use argus::polyfit::CubicSpline;
use argus::propagators::Propagator;

/// Spline through a unit circle traversed once over the provided period.
fn circle_spline(num: usize, period: f64) -> CubicSpline {
    let knots: Vec<f64> = (0..num)
        .map(|i| period * i as f64 / (num - 1) as f64)
        .collect();
    let values = DMatrix::from_fn(num, 3, |i, col| {
        let angle = TAU * knots[i] / period;
        match col {
            0 => angle.cos(),
            1 => angle.sin(),
            _ => 0.0,
        }
    });
    CubicSpline::periodic(knots, values).unwrap()
}

#[test]
fn analytic_ephemeris_follows_its_functions() {
    if pretty_env_logger::try_init().is_err() {
        println!("could not init env_logger");
    }

    // Unit harmonic oscillator in closed form
    let functions: Vec<StateFunction> =
        vec![Box::new(|t: f64| t.cos()), Box::new(|t: f64| -t.sin())];
    let mut ephem =
        AnalyticEphemeris::new(DVector::from_vec(vec![1.0, 0.0]), 0.1, functions).unwrap();

    assert_eq!(ephem.dim(), 2);

    let state = ephem.propagate(5).unwrap();
    assert!((ephem.elapsed() - 0.5).abs() < 1e-15);
    assert!((state[0] - 0.5_f64.cos()).abs() < 1e-15);
    assert!((state[1] + 0.5_f64.sin()).abs() < 1e-15);

    ephem.propagate(5).unwrap();
    assert!((ephem.elapsed() - 1.0).abs() < 1e-15);

    ephem.reset();
    assert_eq!(ephem.state(), &DVector::from_vec(vec![1.0, 0.0]));
    assert_eq!(ephem.elapsed(), 0.0);
}

#[test]
fn analytic_ephemeris_requires_one_function_per_variable() {
    let functions: Vec<StateFunction> =
        vec![Box::new(|t: f64| t.cos()), Box::new(|t: f64| t.sin())];
    let err = AnalyticEphemeris::new(DVector::zeros(3), 0.1, functions).unwrap_err();
    assert_eq!(
        err,
        EphemerisError::DimensionMismatch {
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn integrated_ephemeris_stays_on_the_circular_orbit() {
    let ic = DVector::from_vec(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    let setup = Propagator::default(PointMass { gm: 1.0 });
    let mut ephem = IntegratedEphemeris::new(ic.clone(), 0.1, setup);

    assert_eq!(ephem.dynamics().gm, 1.0);

    for _ in 0..10 {
        let state = ephem.propagate(1).unwrap();
        let radius = state.fixed_rows::<3>(0).norm();
        let speed = state.fixed_rows::<3>(3).norm();
        assert!((radius - 1.0).abs() < 1e-9, "radius drifted to {radius}");
        assert!((speed - 1.0).abs() < 1e-9, "speed drifted to {speed}");
    }
    assert!((ephem.elapsed() - 1.0).abs() < 1e-12);

    ephem.reset();
    assert_eq!(ephem.state(), &ic);
    assert_eq!(ephem.elapsed(), 0.0);
}

#[test]
fn spline_ephemeris_wraps_past_the_fitted_period() {
    let spline = circle_spline(65, TAU);
    let mut ephem = SplineEphemeris::new(spline, None, 1.0).unwrap();

    assert!((ephem.period() - TAU).abs() < 1e-15);
    assert!((ephem.state()[0] - 1.0).abs() < 1e-12);
    assert!(ephem.state()[1].abs() < 1e-12);

    // Seven steps of 1 TU run one full revolution and change.
    let state = ephem.propagate(7).unwrap();
    assert!((ephem.elapsed() - 7.0).abs() < 1e-15);
    assert!((state[0] - 7.0_f64.cos()).abs() < 1e-6);
    assert!((state[1] - 7.0_f64.sin()).abs() < 1e-6);

    ephem.reset();
    assert_eq!(ephem.elapsed(), 0.0);

    // No STM spline was provided.
    assert_eq!(ephem.eval_stm(1.0), Err(EphemerisError::StmUnset));
}

#[test]
fn stm_spline_is_fenced_to_one_period() {
    let period = 16.0;
    let num = 17;
    let knots: Vec<f64> = (0..num).map(|i| i as f64).collect();
    // A diagonal STM whose entries all oscillate with the orbit.
    let stm_values = DMatrix::from_fn(num, 36, |i, col| {
        if col % 7 == 0 {
            (TAU * knots[i] / period).cos()
        } else {
            0.0
        }
    });
    let stm_spline = CubicSpline::periodic(knots, stm_values).unwrap();

    let ephem =
        SplineEphemeris::new(circle_spline(num, period), Some(stm_spline), 1.0).unwrap();

    let at_start = ephem.eval_stm(0.0).unwrap();
    assert!((at_start - Matrix6::identity()).norm() < 1e-9);

    let half_way = ephem.eval_stm(8.0).unwrap();
    for d in 0..6 {
        assert!((half_way[(d, d)] + 1.0).abs() < 1e-9);
    }

    assert_eq!(
        ephem.eval_stm(17.0),
        Err(EphemerisError::StmWindowExceeded {
            requested: 17.0,
            period: 16.0
        })
    );
}

#[test]
fn malformed_stm_spline_is_rejected() {
    let three_cols = circle_spline(17, 16.0);
    let err = SplineEphemeris::new(three_cols.clone(), Some(three_cols), 1.0).unwrap_err();
    assert_eq!(err, EphemerisError::MalformedStm { columns: 3 });
}

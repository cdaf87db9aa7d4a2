extern crate pretty_env_logger;

use std::f64::consts::TAU;

use argus::dynamics::{Cr3bp, PointMass};
use argus::linalg::{DVector, Vector6};
use argus::propagators::*;

use approx::abs_diff_eq;
use rstest::*;

/// A unit radius circular orbit of a unit GM point mass, which closes on itself
/// every 2 pi TU.
#[fixture]
fn circular_orbit() -> DVector<f64> {
    DVector::from_vec(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
}

#[rstest]
fn adaptive_steps_close_the_circular_orbit(circular_orbit: DVector<f64>) {
    if pretty_env_logger::try_init().is_err() {
        println!("could not init env_logger");
    }

    let dynamics = PointMass { gm: 1.0 };
    let accuracy = 1e-12;

    {
        let setup = Propagator::dormand853(
            dynamics,
            IntegratorOptions::with_adaptive_step(
                1e-10,
                1e-1,
                accuracy,
                ErrorControl::RSSCartesianStep,
            ),
        );
        let mut prop = setup.with(circular_orbit.clone());
        let final_state = prop.for_duration(TAU).unwrap();
        assert!(
            abs_diff_eq!(final_state, circular_orbit, epsilon = 1e-8),
            "Dormand853 did not close the orbit: {}",
            (&final_state - &circular_orbit).norm()
        );
        assert!((prop.elapsed() - TAU).abs() < 1e-12);

        let details = prop.latest_details();
        assert!(details.step.abs() > 0.0);
        assert!(details.step.abs() <= 1e-1 + f64::EPSILON);
    }

    {
        let setup = Propagator::dormand45(
            dynamics,
            IntegratorOptions::with_adaptive_step(
                1e-10,
                1e-1,
                accuracy,
                ErrorControl::RSSCartesianStep,
            ),
        );
        let mut prop = setup.with(circular_orbit.clone());
        let final_state = prop.for_duration(TAU).unwrap();
        assert!(
            (&final_state - &circular_orbit).norm() < 1e-6,
            "Dormand45 did not close the orbit: {}",
            (&final_state - &circular_orbit).norm()
        );
    }
}

#[rstest]
fn fixed_step_rk4_closes_the_circular_orbit(circular_orbit: DVector<f64>) {
    let dynamics = PointMass { gm: 1.0 };
    let setup = Propagator::rk4(dynamics, IntegratorOptions::with_fixed_step(1e-3));
    let mut prop = setup.with(circular_orbit.clone());

    let final_state = prop.for_duration(TAU).unwrap();
    assert!((&final_state - &circular_orbit).norm() < 1e-8);
    assert!((prop.elapsed() - TAU).abs() < 1e-12);
    // The final step is shortened to land exactly on the requested duration.
    assert!(prop.latest_details().step <= 1e-3 + f64::EPSILON);
}

#[rstest]
fn backward_propagation_rewinds_the_state(circular_orbit: DVector<f64>) {
    let dynamics = PointMass { gm: 1.0 };
    let setup = Propagator::default(dynamics);
    let mut prop = setup.with(circular_orbit.clone());

    prop.for_duration(TAU / 2.0).unwrap();
    let rewound = prop.for_duration(-TAU / 2.0).unwrap();

    assert!(
        abs_diff_eq!(rewound, circular_orbit, epsilon = 1e-8),
        "backward propagation did not rewind: {}",
        (&rewound - &circular_orbit).norm()
    );
    assert!(prop.elapsed().abs() < 1e-12);
}

#[test]
fn cr3bp_conserves_the_jacobi_constant() {
    let dynamics = Cr3bp::earth_moon();
    // Librating near L4, which is stable for the Earth-Moon mass ratio.
    let init = DVector::from_vec(vec![
        0.5 - dynamics.mu,
        3.0_f64.sqrt() / 2.0,
        0.0,
        0.02,
        -0.015,
        0.01,
    ]);
    let c0 = dynamics.jacobi_constant(&Vector6::from_column_slice(init.as_slice()));

    let setup = Propagator::default(dynamics);
    let mut prop = setup.with(init);
    let final_state = prop.for_duration(10.0).unwrap();

    let c1 = dynamics.jacobi_constant(&Vector6::from_column_slice(final_state.as_slice()));
    assert!(
        (c1 - c0).abs() < 1e-9,
        "Jacobi constant drifted by {:e}",
        (c1 - c0).abs()
    );
}

#[test]
fn unresolvable_dynamics_exhaust_the_step_size() {
    // Grazing a unit GM point mass from nearly on top of it, where no allowed step
    // keeps the local error under the tolerance.
    let dynamics = PointMass { gm: 1.0 };
    let init = DVector::from_vec(vec![1e-4, 0.0, 0.0, 0.0, 0.0, 0.0]);

    let setup = Propagator::dormand853(
        dynamics,
        IntegratorOptions::with_adaptive_step(1e-2, 1e-1, 1e-12, ErrorControl::RSSStep),
    );
    let mut prop = setup.with(init);

    let err = prop.for_duration(1.0).unwrap_err();
    assert!(
        matches!(err, PropagationError::StepsExhausted { .. }),
        "expected a step exhaustion, got {err}"
    );
}

#[test]
fn zero_duration_is_a_no_op() {
    let dynamics = PointMass { gm: 1.0 };
    let setup = Propagator::default(dynamics);
    let init = DVector::from_vec(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    let mut prop = setup.with(init.clone());

    let state = prop.for_duration(0.0).unwrap();
    assert_eq!(state, init);
    assert_eq!(prop.elapsed(), 0.0);
}

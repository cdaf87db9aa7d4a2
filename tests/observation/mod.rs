extern crate pretty_env_logger;

use std::f64::consts::TAU;

use argus::cosmic::{EM_MASS_RATIO, OccultingBody};
use argus::linalg::{Vector3, Vector6};
use argus::md::Trajectory;
use argus::od::{ApparentMagConfig, ApparentMagModel, DummyModel, ObservationModel};

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

fn state_at(x: f64, y: f64, z: f64) -> Vector6<f64> {
    Vector6::new(x, y, z, 0.0, 0.0, 0.0)
}

#[test]
fn dummy_measurements_are_reproducible() {
    if pretty_env_logger::try_init().is_err() {
        println!("could not init env_logger");
    }

    let model = DummyModel::default();
    let truth = Vector6::new(0.5, 0.2, 0.1, 0.01, 0.02, 0.03);
    let observers = vec![state_at(0.0, 0.0, 0.0), state_at(1.0, 0.0, 0.0)];

    let first = model
        .measure(&truth, &observers, &mut Pcg64Mcg::new(101))
        .unwrap()
        .unwrap();
    let second = model
        .measure(&truth, &observers, &mut Pcg64Mcg::new(101))
        .unwrap()
        .unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);

    let reseeded = model
        .measure(&truth, &observers, &mut Pcg64Mcg::new(999))
        .unwrap()
        .unwrap();
    assert_ne!(first[0].observation, reseeded[0].observation);

    // Nobody to measure with.
    let none = model
        .measure(&truth, &[], &mut Pcg64Mcg::new(101))
        .unwrap();
    assert!(none.is_none());

    let avail = model.available_actions(&[truth, truth, truth], &observers);
    assert_eq!(avail.nrows(), 2);
    assert_eq!(avail.ncols(), 4);
    assert!(avail.iter().all(|&seen| seen));
}

#[test]
fn a_ring_around_the_moon_is_masked_by_its_body() {
    let moon = OccultingBody::Moon.position(EM_MASS_RATIO);
    let ring = Trajectory::circle(&Vector3::x(), &Vector3::y(), TAU, 0.015, 0.1, &moon);
    assert_eq!(ring.len(), 63);

    let truths: Vec<Vector6<f64>> = ring
        .positions()
        .iter()
        .map(|p| state_at(p.x, p.y, p.z))
        .collect();
    let observer = state_at(0.5, 0.0, 0.0);

    let model = ApparentMagModel::new(ApparentMagConfig::default(), 0.1).unwrap();
    let avail = model.available_actions(&truths, &[observer]);
    assert_eq!(avail.nrows(), 1);
    assert_eq!(avail.ncols(), 64);
    assert!(avail[(0, 0)]);

    // The first sample sits directly down range of the Moon.
    assert!(!avail[(0, 1)]);
    // Half a revolution later the target is between the observer and the Moon.
    assert!(avail[(0, 32)]);

    let visible = (1..avail.ncols()).filter(|&col| avail[(0, col)]).count();
    assert_eq!(visible, 54);
}

#[test]
fn observers_with_a_clear_line_fuse_their_measurements() {
    let model = ApparentMagModel::new(ApparentMagConfig::default(), 0.1).unwrap();
    let target = state_at(1.2, 1e-4, 0.0);
    let blind = state_at(0.5, 0.0, 0.0);
    let north = state_at(1.2, 0.5, 0.0);
    let south = state_at(1.2, -0.5, 0.0);

    let mut rng = Pcg64Mcg::seed_from_u64(7);
    let msrs = model
        .measure(&target, &[blind, north, south], &mut rng)
        .unwrap()
        .unwrap();
    assert_eq!(msrs.len(), 2);

    for msr in &msrs {
        let pos_err = (msr.observation - target).fixed_rows::<3>(0).norm();
        assert!(pos_err < 0.01, "noise out of family: {pos_err}");
        // Positions are pinned far more tightly than velocities.
        assert!(msr.information[(0, 0)] > msr.information[(3, 3)]);
        assert!(msr.information[(3, 3)] > 0.0);
    }
}

#[test]
fn the_solar_sweep_drives_the_phase_brightness() {
    let mut model = ApparentMagModel::new(ApparentMagConfig::default(), 0.1).unwrap();
    let observer = state_at(0.0, 1.0, 0.0);
    let target = state_at(0.0, 1.1, 0.0);

    let quadrature_mag = model.apparent_magnitude(&target, &observer).unwrap();

    // A quarter synodic revolution later the Sun sits behind the observer and the
    // target shows its fully lit face.
    model.advance(17).unwrap();
    let full_phase_mag = model.apparent_magnitude(&target, &observer).unwrap();
    assert!(
        full_phase_mag < quadrature_mag - 0.5,
        "expected a brighter target, got {full_phase_mag} against {quadrature_mag}"
    );

    model.reset();
    let rewound_mag = model.apparent_magnitude(&target, &observer).unwrap();
    assert!((rewound_mag - quadrature_mag).abs() < 1e-12);
}

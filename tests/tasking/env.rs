extern crate pretty_env_logger;

use argus::linalg::Vector3;
use argus::tasking::{AsymmetricGaussian, TaskingError, VisibilityMetric};

use super::colinear_env;

#[test]
fn an_episode_runs_to_its_horizon() {
    if pretty_env_logger::try_init().is_err() {
        println!("could not init env_logger");
    }

    let mut env = colinear_env(3, 2);
    assert_eq!(env.horizon(), 3);
    assert_eq!(env.num_targets(), 2);

    // Everyone starts piled up at the origin, in plain sight of each other.
    assert_eq!(env.available_actions(), vec![0, 1, 2]);

    let curve = AsymmetricGaussian::default();

    let step = env.step(1).unwrap();
    assert_eq!(step.observation.current_action, 1);
    assert_eq!(step.observation.repeats, 0);
    assert!((step.reward - curve.evaluate(0.0)).abs() < 1e-12);
    assert!(!step.terminated);
    assert!(!step.truncated);
    assert_eq!(step.info.tstep, 1);
    // One step up the diagonal the blocker hides every target.
    assert_eq!(step.info.available_actions, vec![0]);

    let step = env.step(0).unwrap();
    assert_eq!(step.reward, 0.0);
    assert_eq!(step.info.tstep, 2);
    assert_eq!(step.info.available_actions, vec![0, 1, 2]);

    let step = env.step(2).unwrap();
    assert!(step.terminated);
    assert!(!step.truncated);
    assert_eq!(step.info.tstep, 3);
    assert!(step.info.available_actions.is_empty());
    assert_eq!(step.info.action_history, vec![1, 0, 2]);

    assert!(env.is_terminated());
    assert!(env.action_mask().iter().all(|&allowed| !allowed));
    assert_eq!(
        env.step(0).unwrap_err(),
        TaskingError::EpisodeComplete { tstep: 3 }
    );
}

#[test]
fn masks_follow_the_blocker_geometry() {
    let mut env = colinear_env(4, 3);

    assert_eq!(env.available_actions(), vec![0, 1, 2, 3]);

    let step = env.step(1).unwrap();
    assert_eq!(step.info.available_actions, vec![0]);

    let mask = env.action_mask();
    assert_eq!(mask, vec![true, false, false, false]);

    // The target entries of the mask are the batch metric applied to the fleet.
    let metric = VisibilityMetric::LineOfSight {
        cutoff: 99.0,
        blocker: Vector3::new(1.7, 1.5, 1.1),
    };
    let observer = Vector3::new(1.0, 1.0, 1.0);
    let targets: Vec<Vector3<f64>> = (2..5)
        .map(|rate| rate as f64 * Vector3::new(1.0, 1.0, 1.0))
        .collect();
    assert_eq!(mask[1..], metric.apply_all(&observer, &targets)[..]);
}

#[test]
fn rewards_split_by_repeat_count_and_idleness() {
    let mut env = colinear_env(4, 3);
    let curve = AsymmetricGaussian::default();

    // Tasking a fresh target starts at the bottom of the ramp.
    let step = env.step(1).unwrap();
    assert_eq!(step.observation.repeats, 0);
    assert!((step.reward - curve.evaluate(0.0)).abs() < 1e-12);

    // Repeating it slides one step along the curve.
    let step = env.step(1).unwrap();
    assert_eq!(step.observation.repeats, 1);
    assert!((step.reward - curve.evaluate(1.0)).abs() < 1e-12);

    env.reset();

    // Idling with targets in sight is penalized.
    let step = env.step(0).unwrap();
    assert_eq!(step.reward, -1.0);

    // Idling when nothing else was possible is free.
    let step = env.step(0).unwrap();
    assert_eq!(step.reward, 0.0);
}

#[test]
fn reset_clears_the_history() {
    let mut env = colinear_env(3, 2);
    env.step(1).unwrap();
    env.step(0).unwrap();

    let (observation, info) = env.reset();
    assert_eq!(observation.current_action, 0);
    assert_eq!(observation.repeats, 0);
    assert_eq!(info.tstep, 0);
    assert_eq!(info.available_actions, vec![0, 1, 2]);
    assert!(info.action_history.is_empty());
    assert_eq!(env.tstep(), 0);
    assert!(!env.is_terminated());
}

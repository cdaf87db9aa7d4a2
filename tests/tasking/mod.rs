use argus::linalg::Vector3;
use argus::md::Trajectory;
use argus::tasking::{SpaceEnv, VisibilityMetric};

mod env;
mod metrics;
mod rewards;

/// Colinear fleet regression scenario: every position history climbs the [1, 1, 1]
/// diagonal, the agent at unit rate and target `i` at rate `i + 2`, with a blocker
/// parked just off the line. One step in, every target hides behind the blocker; one
/// step later they have all overtaken it.
pub(crate) fn colinear_env(horizon: usize, num_targets: usize) -> SpaceEnv {
    let ray = |rate: f64| {
        Trajectory::new(
            (0..horizon)
                .map(|t| rate * t as f64 * Vector3::new(1.0, 1.0, 1.0))
                .collect(),
        )
    };

    let agent = ray(1.0);
    let targets = (0..num_targets).map(|i| ray((i + 2) as f64)).collect();
    let metric = VisibilityMetric::LineOfSight {
        cutoff: 99.0,
        blocker: Vector3::new(1.7, 1.5, 1.1),
    };

    SpaceEnv::new(agent, targets, metric).unwrap()
}

use argus::cosmic::{EM_MASS_RATIO, OccultingBody};
use argus::linalg::Vector3;
use argus::tasking::VisibilityMetric;

#[test]
fn the_moon_shadows_its_far_side() {
    let moon = OccultingBody::Moon;
    let metric = VisibilityMetric::LineOfSight {
        cutoff: moon.mean_radius(),
        blocker: moon.position(EM_MASS_RATIO),
    };

    let observer = Vector3::new(0.5, 0.0, 0.0);
    let behind = Vector3::new(1.2, 1e-4, 0.0);
    let in_front = Vector3::new(0.9, 0.0, 0.0);

    assert!(!metric.apply(&observer, &behind));
    assert!(metric.apply(&observer, &in_front));
    assert_eq!(
        metric.apply_all(&observer, &[behind, in_front]),
        vec![false, true]
    );
}

#[test]
fn range_gates_a_drifting_target() {
    let metric = VisibilityMetric::Range { cutoff: 2.0 };
    let observer = Vector3::zeros();

    let drifting: Vec<Vector3<f64>> = (0..5).map(|t| Vector3::new(t as f64, 0.0, 0.0)).collect();
    // The cutoff itself is still in range.
    assert_eq!(
        metric.apply_all(&observer, &drifting),
        vec![true, true, true, false, false]
    );
}

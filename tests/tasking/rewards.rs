use argus::tasking::AsymmetricGaussian;

use super::colinear_env;

#[test]
fn the_default_curve_rewards_young_streaks_gently() {
    let curve = AsymmetricGaussian::default();

    assert_eq!(curve.evaluate(20.0), 5.0);
    assert!((curve.evaluate(0.0) - 2.312).abs() < 1e-3);
    assert!(curve.evaluate(1.0) > curve.evaluate(0.0));
    // Overshooting the peak costs far more than approaching it.
    assert!(curve.evaluate(25.0) < curve.evaluate(15.0));
}

#[test]
fn a_custom_curve_rescales_the_payout() {
    let flat = AsymmetricGaussian {
        mean: 0.0,
        peak: 7.0,
        baseline_left: 7.0,
        baseline_right: 7.0,
        sigma_left: 1.0,
        sigma_right: 1.0,
    };
    let mut env = colinear_env(3, 2).with_reward(flat);

    assert_eq!(env.step(1).unwrap().reward, 7.0);
    // Idle rewards are fixed, whatever the curve.
    assert_eq!(env.step(0).unwrap().reward, 0.0);
}

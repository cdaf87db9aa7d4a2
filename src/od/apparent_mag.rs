/*
    Argus, a sensor-tasking sandbox for cislunar space
    Copyright (C) 2023-onwards The Argus Developers <argus@posteo.org>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::f64::consts::PI;

use enum_iterator::all;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use snafu::{ensure, ResultExt};

use super::{ODConfigSnafu, ODError, ObservationModel, StateMsr, SunStateSnafu};
use crate::cosmic::{occludes, OccultingBody, AU_LU, EM_MASS_RATIO, LU, SUN_SYNODIC_RATE};
use crate::ephemeris::{AnalyticEphemeris, Ephemeris, StateFunction};
use crate::io::{ConfigError, ConfigRepr, InvalidConfigSnafu};
use crate::linalg::{DMatrix, DVector, Vector3, Vector6};

fn default_sun_mag() -> f64 {
    -26.74
}

fn default_aspec() -> f64 {
    0.1
}

fn default_adiff() -> f64 {
    0.2
}

fn default_diameter() -> f64 {
    // A ten meter object expressed in LU.
    10.0 / (LU * 1e3)
}

fn default_mu() -> f64 {
    EM_MASS_RATIO
}

fn default_earth_radius() -> f64 {
    OccultingBody::Earth.mean_radius()
}

fn default_moon_radius() -> f64 {
    OccultingBody::Moon.mean_radius()
}

fn default_sigma_pos_ref() -> f64 {
    0.001
}

fn default_sigma_vel_ref() -> f64 {
    0.01
}

fn default_ref_mag() -> f64 {
    22.0
}

/// Optical and geometric parameters of the apparent magnitude measuring model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApparentMagConfig {
    /// Apparent magnitude of the Sun.
    #[serde(default = "default_sun_mag")]
    pub sun_mag: f64,
    /// Specular reflection coefficient of the target.
    #[serde(default = "default_aspec")]
    pub aspec: f64,
    /// Diffuse reflection coefficient of the target.
    #[serde(default = "default_adiff")]
    pub adiff: f64,
    /// Diameter of the target, in LU.
    #[serde(default = "default_diameter")]
    pub diameter: f64,
    /// Mass ratio placing the occulting bodies on the x axis of the rotating frame.
    #[serde(default = "default_mu")]
    pub mu: f64,
    /// Radius of the Earth exclusion cylinder, in LU.
    #[serde(default = "default_earth_radius")]
    pub earth_radius: f64,
    /// Radius of the Moon exclusion cylinder, in LU.
    #[serde(default = "default_moon_radius")]
    pub moon_radius: f64,
    /// Position noise of a measurement at the reference magnitude, in LU.
    #[serde(default = "default_sigma_pos_ref")]
    pub sigma_pos_ref: f64,
    /// Velocity noise of a measurement at the reference magnitude, in LU/TU.
    #[serde(default = "default_sigma_vel_ref")]
    pub sigma_vel_ref: f64,
    /// Magnitude at which the measurement noise equals its reference values.
    #[serde(default = "default_ref_mag")]
    pub ref_mag: f64,
    /// Phase angle of the Sun at the start of the scenario, in radians.
    #[serde(default)]
    pub sun_phasing: f64,
}

impl Default for ApparentMagConfig {
    fn default() -> Self {
        Self {
            sun_mag: default_sun_mag(),
            aspec: default_aspec(),
            adiff: default_adiff(),
            diameter: default_diameter(),
            mu: default_mu(),
            earth_radius: default_earth_radius(),
            moon_radius: default_moon_radius(),
            sigma_pos_ref: default_sigma_pos_ref(),
            sigma_vel_ref: default_sigma_vel_ref(),
            ref_mag: default_ref_mag(),
            sun_phasing: 0.0,
        }
    }
}

impl ConfigRepr for ApparentMagConfig {}

impl ApparentMagConfig {
    /// Checks that the parameters describe a physical target and noise floor.
    pub fn sanity_check(&self) -> Result<(), ConfigError> {
        ensure!(
            self.sigma_pos_ref > 0.0 && self.sigma_vel_ref > 0.0,
            InvalidConfigSnafu {
                reason: "reference noise sigmas must be strictly positive"
            }
        );
        ensure!(
            self.diameter > 0.0,
            InvalidConfigSnafu {
                reason: "the target diameter must be strictly positive"
            }
        );
        ensure!(
            self.aspec >= 0.0 && self.adiff >= 0.0 && self.aspec + self.adiff > 0.0,
            InvalidConfigSnafu {
                reason: "the target must reflect some light"
            }
        );
        ensure!(
            self.earth_radius >= 0.0 && self.moon_radius >= 0.0,
            InvalidConfigSnafu {
                reason: "exclusion radii cannot be negative"
            }
        );
        Ok(())
    }
}

/// A measuring model which grades each observer by the apparent magnitude of the target.
///
/// The Sun sweeps the rotating frame on a circle of one astronomical unit, and a target
/// within the exclusion cylinder of the Earth or the Moon cannot be measured at all. The
/// noise of each measurement doubles for every three magnitudes past the reference, the
/// usual flux halving law.
pub struct ApparentMagModel {
    pub cfg: ApparentMagConfig,
    sun: AnalyticEphemeris,
}

impl ApparentMagModel {
    /// Builds the model and its solar ephemeris, advanced by `step_size` TU per time step.
    pub fn new(cfg: ApparentMagConfig, step_size: f64) -> Result<Self, ODError> {
        cfg.sanity_check().context(ODConfigSnafu)?;

        let phasing = cfg.sun_phasing;
        let x0 = DVector::from_row_slice(&[
            AU_LU * phasing.cos(),
            AU_LU * phasing.sin(),
            0.0,
        ]);
        let functions: Vec<StateFunction> = vec![
            Box::new(move |t| AU_LU * (SUN_SYNODIC_RATE * t + phasing).cos()),
            Box::new(move |t| AU_LU * (SUN_SYNODIC_RATE * t + phasing).sin()),
            Box::new(|_| 0.0),
        ];
        let sun = AnalyticEphemeris::new(x0, step_size, functions).context(SunStateSnafu)?;

        Ok(Self { cfg, sun })
    }

    /// Current position of the Sun in the rotating frame, in LU.
    pub fn sun_position(&self) -> Vector3<f64> {
        let state = self.sun.state();
        Vector3::new(state[0], state[1], state[2])
    }

    /// Advances the solar state by the provided number of time steps.
    pub fn advance(&mut self, steps: usize) -> Result<(), ODError> {
        self.sun.propagate(steps).context(SunStateSnafu)?;
        Ok(())
    }

    /// Rewinds the solar state to the start of the scenario.
    pub fn reset(&mut self) {
        self.sun.reset();
    }

    fn in_deadzone(&self, target: &Vector3<f64>, observer: &Vector3<f64>) -> bool {
        all::<OccultingBody>().any(|body| {
            let radius = match body {
                OccultingBody::Earth => self.cfg.earth_radius,
                OccultingBody::Moon => self.cfg.moon_radius,
            };
            occludes(observer, target, &body.position(self.cfg.mu), radius)
        })
    }

    /// Returns true if neither the Earth nor the Moon hides the target from the observer.
    pub fn is_visible(&self, truth: &Vector6<f64>, observer: &Vector6<f64>) -> bool {
        let r_target = truth.fixed_rows::<3>(0).into_owned();
        let r_observer = observer.fixed_rows::<3>(0).into_owned();

        !self.in_deadzone(&r_target, &r_observer)
    }

    /// Computes the apparent magnitude of the target as seen by the observer, or None
    /// when an occulting body hides it.
    pub fn apparent_magnitude(
        &self,
        truth: &Vector6<f64>,
        observer: &Vector6<f64>,
    ) -> Option<f64> {
        let r_target = truth.fixed_rows::<3>(0).into_owned();
        let r_observer = observer.fixed_rows::<3>(0).into_owned();

        if self.in_deadzone(&r_target, &r_observer) {
            return None;
        }

        let r_sun = self.sun_position();
        let obs_to_target = r_target - r_observer;
        let sun_to_target = r_target - r_sun;

        // Diffuse phase function of a Lambertian sphere at the solar phase angle.
        let range = obs_to_target.norm();
        let phase = obs_to_target
            .cross(&sun_to_target)
            .norm()
            .atan2(obs_to_target.dot(&sun_to_target));
        let pdiff = 2.0 / (3.0 * PI) * (phase.sin() + (PI - phase) * phase.cos());

        let flux = self.cfg.diameter.powi(2) / range.powi(2)
            * (self.cfg.aspec / 4.0 + self.cfg.adiff * pdiff);

        Some(self.cfg.sun_mag - 2.5 * flux.log10())
    }
}

impl ObservationModel for ApparentMagModel {
    fn measure(
        &self,
        truth: &Vector6<f64>,
        observers: &[Vector6<f64>],
        rng: &mut Pcg64Mcg,
    ) -> Result<Option<Vec<StateMsr>>, ODError> {
        let mut msrs = Vec::with_capacity(observers.len());
        for (j, observer) in observers.iter().enumerate() {
            if let Some(apmag) = self.apparent_magnitude(truth, observer) {
                // Noise doubles every three magnitudes past the reference.
                let scale = 2.0_f64.powf((apmag - self.cfg.ref_mag) / 3.0);
                let sigma_pos = self.cfg.sigma_pos_ref * scale;
                let sigma_vel = self.cfg.sigma_vel_ref * scale;
                msrs.push(StateMsr::noisy(truth, sigma_pos, sigma_vel, rng)?);
            } else {
                debug!("observer {j} cannot see the target");
            }
        }

        if msrs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(msrs))
        }
    }

    fn available_actions(
        &self,
        truths: &[Vector6<f64>],
        observers: &[Vector6<f64>],
    ) -> DMatrix<bool> {
        let mut avail = DMatrix::from_element(observers.len(), truths.len() + 1, false);
        for (j, observer) in observers.iter().enumerate() {
            avail[(j, 0)] = true;
            for (i, truth) in truths.iter().enumerate() {
                avail[(j, i + 1)] = self.is_visible(truth, observer);
            }
        }

        avail
    }
}

#[cfg(test)]
mod ut_apparent_mag {
    use rand::SeedableRng;

    use super::*;

    fn state_at(x: f64, y: f64, z: f64) -> Vector6<f64> {
        Vector6::new(x, y, z, 0.0, 0.0, 0.0)
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg: ApparentMagConfig = serde_yaml::from_str("sun_phasing: 0.5").unwrap();
        assert_eq!(cfg.sun_phasing, 0.5);
        assert_eq!(cfg.sun_mag, -26.74);
        assert_eq!(cfg.ref_mag, 22.0);
        assert_eq!(cfg.mu, EM_MASS_RATIO);
    }

    #[test]
    fn loads_from_a_yaml_file() {
        use std::env;
        use std::path::PathBuf;

        let test_data: PathBuf = [
            env::var("CARGO_MANIFEST_DIR").unwrap(),
            "data".to_string(),
            "tests".to_string(),
            "config".to_string(),
            "apparent_mag.yaml".to_string(),
        ]
        .iter()
        .collect();

        assert!(test_data.exists(), "Could not find the test data");

        let cfg = ApparentMagConfig::load(test_data).unwrap();

        let expected = ApparentMagConfig {
            ref_mag: 21.0,
            sun_phasing: 0.25,
            ..ApparentMagConfig::default()
        };
        assert_eq!(cfg, expected);
        assert!(cfg.sanity_check().is_ok());
        assert!(ApparentMagModel::new(cfg, 0.1).is_ok());
    }

    #[test]
    fn rejects_unphysical_configs() {
        let no_noise = ApparentMagConfig {
            sigma_pos_ref: 0.0,
            ..ApparentMagConfig::default()
        };
        assert!(matches!(
            no_noise.sanity_check(),
            Err(ConfigError::InvalidConfig { .. })
        ));
        assert!(matches!(
            ApparentMagModel::new(no_noise, 0.1),
            Err(ODError::ODConfigError { .. })
        ));

        let dark = ApparentMagConfig {
            aspec: 0.0,
            adiff: 0.0,
            ..ApparentMagConfig::default()
        };
        assert!(dark.sanity_check().is_err());

        let inside_out = ApparentMagConfig {
            moon_radius: -0.1,
            ..ApparentMagConfig::default()
        };
        assert!(ApparentMagModel::new(inside_out, 0.1).is_err());
    }

    #[test]
    fn target_behind_moon_is_dead() {
        let model = ApparentMagModel::new(ApparentMagConfig::default(), 0.1).unwrap();
        let observer = state_at(0.5, 0.0, 0.0);
        // On the observer to Moon boresight and down range of the Moon.
        let hidden = state_at(1.2, 1e-4, 0.0);
        let clear = state_at(0.5, 0.5, 0.0);

        assert!(!model.is_visible(&hidden, &observer));
        assert!(model.apparent_magnitude(&hidden, &observer).is_none());

        assert!(model.is_visible(&clear, &observer));
        let apmag = model.apparent_magnitude(&clear, &observer).unwrap();
        assert!((5.0..25.0).contains(&apmag), "implausible magnitude {apmag}");
    }

    #[test]
    fn dimmer_targets_carry_less_information() {
        let model = ApparentMagModel::new(ApparentMagConfig::default(), 0.1).unwrap();
        let observer = state_at(0.5, 0.0, 0.0);
        let near = state_at(0.5, 0.1, 0.0);
        let far = state_at(0.5, 1.0, 0.0);

        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let msr_near = model
            .measure(&near, &[observer], &mut rng)
            .unwrap()
            .unwrap();
        let msr_far = model.measure(&far, &[observer], &mut rng).unwrap().unwrap();

        assert!(msr_near[0].information[(0, 0)] > msr_far[0].information[(0, 0)]);
        assert!(msr_near[0].information[(3, 3)] > msr_far[0].information[(3, 3)]);
    }

    #[test]
    fn hidden_observers_are_dropped() {
        let model = ApparentMagModel::new(ApparentMagConfig::default(), 0.1).unwrap();
        let target = state_at(1.2, 1e-4, 0.0);
        // The first observer stares through the Moon, the second has a clear line.
        let blind = state_at(0.5, 0.0, 0.0);
        let sighted = state_at(1.2, 0.5, 0.0);

        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let msrs = model
            .measure(&target, &[blind, sighted], &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(msrs.len(), 1);

        let none = model.measure(&target, &[blind], &mut rng).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn availability_keeps_the_idle_column() {
        let model = ApparentMagModel::new(ApparentMagConfig::default(), 0.1).unwrap();
        let hidden = state_at(1.2, 1e-4, 0.0);
        let clear = state_at(0.5, 0.5, 0.0);
        let observer = state_at(0.5, 0.0, 0.0);

        let avail = model.available_actions(&[hidden, clear], &[observer]);
        assert_eq!(avail.nrows(), 1);
        assert_eq!(avail.ncols(), 3);
        assert!(avail[(0, 0)]);
        assert!(!avail[(0, 1)]);
        assert!(avail[(0, 2)]);
    }

    #[test]
    fn solar_state_advances_and_rewinds() {
        let mut model = ApparentMagModel::new(ApparentMagConfig::default(), 0.1).unwrap();
        let start = model.sun_position();
        assert!((start - Vector3::new(AU_LU, 0.0, 0.0)).norm() < 1e-12);

        model.advance(10).unwrap();
        let moved = model.sun_position();
        assert!((moved - start).norm() > 1.0);
        let angle = SUN_SYNODIC_RATE;
        assert!((moved.x - AU_LU * (angle).cos()).abs() < 1e-9);
        assert!((moved.y - AU_LU * (angle).sin()).abs() < 1e-9);

        model.reset();
        assert!((model.sun_position() - start).norm() < 1e-12);
    }
}

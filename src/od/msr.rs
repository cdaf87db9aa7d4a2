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

use rand::Rng;
use rand_distr::{Distribution, Normal};
use snafu::ensure;

use super::{InvalidSigmaSnafu, ODError};
use crate::linalg::{Matrix6, Vector6};

/// A noisy full state measurement of a single target along with its information matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct StateMsr {
    /// The measured position and velocity of the target.
    pub observation: Vector6<f64>,
    /// The information matrix of this measurement, i.e. the inverse of its covariance.
    pub information: Matrix6<f64>,
}

impl StateMsr {
    /// Builds a measurement by perturbing the truth with zero mean Gaussian noise,
    /// one sigma for the position components and another for the velocity components.
    pub fn noisy<R: Rng>(
        truth: &Vector6<f64>,
        sigma_pos: f64,
        sigma_vel: f64,
        rng: &mut R,
    ) -> Result<Self, ODError> {
        ensure!(
            sigma_pos > 0.0 && sigma_pos.is_finite(),
            InvalidSigmaSnafu { sigma: sigma_pos }
        );
        ensure!(
            sigma_vel > 0.0 && sigma_vel.is_finite(),
            InvalidSigmaSnafu { sigma: sigma_vel }
        );

        let pos_noise = Normal::new(0.0, sigma_pos).map_err(|_| {
            InvalidSigmaSnafu { sigma: sigma_pos }.build()
        })?;
        let vel_noise = Normal::new(0.0, sigma_vel).map_err(|_| {
            InvalidSigmaSnafu { sigma: sigma_vel }.build()
        })?;

        let mut observation = *truth;
        for i in 0..3 {
            observation[i] += pos_noise.sample(rng);
            observation[i + 3] += vel_noise.sample(rng);
        }

        let mut information = Matrix6::zeros();
        for i in 0..3 {
            information[(i, i)] = 1.0 / (sigma_pos * sigma_pos);
            information[(i + 3, i + 3)] = 1.0 / (sigma_vel * sigma_vel);
        }

        Ok(Self {
            observation,
            information,
        })
    }
}

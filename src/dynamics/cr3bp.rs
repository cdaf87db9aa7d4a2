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

use serde_derive::{Deserialize, Serialize};
use snafu::ensure;

use super::{Dynamics, DynamicsError, StateDimensionSnafu};
use crate::cosmic::EM_MASS_RATIO;
use crate::linalg::{DMatrix, DVector, Vector6};

/// The circular restricted three body problem, nondimensionalized such that the primaries sit
/// at `(-mu, 0, 0)` and `(1 - mu, 0, 0)` of the rotating frame and revolve once per 2π TU.
///
/// The state is `[x, y, z, vx, vy, vz]` in LU and LU/TU.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cr3bp {
    /// Mass ratio of the secondary body to the total system mass.
    pub mu: f64,
}

impl Cr3bp {
    /// Earth-Moon system.
    pub fn earth_moon() -> Self {
        Self { mu: EM_MASS_RATIO }
    }

    /// Jacobi constant of a rotating frame state, the only integral of motion of this problem.
    pub fn jacobi_constant(&self, state: &Vector6<f64>) -> f64 {
        let (x, y, z) = (state[0], state[1], state[2]);
        let v2 = state[3].powi(2) + state[4].powi(2) + state[5].powi(2);
        let r1 = ((x + self.mu).powi(2) + y.powi(2) + z.powi(2)).sqrt();
        let r2 = ((x - 1.0 + self.mu).powi(2) + y.powi(2) + z.powi(2)).sqrt();
        x.powi(2) + y.powi(2) + 2.0 * (1.0 - self.mu) / r1 + 2.0 * self.mu / r2 - v2
    }
}

impl Dynamics for Cr3bp {
    fn eom(&self, _t: f64, state: &DVector<f64>) -> Result<DVector<f64>, DynamicsError> {
        ensure!(
            state.len() == 6,
            StateDimensionSnafu {
                expected: 6_usize,
                found: state.len()
            }
        );

        let mu = self.mu;
        let (x, y, z) = (state[0], state[1], state[2]);
        let (vx, vy, vz) = (state[3], state[4], state[5]);

        let r1 = ((x + mu).powi(2) + y.powi(2) + z.powi(2)).sqrt();
        let r2 = ((x - 1.0 + mu).powi(2) + y.powi(2) + z.powi(2)).sqrt();
        let r1_cubed = r1.powi(3);
        let r2_cubed = r2.powi(3);

        let ax = x + 2.0 * vy - (1.0 - mu) * (x + mu) / r1_cubed - mu * (x - 1.0 + mu) / r2_cubed;
        let ay = y - 2.0 * vx - (1.0 - mu) * y / r1_cubed - mu * y / r2_cubed;
        let az = -(1.0 - mu) * z / r1_cubed - mu * z / r2_cubed;

        Ok(DVector::from_vec(vec![vx, vy, vz, ax, ay, az]))
    }

    fn jacobian(&self, _t: f64, state: &DVector<f64>) -> Result<DMatrix<f64>, DynamicsError> {
        ensure!(
            state.len() == 6,
            StateDimensionSnafu {
                expected: 6_usize,
                found: state.len()
            }
        );

        let mu = self.mu;
        let (x, y, z) = (state[0], state[1], state[2]);

        let r1_sq = (x + mu).powi(2) + y.powi(2) + z.powi(2);
        let r2_sq = (x - 1.0 + mu).powi(2) + y.powi(2) + z.powi(2);
        let r1_cubed = r1_sq.powf(1.5);
        let r2_cubed = r2_sq.powf(1.5);
        let r1_fifth = r1_sq.powf(2.5);
        let r2_fifth = r2_sq.powf(2.5);

        // Hessian of the effective potential
        let uxx = 1.0 - (1.0 - mu) / r1_cubed - mu / r2_cubed
            + 3.0 * (1.0 - mu) * (x + mu).powi(2) / r1_fifth
            + 3.0 * mu * (x - 1.0 + mu).powi(2) / r2_fifth;
        let uxy = 3.0 * (1.0 - mu) * (x + mu) * y / r1_fifth
            + 3.0 * mu * (x - 1.0 + mu) * y / r2_fifth;
        let uxz = 3.0 * (1.0 - mu) * (x + mu) * z / r1_fifth
            + 3.0 * mu * (x - 1.0 + mu) * z / r2_fifth;
        let uyy = 1.0 - (1.0 - mu) / r1_cubed - mu / r2_cubed
            + 3.0 * (1.0 - mu) * y.powi(2) / r1_fifth
            + 3.0 * mu * y.powi(2) / r2_fifth;
        let uyz = 3.0 * (1.0 - mu) * y * z / r1_fifth + 3.0 * mu * y * z / r2_fifth;
        let uzz = -(1.0 - mu) / r1_cubed - mu / r2_cubed
            + 3.0 * (1.0 - mu) * z.powi(2) / r1_fifth
            + 3.0 * mu * z.powi(2) / r2_fifth;

        let mut jac = DMatrix::zeros(6, 6);
        jac[(0, 3)] = 1.0;
        jac[(1, 4)] = 1.0;
        jac[(2, 5)] = 1.0;
        jac[(3, 0)] = uxx;
        jac[(3, 1)] = uxy;
        jac[(3, 2)] = uxz;
        jac[(4, 0)] = uxy;
        jac[(4, 1)] = uyy;
        jac[(4, 2)] = uyz;
        jac[(5, 0)] = uxz;
        jac[(5, 1)] = uyz;
        jac[(5, 2)] = uzz;
        // Coriolis coupling
        jac[(3, 4)] = 2.0;
        jac[(4, 3)] = -2.0;

        Ok(jac)
    }
}

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
use crate::linalg::{DMatrix, DVector, Matrix3, Vector3};

/// Two body gravity about a single attracting center at the origin.
///
/// The state is `[x, y, z, vx, vy, vz]` in whichever units make `gm` consistent.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointMass {
    /// Gravitational parameter of the center.
    pub gm: f64,
}

impl PointMass {
    pub fn new(gm: f64) -> Self {
        Self { gm }
    }
}

impl Dynamics for PointMass {
    fn eom(&self, _t: f64, state: &DVector<f64>) -> Result<DVector<f64>, DynamicsError> {
        ensure!(
            state.len() == 6,
            StateDimensionSnafu {
                expected: 6_usize,
                found: state.len()
            }
        );

        let radius = Vector3::new(state[0], state[1], state[2]);
        let accel = -self.gm / radius.norm().powi(3) * radius;

        Ok(DVector::from_vec(vec![
            state[3], state[4], state[5], accel[0], accel[1], accel[2],
        ]))
    }

    fn jacobian(&self, _t: f64, state: &DVector<f64>) -> Result<DMatrix<f64>, DynamicsError> {
        ensure!(
            state.len() == 6,
            StateDimensionSnafu {
                expected: 6_usize,
                found: state.len()
            }
        );

        let radius = Vector3::new(state[0], state[1], state[2]);
        let r_norm = radius.norm();
        let grad = self.gm
            * (3.0 * radius * radius.transpose() / r_norm.powi(5)
                - Matrix3::identity() / r_norm.powi(3));

        let mut jac = DMatrix::zeros(6, 6);
        for i in 0..3 {
            jac[(i, i + 3)] = 1.0;
            for j in 0..3 {
                jac[(i + 3, j)] = grad[(i, j)];
            }
        }

        Ok(jac)
    }
}

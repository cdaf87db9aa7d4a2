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

use std::f64::consts::TAU;

use snafu::ensure;

use crate::ephemeris::{Ephemeris, EphemerisError, StateTooSmallSnafu};
use crate::linalg::Vector3;

/// A position history sampled on the fixed time grid of a tasking scenario.
///
/// Row `t` holds the position at time step `t`, so the number of rows sets the
/// horizon of any scenario built on top of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    positions: Vec<Vector3<f64>>,
}

impl Trajectory {
    pub fn new(positions: Vec<Vector3<f64>>) -> Self {
        Self { positions }
    }

    /// Samples an ephemeris every step, starting from its current state, until the
    /// requested number of samples is reached.
    pub fn from_ephemeris(
        ephemeris: &mut dyn Ephemeris,
        samples: usize,
    ) -> Result<Self, EphemerisError> {
        ensure!(
            ephemeris.dim() >= 3,
            StateTooSmallSnafu {
                found: ephemeris.dim()
            }
        );

        let mut positions = Vec::with_capacity(samples);
        for i in 0..samples {
            if i > 0 {
                ephemeris.propagate(1)?;
            }
            let state = ephemeris.state();
            positions.push(Vector3::new(state[0], state[1], state[2]));
        }

        Ok(Self { positions })
    }

    /// Samples a circle of the provided radius and period in the plane spanned by
    /// `v1` and `v2`, one sample per `tstep` until one full revolution.
    pub fn circle(
        v1: &Vector3<f64>,
        v2: &Vector3<f64>,
        period: f64,
        radius: f64,
        tstep: f64,
        center: &Vector3<f64>,
    ) -> Self {
        let rate = TAU / period;
        let v1_hat = v1 / v1.norm();
        let v2_hat = v2 / v2.norm();

        let samples = (period / tstep).ceil() as usize;
        let mut positions = Vec::with_capacity(samples);
        for i in 0..samples {
            let angle = rate * (i as f64) * tstep;
            positions.push(center + radius * angle.cos() * v1_hat + radius * angle.sin() * v2_hat);
        }

        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position at the requested time step, or None past the end of the history.
    pub fn position(&self, step: usize) -> Option<&Vector3<f64>> {
        self.positions.get(step)
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }
}

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

use snafu::ResultExt;

use super::{Ephemeris, EphemerisError, EphemPropagationSnafu};
use crate::dynamics::Dynamics;
use crate::linalg::DVector;
use crate::propagators::Propagator;

/// An ephemeris advanced by numerically integrating a set of dynamics.
#[derive(Clone, Debug)]
pub struct IntegratedEphemeris<D: Dynamics> {
    ic: DVector<f64>,
    state: DVector<f64>,
    elapsed: f64,
    step_size: f64,
    prop: Propagator<D>,
}

impl<D: Dynamics> IntegratedEphemeris<D> {
    /// Initializes this ephemeris from the initial state and the propagator to advance it with.
    pub fn new(initial_state: DVector<f64>, step_size: f64, prop: Propagator<D>) -> Self {
        Self {
            ic: initial_state.clone(),
            state: initial_state,
            elapsed: 0.0,
            step_size,
            prop,
        }
    }

    /// The dynamics being integrated.
    pub fn dynamics(&self) -> &D {
        &self.prop.dynamics
    }
}

impl<D: Dynamics> Ephemeris for IntegratedEphemeris<D> {
    fn propagate(&mut self, steps: usize) -> Result<DVector<f64>, EphemerisError> {
        let duration = steps as f64 * self.step_size;
        let mut instance = self.prop.with(self.state.clone());
        self.state = instance
            .for_duration(duration)
            .context(EphemPropagationSnafu)?;
        self.elapsed += duration;
        Ok(self.state.clone())
    }

    fn reset(&mut self) {
        self.state = self.ic.clone();
        self.elapsed = 0.0;
    }

    fn state(&self) -> &DVector<f64> {
        &self.state
    }

    fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn step_size(&self) -> f64 {
        self.step_size
    }
}

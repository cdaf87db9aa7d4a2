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

use core::fmt;

use snafu::ensure;

use super::{DimensionMismatchSnafu, Ephemeris, EphemerisError};
use crate::linalg::DVector;

/// A closed form expression for one state variable as a function of elapsed time.
pub type StateFunction = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// An ephemeris whose state variables are each given in closed form.
pub struct AnalyticEphemeris {
    ic: DVector<f64>,
    state: DVector<f64>,
    elapsed: f64,
    step_size: f64,
    functions: Vec<StateFunction>,
}

impl AnalyticEphemeris {
    /// Initializes this ephemeris, requiring exactly one function per state variable.
    pub fn new(
        initial_state: DVector<f64>,
        step_size: f64,
        functions: Vec<StateFunction>,
    ) -> Result<Self, EphemerisError> {
        ensure!(
            initial_state.len() == functions.len(),
            DimensionMismatchSnafu {
                expected: initial_state.len(),
                found: functions.len()
            }
        );
        Ok(Self {
            ic: initial_state.clone(),
            state: initial_state,
            elapsed: 0.0,
            step_size,
            functions,
        })
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn propagate(&mut self, steps: usize) -> Result<DVector<f64>, EphemerisError> {
        self.elapsed += steps as f64 * self.step_size;
        for (i, func) in self.functions.iter().enumerate() {
            self.state[i] = func(self.elapsed);
        }
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

impl fmt::Debug for AnalyticEphemeris {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AnalyticEphemeris")
            .field("state", &self.state)
            .field("elapsed", &self.elapsed)
            .field("step_size", &self.step_size)
            .field("functions", &self.functions.len())
            .finish()
    }
}

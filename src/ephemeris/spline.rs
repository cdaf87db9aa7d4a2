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

use snafu::ensure;

use super::{
    Ephemeris, EphemerisError, MalformedStmSnafu, StmUnsetSnafu, StmWindowExceededSnafu,
};
use crate::linalg::{DVector, Matrix6};
use crate::polyfit::CubicSpline;

/// An ephemeris backed by a periodic spline fit of a repeating trajectory.
///
/// The position spline wraps around its period, so the state remains queryable for
/// an arbitrary number of revolutions. The state transition matrix spline, when
/// provided, is only valid within a single period since the STM itself is not periodic.
#[derive(Clone, Debug)]
pub struct SplineEphemeris {
    ic: DVector<f64>,
    state: DVector<f64>,
    elapsed: f64,
    step_size: f64,
    spline: CubicSpline,
    stm_spline: Option<CubicSpline>,
}

impl SplineEphemeris {
    /// Initializes this ephemeris from a state spline and an optional 6x6 STM spline.
    pub fn new(
        spline: CubicSpline,
        stm_spline: Option<CubicSpline>,
        step_size: f64,
    ) -> Result<Self, EphemerisError> {
        if let Some(stm) = &stm_spline {
            ensure!(
                stm.dim() == 36,
                MalformedStmSnafu {
                    columns: stm.dim()
                }
            );
        }
        let ic = spline.evaluate(0.0);
        Ok(Self {
            state: ic.clone(),
            ic,
            elapsed: 0.0,
            step_size,
            spline,
            stm_spline,
        })
    }

    /// The period of the underlying trajectory.
    pub fn period(&self) -> f64 {
        self.spline.period()
    }

    /// Evaluates the state transition matrix at the requested time since the start
    /// of the fit window.
    pub fn eval_stm(&self, t: f64) -> Result<Matrix6<f64>, EphemerisError> {
        let stm = self.stm_spline.as_ref().ok_or(StmUnsetSnafu.build())?;
        ensure!(
            t <= stm.period(),
            StmWindowExceededSnafu {
                requested: t,
                period: stm.period()
            }
        );
        let flat = stm.evaluate(t);
        Ok(Matrix6::from_row_slice(flat.as_slice()))
    }
}

impl Ephemeris for SplineEphemeris {
    fn propagate(&mut self, steps: usize) -> Result<DVector<f64>, EphemerisError> {
        self.elapsed += steps as f64 * self.step_size;
        self.state = self.spline.evaluate(self.elapsed);
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

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

use snafu::Snafu;

use crate::linalg::DVector;
use crate::propagators::PropagationError;

mod analytic;
pub use self::analytic::{AnalyticEphemeris, StateFunction};
mod integrated;
pub use self::integrated::IntegratedEphemeris;
mod spline;
pub use self::spline::SplineEphemeris;

/// A state provider which advances on a fixed cadence, whether by numerical integration,
/// spline interpolation, or closed form expressions.
///
/// All implementors share the same episode contract: time starts at zero, `propagate` advances
/// by whole steps of the fixed step size, and `reset` rewinds to the initial condition.
pub trait Ephemeris {
    /// Advances this ephemeris by `steps` times its step size and returns the new state.
    fn propagate(&mut self, steps: usize) -> Result<DVector<f64>, EphemerisError>;

    /// Rewinds this ephemeris to its initial condition at time zero.
    fn reset(&mut self);

    /// The current state vector.
    fn state(&self) -> &DVector<f64>;

    /// Time elapsed since the initial condition, in TU.
    fn elapsed(&self) -> f64;

    /// The fixed step size of this ephemeris, in TU.
    fn step_size(&self) -> f64;

    /// Number of state variables.
    fn dim(&self) -> usize {
        self.state().len()
    }
}

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EphemerisError {
    #[snafu(display("number of state variables ({expected}) and functions ({found}) mismatch"))]
    DimensionMismatch { expected: usize, found: usize },
    #[snafu(display(
        "requested STM eval time {requested} exceeds the fitted period {period}"
    ))]
    StmWindowExceeded { requested: f64, period: f64 },
    #[snafu(display("this ephemeris was built without an STM spline"))]
    StmUnset,
    #[snafu(display("an STM spline must carry 36 columns for a 6x6 matrix, got {columns}"))]
    MalformedStm { columns: usize },
    #[snafu(display("ephemeris state has {found} dimensions, need at least 3 for a trajectory"))]
    StateTooSmall { found: usize },
    #[snafu(display("failed to integrate the ephemeris: {source}"))]
    EphemPropagation { source: PropagationError },
}

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

use crate::linalg::{DMatrix, DVector};

/// The circular restricted three body problem in the nondimensional rotating frame.
pub mod cr3bp;
pub use self::cr3bp::Cr3bp;

/// Point mass gravity about a single attracting center.
pub mod point_mass;
pub use self::point_mass::PointMass;

/// A trait for models with equations of motion that can be integrated.
pub trait Dynamics: Clone + Sync + Send {
    /// Defines the equations of motion.
    ///
    /// - `t`: nondimensional time past the initial state, in TU.
    /// - `state`: the state vector, which changes at each integration step.
    fn eom(&self, t: f64, state: &DVector<f64>) -> Result<DVector<f64>, DynamicsError>;

    /// Defines the partials of the equations of motion, enabling state transition matrix
    /// propagation for models which support differentiation.
    fn jacobian(&self, _t: f64, _state: &DVector<f64>) -> Result<DMatrix<f64>, DynamicsError> {
        Err(DynamicsError::PartialsUnset)
    }
}

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DynamicsError {
    /// Partial derivatives were expected but this model does not define them.
    #[snafu(display("expected the dynamics to define their partials"))]
    PartialsUnset,
    /// The state vector handed to the equations of motion has the wrong dimension.
    #[snafu(display("expected a state of dimension {expected}, got {found}"))]
    StateDimension { expected: usize, found: usize },
}

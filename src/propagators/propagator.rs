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

use super::{Dormand45, Dormand853, IntegrationDetails, IntegratorOptions, PropInstance, RK4Fixed, RK};
use crate::dynamics::Dynamics;
use crate::linalg::DVector;

/// A Propagator allows propagating a set of dynamics forward or backward in time.
/// It stores the integrator options and the Butcher table coefficients of the chosen method.
#[derive(Clone, Debug)]
pub struct Propagator<D: Dynamics> {
    pub dynamics: D,
    pub opts: IntegratorOptions,
    pub(crate) order: u8,
    pub(crate) stages: usize,
    pub(crate) a_coeffs: &'static [f64],
    pub(crate) b_coeffs: &'static [f64],
}

impl<D: Dynamics> Propagator<D> {
    /// Each propagator must be initialized with `new` which stores the relevant coefficients.
    pub fn new<T: RK>(dynamics: D, opts: IntegratorOptions) -> Self {
        Self {
            dynamics,
            opts,
            stages: T::STAGES,
            order: T::ORDER,
            a_coeffs: T::A_COEFFS,
            b_coeffs: T::B_COEFFS,
        }
    }

    /// Set the tolerance for the propagator
    pub fn set_tolerance(&mut self, tol: f64) {
        self.opts.tolerance = tol;
    }

    /// Set the maximum step size for the propagator and sets the initial step to that value if currently greater
    pub fn set_max_step(&mut self, step: f64) {
        self.opts.set_max_step(step);
    }

    /// Set the minimum step size for the propagator and sets the initial step to that value if currently smaller
    pub fn set_min_step(&mut self, step: f64) {
        self.opts.set_min_step(step);
    }

    /// Default Dormand45 propagator with the provided options.
    pub fn dormand45(dynamics: D, opts: IntegratorOptions) -> Self {
        Self::new::<Dormand45>(dynamics, opts)
    }

    /// Default Dormand853 propagator with the provided options.
    pub fn dormand853(dynamics: D, opts: IntegratorOptions) -> Self {
        Self::new::<Dormand853>(dynamics, opts)
    }

    /// Fixed step RK4 propagator with the provided options.
    pub fn rk4(dynamics: D, opts: IntegratorOptions) -> Self {
        Self::new::<RK4Fixed>(dynamics, opts)
    }

    /// Returns a Dormand853 propagator with the default options.
    pub fn default(dynamics: D) -> Self {
        Self::dormand853(dynamics, IntegratorOptions::default())
    }

    /// Returns a Dormand45 propagator with the default options.
    pub fn default_dormand45(dynamics: D) -> Self {
        Self::dormand45(dynamics, IntegratorOptions::default())
    }

    /// An instance of this propagator which owns the provided state and can integrate it.
    pub fn with(&self, state: DVector<f64>) -> PropInstance<'_, D> {
        let dim = state.len();
        PropInstance {
            state,
            prop: self,
            details: IntegrationDetails {
                step: 0.0,
                error: 0.0,
                attempts: 1,
            },
            elapsed: 0.0,
            step_size: self.opts.init_step,
            fixed_step: self.opts.fixed_step,
            k: vec![DVector::zeros(dim); self.stages],
        }
    }
}

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

use super::{IntegrationDetails, PropDynamicsSnafu, PropagationError, Propagator, StepsExhaustedSnafu};
use crate::dynamics::Dynamics;
use crate::linalg::DVector;

/// A PropInstance holds the state being propagated, the details of the latest integration step,
/// and the adapted step size for the next call.
#[derive(Debug)]
pub struct PropInstance<'a, D: Dynamics> {
    /// The state of this propagator instance
    pub state: DVector<f64>,
    /// The propagator setup (kind, stages, etc.)
    pub prop: &'a Propagator<D>,
    /// Stores the details of the previous integration step
    pub details: IntegrationDetails,
    /// Time elapsed since this instance was created, in TU
    pub(crate) elapsed: f64,
    /// Stores the adapted step for the _next_ call
    pub(crate) step_size: f64,
    pub(crate) fixed_step: bool,
    // Allows us to do pre-allocation of the ki vectors
    pub(crate) k: Vec<DVector<f64>>,
}

impl<D: Dynamics> PropInstance<'_, D> {
    /// Allows setting the step size of the propagator
    pub fn set_step(&mut self, step_size: f64, fixed: bool) {
        self.step_size = step_size;
        self.fixed_step = fixed;
    }

    /// Time elapsed since this instance was created, in TU.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// This method propagates the instance for the provided duration (in TU), negative durations
    /// propagating backward. The last step is shortened to land exactly on the stop time.
    pub fn for_duration(&mut self, duration: f64) -> Result<DVector<f64>, PropagationError> {
        if duration == 0.0 {
            return Ok(self.state.clone());
        }
        let stop_time = self.elapsed + duration;

        let backprop = duration < 0.0;
        if backprop {
            self.step_size = -self.step_size; // Invert the step size
        }

        loop {
            if (!backprop && self.elapsed + self.step_size > stop_time)
                || (backprop && self.elapsed + self.step_size <= stop_time)
            {
                if stop_time == self.elapsed {
                    // No propagation necessary
                    return Ok(self.state.clone());
                }
                // Take one final step of exactly the needed duration until the stop time
                let prev_step_size = self.step_size;
                let prev_step_kind = self.fixed_step;
                self.set_step(stop_time - self.elapsed, true);

                self.single_step()?;

                // Restore the step size for subsequent calls
                self.set_step(prev_step_size, prev_step_kind);

                if backprop {
                    self.step_size = -self.step_size; // Restore to a positive step size
                }

                return Ok(self.state.clone());
            } else {
                self.single_step()?;
            }
        }
    }

    /// Take a single propagator step, updating the state and the elapsed time.
    pub fn single_step(&mut self) -> Result<(), PropagationError> {
        let (step_taken, next_state) = self.derive()?;
        self.state = next_state;
        self.elapsed += step_taken;

        Ok(())
    }

    /// This method integrates the equations of motion by one step, adapting the step size until
    /// the estimated error passes under the tolerance when running an adaptive method.
    ///
    /// This function returns the step size used and the new state as y_{n+1} = y_n + \frac{dy_n}{dt}.
    /// To get the integration details, check `self.latest_details`.
    fn derive(&mut self) -> Result<(f64, DVector<f64>), PropagationError> {
        let state_vec = self.state.clone();
        // Reset the number of attempts used (we don't reset the error because it's set before it's read)
        self.details.attempts = 1;
        // The step size is mutable because we may change it below
        let mut step_size = self.step_size;
        loop {
            let ki = self
                .prop
                .dynamics
                .eom(self.elapsed, &state_vec)
                .context(PropDynamicsSnafu)?;
            self.k[0] = ki;
            let mut a_idx: usize = 0;
            for i in 0..(self.prop.stages - 1) {
                // Let's compute the c_i by summing the relevant items from the list of coefficients.
                // \sum_{j=1}^{i-1} a_ij  ∀ i ∈ [2, s]
                let mut ci: f64 = 0.0;
                // The wi stores the a_{s1} * k_1 + a_{s2} * k_2 + ... + a_{s, s-1} * k_{s-1}
                let mut wi = DVector::<f64>::zeros(state_vec.len());
                for kj in &self.k[0..i + 1] {
                    let a_ij = self.prop.a_coeffs[a_idx];
                    ci += a_ij;
                    wi += a_ij * kj;
                    a_idx += 1;
                }

                let ki = self
                    .prop
                    .dynamics
                    .eom(self.elapsed + ci * step_size, &(&state_vec + step_size * wi))
                    .context(PropDynamicsSnafu)?;
                self.k[i + 1] = ki;
            }
            // Compute the next state and the error
            let mut next_state = state_vec.clone();
            // State error estimation from the difference between the main and the embedded
            // weights, as in https://en.wikipedia.org/wiki/Runge%E2%80%93Kutta_methods#Adaptive_Runge%E2%80%93Kutta_methods
            let mut error_est = DVector::<f64>::zeros(state_vec.len());
            for (i, ki) in self.k.iter().enumerate() {
                let b_i = self.prop.b_coeffs[i];
                if !self.fixed_step {
                    let b_i_star = self.prop.b_coeffs[i + self.prop.stages];
                    error_est += step_size * (b_i - b_i_star) * ki;
                }
                next_state += step_size * b_i * ki;
            }

            if self.fixed_step {
                // Using a fixed step, no adaptive step necessary
                self.details.step = self.step_size;
                return Ok((self.details.step, next_state));
            } else {
                // Compute the error estimate.
                self.details.error =
                    self.prop
                        .opts
                        .error_ctrl
                        .estimate(&error_est, &next_state, &state_vec);

                if self.details.error <= self.prop.opts.tolerance
                    || self.details.attempts >= self.prop.opts.attempts
                {
                    if self.details.attempts >= self.prop.opts.attempts {
                        warn!(
                            "Could not further decrease step size: maximum number of attempts reached ({})",
                            self.details.attempts
                        );
                    }

                    self.details.step = step_size;
                    if self.details.error < self.prop.opts.tolerance {
                        // Error is less than tolerance, let's attempt to increase the step for the next iteration.
                        let proposed_step = 0.9
                            * step_size.abs()
                            * (self.prop.opts.tolerance / self.details.error)
                                .powf(1.0 / f64::from(self.prop.order));
                        let clamped = if proposed_step > self.prop.opts.max_step {
                            self.prop.opts.max_step
                        } else {
                            proposed_step
                        };
                        step_size = if step_size < 0.0 { -clamped } else { clamped };
                    }
                    // In all cases, let's update the step size to whatever was the adapted step size
                    self.step_size = step_size;
                    return Ok((self.details.step, next_state));
                } else if step_size.abs() <= self.prop.opts.min_step {
                    // The error is still too high with the step already at its smallest
                    return Err(StepsExhaustedSnafu {
                        error: self.details.error,
                        min_step: self.prop.opts.min_step,
                    }
                    .build());
                } else {
                    // Error is too high and the step can shrink further, so adapt the step size.
                    self.details.attempts += 1;
                    let proposed_step = 0.9
                        * step_size.abs()
                        * (self.prop.opts.tolerance / self.details.error)
                            .powf(1.0 / f64::from(self.prop.order - 1));
                    let clamped = if proposed_step < self.prop.opts.min_step {
                        self.prop.opts.min_step
                    } else {
                        proposed_step
                    };
                    step_size = if step_size < 0.0 { -clamped } else { clamped };
                    // Note that we don't set self.step_size, that will be updated right before we return
                }
            }
        }
    }

    /// Copy the details of the latest integration step.
    pub fn latest_details(&self) -> IntegrationDetails {
        self.details
    }
}

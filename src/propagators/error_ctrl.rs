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

use crate::linalg::DVector;

// This determines when to take into consideration the magnitude of the state_delta -- prevents dividing by too small of a number.
const REL_ERR_THRESH: f64 = 0.1;

/// The error control methods of the adaptive step integrators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorControl {
    /// An RSS step error control which effectively computes the L2 norm of the error estimate over the step delta.
    RSSStep,
    /// An RSS step error control which splits the state into its position and velocity halves
    /// and keeps the worse of the two, preventing the units of one half from masking the other.
    /// When in doubt, use this error control, and expect `RSSStep` behavior on states which are
    /// not twice three dimensional.
    #[default]
    RSSCartesianStep,
    /// A largest error control which effectively computes the largest error at each component.
    ///
    /// This is a standard error computation algorithm, but it's arguably bad if the state's components have different units.
    LargestError,
}

impl ErrorControl {
    /// Computes the error of the current step, where `prop_err` is the local estimate of the
    /// integration error, and `candidate` and `cur_state` the states after and before the step.
    pub fn estimate(
        self,
        prop_err: &DVector<f64>,
        candidate: &DVector<f64>,
        cur_state: &DVector<f64>,
    ) -> f64 {
        match self {
            Self::RSSStep => rss_step(prop_err, candidate, cur_state),
            Self::RSSCartesianStep => {
                if prop_err.len() == 6 {
                    let err_radius = rss_step(
                        &prop_err.rows(0, 3).into_owned(),
                        &candidate.rows(0, 3).into_owned(),
                        &cur_state.rows(0, 3).into_owned(),
                    );
                    let err_velocity = rss_step(
                        &prop_err.rows(3, 3).into_owned(),
                        &candidate.rows(3, 3).into_owned(),
                        &cur_state.rows(3, 3).into_owned(),
                    );
                    err_radius.max(err_velocity)
                } else {
                    rss_step(prop_err, candidate, cur_state)
                }
            }
            Self::LargestError => {
                let state_delta = candidate - cur_state;
                let mut max_err = 0.0;
                for (i, prop_err_i) in prop_err.iter().enumerate() {
                    let err = if state_delta[i] > REL_ERR_THRESH {
                        (prop_err_i / state_delta[i]).abs()
                    } else {
                        prop_err_i.abs()
                    };
                    if err > max_err {
                        max_err = err;
                    }
                }
                max_err
            }
        }
    }
}

/// An RSS step error control which effectively computes the L2 norm of the error estimate
/// relative to the norm of the step delta, unless that delta is too small to divide by.
fn rss_step(prop_err: &DVector<f64>, candidate: &DVector<f64>, cur_state: &DVector<f64>) -> f64 {
    let mag = (candidate - cur_state).norm();
    let err = prop_err.norm();
    if mag > REL_ERR_THRESH {
        err / mag
    } else {
        err
    }
}

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

use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use super::{ObservationModel, ODError, StateMsr};
use crate::linalg::{DMatrix, Vector6};

/// A measuring model where every observer always sees every target with fixed noise.
///
/// Mostly useful to exercise a tasking environment without any visibility physics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DummyModel {
    pub sigma_pos: f64,
    pub sigma_vel: f64,
}

impl Default for DummyModel {
    fn default() -> Self {
        Self {
            sigma_pos: 0.001,
            sigma_vel: 0.01,
        }
    }
}

impl ObservationModel for DummyModel {
    fn measure(
        &self,
        truth: &Vector6<f64>,
        observers: &[Vector6<f64>],
        rng: &mut Pcg64Mcg,
    ) -> Result<Option<Vec<StateMsr>>, ODError> {
        let mut msrs = Vec::with_capacity(observers.len());
        for _ in observers {
            msrs.push(StateMsr::noisy(truth, self.sigma_pos, self.sigma_vel, rng)?);
        }
        if msrs.is_empty() {
            Ok(None)
        } else {
            Ok(Some(msrs))
        }
    }

    fn available_actions(
        &self,
        truths: &[Vector6<f64>],
        observers: &[Vector6<f64>],
    ) -> DMatrix<bool> {
        DMatrix::from_element(observers.len(), truths.len() + 1, true)
    }
}

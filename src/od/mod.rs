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
use snafu::prelude::*;

use crate::ephemeris::EphemerisError;
use crate::io::ConfigError;
use crate::linalg::{DMatrix, Vector6};

/// Provides the synthetic measurement type and its information content.
mod msr;
pub use self::msr::StateMsr;

/// Provides a trivial always-visible measuring model.
mod dummy;
pub use self::dummy::DummyModel;

/// Provides the apparent magnitude driven measuring model.
mod apparent_mag;
pub use self::apparent_mag::{ApparentMagConfig, ApparentMagModel};

/// A model which converts the true state of a target into the measurements each
/// observer would collect of it.
pub trait ObservationModel {
    /// Generates one noisy measurement per observer which can see the target, or
    /// None if no observer can.
    fn measure(
        &self,
        truth: &Vector6<f64>,
        observers: &[Vector6<f64>],
        rng: &mut Pcg64Mcg,
    ) -> Result<Option<Vec<StateMsr>>, ODError>;

    /// Builds the observer by target visibility matrix, where column zero is the
    /// always-available "observe nothing" choice.
    fn available_actions(
        &self,
        truths: &[Vector6<f64>],
        observers: &[Vector6<f64>],
    ) -> DMatrix<bool>;
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ODError {
    #[snafu(display("measurement noise requires a strictly positive sigma, got {sigma}"))]
    InvalidSigma { sigma: f64 },
    #[snafu(display("solar ephemeris error: {source}"))]
    SunState { source: EphemerisError },
    #[snafu(display("measuring model setup error: {source}"))]
    ODConfigError { source: ConfigError },
}

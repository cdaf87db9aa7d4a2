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

use snafu::prelude::Snafu;

use crate::dynamics::DynamicsError;
use crate::ephemeris::EphemerisError;
use crate::io::{ConfigError, InputOutputError};
use crate::od::ODError;
use crate::polyfit::FitError;
use crate::propagators::PropagationError;
use crate::tasking::TaskingError;

/// Catch-all error of this crate, into which every module error converts.
#[derive(Debug, Snafu)]
pub enum ArgusError {
    #[snafu(context(false), display("{source}"))]
    Dynamics { source: DynamicsError },
    #[snafu(context(false), display("{source}"))]
    Propagation { source: PropagationError },
    #[snafu(context(false), display("{source}"))]
    Ephemeris { source: EphemerisError },
    #[snafu(context(false), display("{source}"))]
    Fit { source: FitError },
    #[snafu(context(false), display("{source}"))]
    OrbitDetermination { source: ODError },
    #[snafu(context(false), display("{source}"))]
    Tasking { source: TaskingError },
    #[snafu(context(false), display("{source}"))]
    Config { source: ConfigError },
    #[snafu(context(false), display("{source}"))]
    InputOutput { source: InputOutputError },
}

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

use snafu::prelude::*;

/// Provides the visibility predicates which gate each action.
mod metric;
pub use self::metric::VisibilityMetric;

/// Provides the reward shaping curve.
mod rewards;
pub use self::rewards::AsymmetricGaussian;

/// Provides the discrete sensor tasking environment.
mod env;
pub use self::env::{AgentState, SpaceEnv, Step, StepInfo};

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TaskingError {
    #[snafu(display("invalid action {action}, must be an integer from 0 to {num_targets}"))]
    InvalidAction { action: usize, num_targets: usize },
    #[snafu(display("the episode already terminated at time step {tstep}"))]
    EpisodeComplete { tstep: usize },
    #[snafu(display(
        "target {target} spans {found} time steps where the agent spans {expected}"
    ))]
    MismatchedHorizon {
        target: usize,
        expected: usize,
        found: usize,
    },
}

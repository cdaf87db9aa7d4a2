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

/*! # argus

Argus: a research sandbox for spacecraft sensor tasking in cislunar space, built around a
discrete-action environment with action masking, visibility and occlusion predicates, and
pluggable observation models over nondimensional Earth-Moon rotating frame dynamics.
*/

/// Provides all the propagators / integrators available in `argus`.
pub mod propagators;

/// Provides the dynamics which can be numerically propagated, namely the circular restricted three body problem and point mass gravity.
pub mod dynamics;

/// Provides the physical constants of the Earth-Moon system and the occlusion geometry of its rotating frame.
pub mod cosmic;

mod errors;
/// Argus will (almost) never panic and functions which may fail will return an error.
pub use self::errors::ArgusError;

/// All the input/output needs for this library, including YAML configurations and JPL Horizons ephemeris files.
pub mod io;

/// All the orbit determination tools and functions, namely the observation models which turn true states into noisy measurements.
pub mod od;

/// All of the mission design tools and functions, namely sampled trajectories over a tasking horizon.
pub mod md;

/// Periodic interpolation used to compress ephemerides into evaluatable splines.
pub mod polyfit;

/// Fixed-cadence state providers, whether numerically integrated, spline interpolated, or analytic.
pub mod ephemeris;

/// The sensor-tasking environment itself: visibility metrics, reward shaping, and the episodic decision loop.
pub mod tasking;

#[macro_use]
extern crate log;
extern crate nalgebra as na;

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

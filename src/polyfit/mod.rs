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

mod spline;
pub use self::spline::CubicSpline;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FitError {
    #[snafu(display("a periodic cubic spline requires at least 4 samples, got {found}"))]
    InsufficientSamples { found: usize },
    #[snafu(display("expected {knots} value rows to match the knots, got {rows}"))]
    ShapeMismatch { knots: usize, rows: usize },
    #[snafu(display("knots must be strictly increasing (violated at index {index})"))]
    UnsortedKnots { index: usize },
    #[snafu(display("the first and last samples must match to close the period"))]
    NotClosed,
    #[snafu(display("the cyclic spline system is singular"))]
    SingularSystem,
}

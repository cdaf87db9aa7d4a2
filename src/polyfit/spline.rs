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

use snafu::ensure;

use super::{
    FitError, InsufficientSamplesSnafu, NotClosedSnafu, ShapeMismatchSnafu, SingularSystemSnafu,
    UnsortedKnotsSnafu,
};
use crate::linalg::{DMatrix, DVector};

/// How far apart the first and last samples may be while still closing the period.
const CLOSURE_TOL: f64 = 1e-9;

/// A C2 continuous periodic cubic spline through multidimensional samples, fit by solving the
/// cyclic tridiagonal system for the knot moments (second derivatives).
///
/// Evaluation wraps any query time into the fitted period, so the spline extends the samples
/// into a periodic function over all of time.
#[derive(Clone, Debug, PartialEq)]
pub struct CubicSpline {
    knots: Vec<f64>,
    values: DMatrix<f64>,
    moments: DMatrix<f64>,
    period: f64,
}

impl CubicSpline {
    /// Fits a periodic spline through the samples, where `values` has one row per knot and one
    /// column per state dimension, and the last row repeats the first to close the period.
    pub fn periodic(knots: Vec<f64>, values: DMatrix<f64>) -> Result<Self, FitError> {
        let num = knots.len();
        ensure!(
            values.nrows() == num,
            ShapeMismatchSnafu {
                knots: num,
                rows: values.nrows()
            }
        );
        ensure!(num >= 4, InsufficientSamplesSnafu { found: num });
        for index in 1..num {
            ensure!(
                knots[index] > knots[index - 1],
                UnsortedKnotsSnafu { index }
            );
        }
        ensure!(
            (values.row(num - 1) - values.row(0)).amax() <= CLOSURE_TOL,
            NotClosedSnafu
        );

        // Interval widths h_i = x_i - x_{i-1}
        let widths: Vec<f64> = (1..num).map(|i| knots[i] - knots[i - 1]).collect();
        let dim = values.ncols();

        // Periodicity identifies the last knot with the first, leaving num - 1 moments to solve
        // for. Row 0 enforces slope continuity across the wrap, row i across interior knot i.
        let unknowns = num - 1;
        let mut system = DMatrix::<f64>::zeros(unknowns, unknowns);
        let mut rhs = DMatrix::<f64>::zeros(unknowns, dim);

        for i in 0..unknowns {
            let (h_left, left, right) = if i == 0 {
                (widths[num - 2], unknowns - 1, 1 % unknowns)
            } else {
                (widths[i - 1], i - 1, (i + 1) % unknowns)
            };
            let h_right = if i == 0 { widths[0] } else { widths[i] };

            system[(i, left)] = h_left / 6.0;
            system[(i, i)] = (h_left + h_right) / 3.0;
            system[(i, right)] = h_right / 6.0;

            let (prev, next) = if i == 0 { (num - 2, 1) } else { (i - 1, i + 1) };
            for col in 0..dim {
                rhs[(i, col)] = (values[(next, col)] - values[(i, col)]) / h_right
                    - (values[(i, col)] - values[(prev, col)]) / h_left;
            }
        }

        let solution = system.lu().solve(&rhs).ok_or(SingularSystemSnafu.build())?;

        let mut moments = DMatrix::<f64>::zeros(num, dim);
        for i in 0..unknowns {
            moments.row_mut(i).copy_from(&solution.row(i));
        }
        let first_moment = moments.row(0).into_owned();
        moments.row_mut(num - 1).copy_from(&first_moment);

        let period = knots[num - 1] - knots[0];

        Ok(Self {
            knots,
            values,
            moments,
            period,
        })
    }

    /// The period of this spline, the span from its first to its last knot.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Number of state dimensions interpolated by this spline.
    pub fn dim(&self) -> usize {
        self.values.ncols()
    }

    /// The fitted knots.
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Evaluates the spline at the provided time, wrapped into the fitted period.
    pub fn evaluate(&self, t: f64) -> DVector<f64> {
        let start = self.knots[0];
        let t_rel = (t - start).rem_euclid(self.period) + start;

        // First knot strictly greater than t_rel bounds the interval on the right
        let right = self
            .knots
            .partition_point(|&knot| knot <= t_rel)
            .clamp(1, self.knots.len() - 1);
        let left = right - 1;

        let width = self.knots[right] - self.knots[left];
        let to_right = (self.knots[right] - t_rel) / width;
        let to_left = (t_rel - self.knots[left]) / width;
        let curve_left = (to_right.powi(3) - to_right) * width.powi(2) / 6.0;
        let curve_right = (to_left.powi(3) - to_left) * width.powi(2) / 6.0;

        DVector::from_fn(self.dim(), |col, _| {
            to_right * self.values[(left, col)]
                + to_left * self.values[(right, col)]
                + curve_left * self.moments[(left, col)]
                + curve_right * self.moments[(right, col)]
        })
    }
}

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

use std::fs;
use std::path::Path;

use snafu::{ensure, ResultExt};

use super::{
    EmptyTableSnafu, FileReadSnafu, InputOutputError, MalformedFloatSnafu, MissingMarkerSnafu,
    ShortRowSnafu, SplineFitSnafu,
};
use crate::linalg::{DMatrix, Vector3};
use crate::polyfit::CubicSpline;

/// Marks the start of the data rows in a Horizons export.
const SOE_MARKER: &str = "$$SOE";
/// Marks the end of the data rows in a Horizons export.
const EOE_MARKER: &str = "$$EOE";

/// A position history read from a JPL Horizons vector table export in CSV format.
///
/// Only the epoch and the position columns of each row are kept, which is all a
/// periodic orbit fit needs.
#[derive(Clone, Debug, PartialEq)]
pub struct EphemerisTable {
    epochs: Vec<f64>,
    positions: Vec<Vector3<f64>>,
}

impl EphemerisTable {
    /// Reads and parses the Horizons export at the provided path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, InputOutputError> {
        let text = fs::read_to_string(&path).with_context(|_| FileReadSnafu {
            path: path.as_ref().display().to_string(),
        })?;

        let table = Self::parse(&text)?;
        info!(
            "Loaded {} ephemeris rows from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Parses the rows between the `$$SOE` and `$$EOE` markers of a Horizons export.
    pub fn parse(text: &str) -> Result<Self, InputOutputError> {
        let mut epochs = Vec::new();
        let mut positions = Vec::new();
        let mut in_table = false;
        let mut seen_soe = false;
        let mut seen_eoe = false;

        for (index, line) in text.lines().enumerate() {
            let lineno = index + 1;

            if line.contains(SOE_MARKER) {
                in_table = true;
                seen_soe = true;
                continue;
            }
            if line.contains(EOE_MARKER) {
                seen_eoe = true;
                break;
            }
            if !in_table || line.trim().is_empty() {
                continue;
            }

            let columns: Vec<&str> = line.split(',').collect();
            ensure!(
                columns.len() >= 5,
                ShortRowSnafu {
                    line: lineno,
                    need: 5_usize,
                    found: columns.len()
                }
            );

            // Horizons lays the row out as epoch, calendar date, then the position.
            let mut numbers = [0.0; 4];
            for (slot, col) in [0, 2, 3, 4].iter().enumerate() {
                let token = columns[*col].trim();
                numbers[slot] = token.parse::<f64>().map_err(|_| {
                    MalformedFloatSnafu {
                        line: lineno,
                        token: token.to_string(),
                    }
                    .build()
                })?;
            }

            epochs.push(numbers[0]);
            positions.push(Vector3::new(numbers[1], numbers[2], numbers[3]));
        }

        ensure!(seen_soe, MissingMarkerSnafu { marker: SOE_MARKER });
        ensure!(seen_eoe, MissingMarkerSnafu { marker: EOE_MARKER });
        ensure!(!epochs.is_empty(), EmptyTableSnafu);

        Ok(Self { epochs, positions })
    }

    /// Rescales the table into the rotating frame: epochs are counted from the first
    /// row and divided by `tu`, and each position is divided by `lu` then recentered.
    pub fn normalize(&mut self, lu: f64, tu: f64, center: &Vector3<f64>) {
        if let Some(&t0) = self.epochs.first() {
            for epoch in &mut self.epochs {
                *epoch = (*epoch - t0) / tu;
            }
        }
        for position in &mut self.positions {
            *position = *position / lu + center;
        }
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn epochs(&self) -> &[f64] {
        &self.epochs
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    /// Fits a periodic cubic spline through the table, closing the orbit by wrapping
    /// the first row one sample interval past the last epoch.
    pub fn to_spline(&self) -> Result<CubicSpline, InputOutputError> {
        let num = self.epochs.len();

        let mut knots = self.epochs.clone();
        let mut rows = self.positions.clone();
        if num >= 2 {
            knots.push(self.epochs[num - 1] + (self.epochs[1] - self.epochs[0]));
            rows.push(self.positions[0]);
        }

        let mut values = DMatrix::zeros(rows.len(), 3);
        for (i, position) in rows.iter().enumerate() {
            values[(i, 0)] = position.x;
            values[(i, 1)] = position.y;
            values[(i, 2)] = position.z;
        }

        CubicSpline::periodic(knots, values).context(SplineFitSnafu)
    }
}

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

use crate::io::ConfigRepr;

fn default_mean() -> f64 {
    20.0
}

fn default_peak() -> f64 {
    5.0
}

fn default_baseline_left() -> f64 {
    2.0
}

fn default_baseline_right() -> f64 {
    1.0
}

fn default_sigma_left() -> f64 {
    9.4
}

fn default_sigma_right() -> f64 {
    1.0
}

/// A bell shaped reward over the number of consecutive repeats of an action, with
/// independent widths and baselines on each side of the peak.
///
/// The defaults pay the most for roughly twenty repeats, ramp up gently, and drop
/// sharply once the streak overshoots, which nudges an agent toward dwelling on a
/// target for a useful arc without staring at it forever.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsymmetricGaussian {
    /// Repeat count at which the reward peaks.
    #[serde(default = "default_mean")]
    pub mean: f64,
    /// Reward paid exactly at the peak.
    #[serde(default = "default_peak")]
    pub peak: f64,
    /// Reward floor for streaks shorter than the peak.
    #[serde(default = "default_baseline_left")]
    pub baseline_left: f64,
    /// Reward floor for streaks longer than the peak.
    #[serde(default = "default_baseline_right")]
    pub baseline_right: f64,
    /// Width of the ramp up side.
    #[serde(default = "default_sigma_left")]
    pub sigma_left: f64,
    /// Width of the drop off side.
    #[serde(default = "default_sigma_right")]
    pub sigma_right: f64,
}

impl Default for AsymmetricGaussian {
    fn default() -> Self {
        Self {
            mean: default_mean(),
            peak: default_peak(),
            baseline_left: default_baseline_left(),
            baseline_right: default_baseline_right(),
            sigma_left: default_sigma_left(),
            sigma_right: default_sigma_right(),
        }
    }
}

impl ConfigRepr for AsymmetricGaussian {}

impl AsymmetricGaussian {
    pub fn evaluate(&self, x: f64) -> f64 {
        let (baseline, sigma) = if x <= self.mean {
            (self.baseline_left, self.sigma_left)
        } else {
            (self.baseline_right, self.sigma_right)
        };

        baseline + (self.peak - baseline) * (-(x - self.mean).powi(2) / (2.0 * sigma.powi(2))).exp()
    }
}

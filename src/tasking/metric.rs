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

use crate::cosmic::{occludes, within_range};
use crate::linalg::Vector3;

/// The predicate deciding whether an observer may task its sensor on a target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum VisibilityMetric {
    /// The target must lie within `cutoff` LU of the observer.
    Range { cutoff: f64 },
    /// The line of sight must clear the body at `blocker`, modeled as a cylinder of
    /// half width `cutoff` extending down range.
    LineOfSight {
        cutoff: f64,
        blocker: Vector3<f64>,
    },
}

impl VisibilityMetric {
    /// Evaluates this metric for a single observer and target pair.
    pub fn apply(&self, observer: &Vector3<f64>, target: &Vector3<f64>) -> bool {
        match self {
            Self::Range { cutoff } => within_range(observer, target, *cutoff),
            Self::LineOfSight { cutoff, blocker } => !occludes(observer, target, blocker, *cutoff),
        }
    }

    /// Evaluates this metric against every target, preserving their order.
    pub fn apply_all(&self, observer: &Vector3<f64>, targets: &[Vector3<f64>]) -> Vec<bool> {
        targets
            .iter()
            .map(|target| self.apply(observer, target))
            .collect()
    }
}

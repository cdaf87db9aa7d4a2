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

use std::fmt;

use enum_iterator::Sequence;
use serde_derive::{Deserialize, Serialize};

use crate::linalg::Vector3;

/// Earth-Moon mass ratio of the circular restricted three body problem.
pub const EM_MASS_RATIO: f64 = 0.012_150_584_269_940_354;

/// Earth-Moon mean distance in kilometers, the length unit (LU) of the rotating frame.
pub const LU: f64 = 384_400.0;

/// Time unit (TU) of the rotating frame, in seconds (one TU sweeps one radian of the Moon's orbit).
pub const TU_SEC: f64 = 375_190.464_23;

/// Astronomical unit, in kilometers.
pub const AU: f64 = 1.496e8;

/// Sun's orbit radius in the rotating frame, in LU.
pub const AU_LU: f64 = AU / LU;

/// Angular rate of the Sun in the Earth-Moon rotating frame, in rad/TU.
pub const SUN_SYNODIC_RATE: f64 = -0.925_301_826_181_592_2;

/// Earth equatorial radius, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6_378.136_3;

/// Moon equatorial radius, in kilometers.
pub const MOON_RADIUS_KM: f64 = 1_737.4;

/// Bodies of the rotating frame which block the line of sight to a target near them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Sequence)]
pub enum OccultingBody {
    Earth,
    Moon,
}

impl OccultingBody {
    /// Position of this body in the rotating frame, in LU.
    pub fn position(self, mu: f64) -> Vector3<f64> {
        match self {
            Self::Earth => Vector3::new(-mu, 0.0, 0.0),
            Self::Moon => Vector3::new(1.0 - mu, 0.0, 0.0),
        }
    }

    /// Equatorial radius of this body, in LU.
    pub fn mean_radius(self) -> f64 {
        match self {
            Self::Earth => EARTH_RADIUS_KM / LU,
            Self::Moon => MOON_RADIUS_KM / LU,
        }
    }
}

impl fmt::Display for OccultingBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// An orthonormal frame anchored on the boresight from an observer to a blocking body.
///
/// The third axis points down range toward the blocker, and the offsets place the blocker
/// at the origin, so a target is hidden when it stays within the blocker's radius across
/// range and sits beyond the blocker down range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocalFrame {
    w1: Vector3<f64>,
    w2: Vector3<f64>,
    w3: Vector3<f64>,
    b1: f64,
    b2: f64,
    b3: f64,
}

impl LocalFrame {
    /// Builds the frame whose down range axis runs from `observer` to `blocker`.
    pub fn from_boresight(observer: &Vector3<f64>, blocker: &Vector3<f64>) -> Self {
        let bore = blocker - observer;
        // Any vector normal to the boresight works for w1; this choice degenerates
        // when the boresight lies on the x axis, so fall back to the y-z bisector.
        let w1 = if bore.y == 0.0 && bore.z == 0.0 {
            Vector3::new(0.0, 1.0, 1.0)
        } else {
            Vector3::new(0.0, -bore.z, bore.y)
        };
        let w1 = w1 / w1.norm();
        let w2 = bore.cross(&w1) / bore.norm();
        let w3 = bore / bore.norm();

        Self {
            w1,
            w2,
            w3,
            b1: w1.dot(blocker),
            b2: w2.dot(blocker),
            b3: w3.dot(blocker),
        }
    }

    /// Returns true if `target` sits inside the cylinder of the provided radius which starts
    /// at the blocker and extends away from the observer.
    pub fn hides(&self, target: &Vector3<f64>, radius: f64) -> bool {
        (self.w1.dot(target) - self.b1).abs() <= radius
            && (self.w2.dot(target) - self.b2).abs() <= radius
            && self.w3.dot(target) - self.b3 > 0.0
    }
}

/// Returns true if `target` lies within `cutoff` LU of `observer`.
pub fn within_range(observer: &Vector3<f64>, target: &Vector3<f64>, cutoff: f64) -> bool {
    (observer - target).norm() <= cutoff
}

/// Returns true if `blocker`, modeled as a cylinder of radius `radius` extending down range,
/// hides `target` from `observer`.
pub fn occludes(
    observer: &Vector3<f64>,
    target: &Vector3<f64>,
    blocker: &Vector3<f64>,
    radius: f64,
) -> bool {
    LocalFrame::from_boresight(observer, blocker).hides(target, radius)
}

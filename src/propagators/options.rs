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

use serde_derive::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::ErrorControl;
use crate::io::ConfigRepr;

/// IntegratorOptions stores the integrator options, including the minimum and maximum step sizes,
/// and the max error size. All durations are in nondimensional time units (TU).
///
/// Note that the step sizes and the tolerance are only used by the adaptive methods. To use a
/// fixed step integrator, initialize the options using `with_fixed_step`, and use whichever
/// adaptive step integrator is desired.
#[derive(Clone, Copy, Debug, PartialEq, TypedBuilder, Serialize, Deserialize)]
#[builder(doc)]
pub struct IntegratorOptions {
    #[builder(default = 1e-2)]
    #[serde(default = "default_init_step")]
    pub init_step: f64,
    #[builder(default = 1e-10)]
    #[serde(default = "default_min_step")]
    pub min_step: f64,
    #[builder(default = 1e-1)]
    #[serde(default = "default_max_step")]
    pub max_step: f64,
    #[builder(default = 1e-12)]
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[builder(default = 50)]
    #[serde(default = "default_attempts")]
    pub attempts: u8,
    #[builder(default = false)]
    #[serde(default)]
    pub fixed_step: bool,
    #[builder(default)]
    #[serde(default)]
    pub error_ctrl: ErrorControl,
}

fn default_init_step() -> f64 {
    1e-2
}

fn default_min_step() -> f64 {
    1e-10
}

fn default_max_step() -> f64 {
    1e-1
}

fn default_tolerance() -> f64 {
    1e-12
}

fn default_attempts() -> u8 {
    50
}

impl IntegratorOptions {
    /// `with_adaptive_step` initializes an `IntegratorOptions` such that the integrator is used
    /// with an adaptive step size. The number of attempts is currently fixed to 50 (as in GMAT).
    pub fn with_adaptive_step(
        min_step: f64,
        max_step: f64,
        tolerance: f64,
        error_ctrl: ErrorControl,
    ) -> Self {
        IntegratorOptions {
            init_step: max_step,
            min_step,
            max_step,
            tolerance,
            attempts: 50,
            fixed_step: false,
            error_ctrl,
        }
    }

    /// `with_fixed_step` initializes an `IntegratorOptions` such that the integrator is used with
    /// a fixed step size.
    pub fn with_fixed_step(step: f64) -> Self {
        IntegratorOptions {
            init_step: step,
            min_step: step,
            max_step: step,
            tolerance: 0.0,
            attempts: 0,
            fixed_step: true,
            error_ctrl: ErrorControl::RSSCartesianStep,
        }
    }

    /// Returns the default options with a specific tolerance.
    #[allow(clippy::field_reassign_with_default)]
    pub fn with_tolerance(tolerance: f64) -> Self {
        let mut opts = Self::default();
        opts.tolerance = tolerance;
        opts
    }

    /// Creates propagation options with the provided max step, and sets the initial step to that value as well.
    #[allow(clippy::field_reassign_with_default)]
    pub fn with_max_step(max_step: f64) -> Self {
        let mut opts = Self::default();
        opts.set_max_step(max_step);
        opts
    }

    /// Returns a string with the information about these options
    pub fn info(&self) -> String {
        format!("{self}")
    }

    /// Set the maximum step size and sets the initial step to that value if currently greater
    pub fn set_max_step(&mut self, max_step: f64) {
        if self.init_step > max_step {
            self.init_step = max_step;
        }
        self.max_step = max_step;
    }

    /// Set the minimum step size and sets the initial step to that value if currently smaller
    pub fn set_min_step(&mut self, min_step: f64) {
        if self.init_step < min_step {
            self.init_step = min_step;
        }
        self.min_step = min_step;
    }
}

impl fmt::Display for IntegratorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fixed_step {
            write!(f, "fixed step: {:e} TU", self.min_step)
        } else {
            write!(
                f,
                "min_step: {:e} TU, max_step: {:e} TU, tol: {:e}, attempts: {}",
                self.min_step, self.max_step, self.tolerance, self.attempts,
            )
        }
    }
}

impl Default for IntegratorOptions {
    fn default() -> IntegratorOptions {
        IntegratorOptions {
            init_step: 1e-2,
            min_step: 1e-10,
            max_step: 1e-1,
            tolerance: 1e-12,
            attempts: 50,
            fixed_step: false,
            error_ctrl: ErrorControl::RSSCartesianStep,
        }
    }
}

impl ConfigRepr for IntegratorOptions {}

#[test]
fn test_options() {
    let opts = IntegratorOptions::with_fixed_step(1e-1);
    assert_eq!(opts.min_step, 1e-1);
    assert_eq!(opts.max_step, 1e-1);
    assert!(opts.tolerance.abs() < f64::EPSILON);
    assert!(opts.fixed_step);

    let opts = IntegratorOptions::with_adaptive_step(1e-2, 10.0, 1e-12, ErrorControl::RSSStep);
    assert_eq!(opts.min_step, 1e-2);
    assert_eq!(opts.max_step, 10.0);
    assert!((opts.tolerance - 1e-12).abs() < f64::EPSILON);
    assert!(!opts.fixed_step);

    let opts: IntegratorOptions = Default::default();
    assert_eq!(opts.init_step, 1e-2);
    assert_eq!(opts.min_step, 1e-10);
    assert_eq!(opts.max_step, 1e-1);
    assert!((opts.tolerance - 1e-12).abs() < f64::EPSILON);
    assert_eq!(opts.attempts, 50);
    assert!(!opts.fixed_step);

    let opts = IntegratorOptions::with_max_step(1e-3);
    assert_eq!(opts.init_step, 1e-3);
    assert_eq!(opts.min_step, 1e-10);
    assert_eq!(opts.max_step, 1e-3);
    assert!((opts.tolerance - 1e-12).abs() < f64::EPSILON);
    assert_eq!(opts.attempts, 50);
    assert!(!opts.fixed_step);

    let opts = IntegratorOptions::builder().tolerance(1e-9).build();
    assert_eq!(opts.init_step, 1e-2);
    assert!((opts.tolerance - 1e-9).abs() < f64::EPSILON);
    assert_eq!(opts.error_ctrl, ErrorControl::RSSCartesianStep);
}

#[test]
fn test_options_from_yaml() {
    use std::env;
    use std::path::PathBuf;

    let test_data: PathBuf = [
        env::var("CARGO_MANIFEST_DIR").unwrap(),
        "data".to_string(),
        "tests".to_string(),
        "config".to_string(),
        "integrator_options.yaml".to_string(),
    ]
    .iter()
    .collect();

    assert!(test_data.exists(), "Could not find the test data");

    let many = IntegratorOptions::load_many(test_data).unwrap();
    assert_eq!(many.len(), 2);

    // Unset keys fall back to the same defaults the builder uses.
    assert_eq!(
        many[0],
        IntegratorOptions::builder()
            .max_step(0.05)
            .tolerance(1e-9)
            .build()
    );
    assert_eq!(many[1], IntegratorOptions::with_fixed_step(1e-3));
}

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
use snafu::ensure;

use super::{
    AsymmetricGaussian, EpisodeCompleteSnafu, InvalidActionSnafu, MismatchedHorizonSnafu,
    TaskingError, VisibilityMetric,
};
use crate::linalg::Vector3;
use crate::md::Trajectory;

/// What the agent knows about itself: the action it just took and how many times in a
/// row it had already taken it before.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    pub current_action: usize,
    pub repeats: usize,
}

/// Bookkeeping handed back on every step and reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepInfo {
    pub tstep: usize,
    pub available_actions: Vec<usize>,
    pub action_history: Vec<usize>,
}

/// The full outcome of one environment step.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub observation: AgentState,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

/// A discrete sensor tasking environment over precomputed position histories.
///
/// At each time step the agent picks one action: action zero observes nothing, and
/// action `i` tasks the sensor on target `i - 1`. The number of agent samples sets
/// the episode horizon.
#[derive(Clone, Debug)]
pub struct SpaceEnv {
    agent: Trajectory,
    targets: Vec<Trajectory>,
    metric: VisibilityMetric,
    reward: AsymmetricGaussian,
    tstep: usize,
    agent_state: AgentState,
    action_history: Vec<usize>,
}

impl SpaceEnv {
    /// Builds the environment, requiring every target history to span the same number
    /// of time steps as the agent's.
    pub fn new(
        agent: Trajectory,
        targets: Vec<Trajectory>,
        metric: VisibilityMetric,
    ) -> Result<Self, TaskingError> {
        for (i, target) in targets.iter().enumerate() {
            ensure!(
                target.len() == agent.len(),
                MismatchedHorizonSnafu {
                    target: i,
                    expected: agent.len(),
                    found: target.len()
                }
            );
        }

        Ok(Self {
            agent,
            targets,
            metric,
            reward: AsymmetricGaussian::default(),
            tstep: 0,
            agent_state: AgentState::default(),
            action_history: Vec::new(),
        })
    }

    /// Replaces the default reward curve.
    pub fn with_reward(mut self, reward: AsymmetricGaussian) -> Self {
        self.reward = reward;
        self
    }

    /// Number of time steps in one episode.
    pub fn horizon(&self) -> usize {
        self.agent.len()
    }

    pub fn num_targets(&self) -> usize {
        self.targets.len()
    }

    /// Current time step.
    pub fn tstep(&self) -> usize {
        self.tstep
    }

    pub fn is_terminated(&self) -> bool {
        self.tstep >= self.horizon()
    }

    /// Rewinds the environment to time step zero and clears the action history.
    pub fn reset(&mut self) -> (AgentState, StepInfo) {
        debug!(
            "resetting environment with {} targets over {} time steps",
            self.num_targets(),
            self.horizon()
        );

        self.tstep = 0;
        self.agent_state = AgentState::default();
        self.action_history.clear();

        (self.agent_state, self.info())
    }

    /// One boolean per action at the current time step. Observing nothing stays allowed
    /// until the episode ends, and each target action requires the visibility metric to
    /// hold between the agent and that target.
    pub fn action_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.num_targets() + 1];

        if let Some(observer) = self.agent.position(self.tstep) {
            mask[0] = true;
            // Every target spans the agent's horizon by construction, so each row exists.
            let positions: Vec<Vector3<f64>> = self
                .targets
                .iter()
                .filter_map(|target| target.position(self.tstep).copied())
                .collect();
            for (i, visible) in self.metric.apply_all(observer, &positions).iter().enumerate() {
                mask[i + 1] = *visible;
            }
        }

        mask
    }

    /// Indices of the actions allowed at the current time step.
    pub fn available_actions(&self) -> Vec<usize> {
        self.action_mask()
            .into_iter()
            .enumerate()
            .filter_map(|(action, allowed)| allowed.then_some(action))
            .collect()
    }

    /// Counts how many entries immediately before the latest one repeat it.
    fn repeats(&self) -> usize {
        match self.action_history.split_last() {
            Some((latest, rest)) => rest.iter().rev().take_while(|&&a| a == *latest).count(),
            None => 0,
        }
    }

    fn calc_reward(&self, action: usize, prior_available: &[usize]) -> f64 {
        if action == 0 && prior_available.len() > 1 {
            // Sitting idle while a target was up for grabs.
            -1.0
        } else if action == 0 {
            0.0
        } else {
            self.reward.evaluate(self.repeats() as f64)
        }
    }

    /// Advances the environment by one time step with the provided action.
    pub fn step(&mut self, action: usize) -> Result<Step, TaskingError> {
        ensure!(
            self.tstep < self.horizon(),
            EpisodeCompleteSnafu { tstep: self.tstep }
        );
        ensure!(
            action <= self.num_targets(),
            InvalidActionSnafu {
                action,
                num_targets: self.num_targets()
            }
        );

        let prior_available = self.available_actions();

        self.agent_state.current_action = action;
        self.action_history.push(action);
        self.agent_state.repeats = self.repeats();

        self.tstep += 1;
        let terminated = self.tstep == self.horizon();
        if terminated {
            debug!("episode terminated after {} time steps", self.tstep);
        }

        let reward = self.calc_reward(action, &prior_available);

        Ok(Step {
            observation: self.agent_state,
            reward,
            terminated,
            truncated: false,
            info: self.info(),
        })
    }

    fn info(&self) -> StepInfo {
        StepInfo {
            tstep: self.tstep,
            available_actions: self.available_actions(),
            action_history: self.action_history.clone(),
        }
    }
}

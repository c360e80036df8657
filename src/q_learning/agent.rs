//! Tabular Q-learning agent
//!
//! The agent owns the value and visit tables, an exploration rate and its own
//! random number generator. Rates follow the harmonic schedule α = ε = 1/t,
//! which satisfies the stochastic-approximation conditions Σα = ∞, Σα² < ∞.

use std::num::NonZeroU64;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    blackjack::{Action, State, StateIndex},
    ports::Strategy,
    q_learning::q_table::QTable,
};

/// Blackjack episodes are short and rewarded once, so no discounting.
pub const DISCOUNT_FACTOR: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AgentState {
    pub q_table: QTable,
    pub epsilon: f64,
    pub rng_seed: Option<u64>,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// ε-greedy choice over a Q-table using the supplied generator.
fn epsilon_greedy<R: Rng + ?Sized>(
    q_table: &QTable,
    epsilon: f64,
    state: StateIndex,
    rng: &mut R,
) -> Action {
    if rng.random::<f64>() < epsilon {
        if rng.random_bool(0.5) {
            Action::Hit
        } else {
            Action::Stand
        }
    } else {
        q_table.greedy_action(state)
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Learns Q* by always updating toward the maximum next-state value,
/// regardless of the action actually taken next.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent with zeroed tables.
    ///
    /// α and ε start at 1 and are expected to be set through
    /// [`QLearningAgent::decay`] before each training timestep.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            q_table: QTable::new(1.0, DISCOUNT_FACTOR),
            epsilon: 1.0,
            rng: build_rng(seed),
            rng_seed: seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// ε-greedy action selection using the agent's own generator.
    pub fn select_action(&mut self, state: StateIndex) -> Action {
        epsilon_greedy(&self.q_table, self.epsilon, state, &mut self.rng)
    }

    /// ε-greedy action selection with a caller-owned generator.
    ///
    /// Used by training workers, which read the table concurrently and must
    /// not share the agent's generator.
    pub fn select_action_with<R: Rng + ?Sized>(&self, state: StateIndex, rng: &mut R) -> Action {
        epsilon_greedy(&self.q_table, self.epsilon, state, rng)
    }

    /// Apply one Q-learning update and count the visit.
    pub fn update(
        &mut self,
        state: StateIndex,
        action: Action,
        reward: f64,
        next_state: StateIndex,
    ) -> Result<()> {
        self.q_table
            .q_learning_update(state, action, reward, next_state)
    }

    /// Set α = ε = 1/t for training timestep `t`.
    pub fn decay(&mut self, timestep: NonZeroU64) {
        let rate = 1.0 / timestep.get() as f64;
        self.q_table.set_learning_rate(rate);
        self.epsilon = rate;
    }

    /// Greedy action, Stand on ties. Does not touch the generator.
    pub fn optimal_action(&self, state: StateIndex) -> Action {
        self.q_table.greedy_action(state)
    }

    pub fn q_value(&self, state: StateIndex, action: Action) -> f64 {
        self.q_table.get(state, action)
    }

    pub fn visits(&self, state: StateIndex, action: Action) -> u64 {
        self.q_table.visits(state, action)
    }

    pub fn learning_rate(&self) -> f64 {
        self.q_table.learning_rate()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Clear learned values and restart the generator.
    pub fn reset(&mut self) {
        self.q_table.reset();
        self.q_table.set_learning_rate(1.0);
        self.epsilon = 1.0;
        self.rng = build_rng(self.rng_seed);
    }

    pub(crate) fn export_state(&self) -> AgentState {
        AgentState {
            q_table: self.q_table.clone(),
            epsilon: self.epsilon,
            rng_seed: self.rng_seed,
        }
    }

    pub(crate) fn from_state(state: AgentState) -> Result<Self> {
        state.q_table.validate()?;
        Ok(Self {
            q_table: state.q_table,
            epsilon: state.epsilon,
            rng: build_rng(state.rng_seed),
            rng_seed: state.rng_seed,
        })
    }
}

impl Strategy for QLearningAgent {
    /// Plays greedily; exploration is a training-time concern only.
    fn decide(&mut self, state: State) -> Result<Action> {
        Ok(self.optimal_action(state.encode()?))
    }

    fn name(&self) -> &str {
        "Q-Learning (greedy)"
    }
}

//! Q-table implementation for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    blackjack::{Action, STATE_DIM, StateIndex},
};

const ACTION_DIM: usize = Action::ALL.len();

/// Dense Q-table over `(state index, action)` with a parallel visit-count
/// table.
///
/// Both tables start at zero and change only through
/// [`QTable::q_learning_update`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    /// Q-values indexed by state, then action
    q_values: Vec<[f64; ACTION_DIM]>,
    /// Update counts indexed by state, then action
    visits: Vec<[u64; ACTION_DIM]>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zeroed Q-table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: vec![[0.0; ACTION_DIM]; STATE_DIM],
            visits: vec![[0; ACTION_DIM]; STATE_DIM],
            learning_rate,
            discount_factor,
        }
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: StateIndex, action: Action) -> f64 {
        self.q_values[state.as_usize()][action.index()]
    }

    /// Number of updates applied to a state-action pair
    pub fn visits(&self, state: StateIndex, action: Action) -> u64 {
        self.visits[state.as_usize()][action.index()]
    }

    /// Maximum Q-value over both actions
    pub fn max_q(&self, state: StateIndex) -> f64 {
        let row = &self.q_values[state.as_usize()];
        row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action; ties go to the first action in [`Action::ALL`].
    pub fn greedy_action(&self, state: StateIndex) -> Action {
        let row = &self.q_values[state.as_usize()];
        let mut best = Action::ALL[0];
        for action in Action::ALL.into_iter().skip(1) {
            if row[action.index()] > row[best.index()] {
                best = action;
            }
        }
        best
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The bootstrap term is dropped when `next_state` is terminal.
    pub fn q_learning_update(
        &mut self,
        state: StateIndex,
        action: Action,
        reward: f64,
        next_state: StateIndex,
    ) -> Result<()> {
        if state.is_terminal() {
            return Err(Error::invalid_state("cannot update the terminal sentinel"));
        }
        let current_q = self.get(state, action);
        let td_target = if next_state.is_terminal() {
            reward
        } else {
            reward + self.discount_factor * self.max_q(next_state)
        };
        let td_error = td_target - current_q;
        self.q_values[state.as_usize()][action.index()] = current_q + self.learning_rate * td_error;
        self.visits[state.as_usize()][action.index()] += 1;
        Ok(())
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Total number of updates applied
    pub fn total_visits(&self) -> u64 {
        self.visits.iter().flatten().sum()
    }

    /// Number of state-action pairs updated at least once
    pub fn visited_pairs(&self) -> usize {
        self.visits.iter().flatten().filter(|&&n| n > 0).count()
    }

    /// Reset all values and counts
    pub fn reset(&mut self) {
        self.q_values.fill([0.0; ACTION_DIM]);
        self.visits.fill([0; ACTION_DIM]);
    }

    /// Check table shape after deserialization.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.q_values.len() != STATE_DIM || self.visits.len() != STATE_DIM {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "Q-table has {} value rows and {} visit rows, expected {STATE_DIM}",
                    self.q_values.len(),
                    self.visits.len()
                ),
            });
        }
        Ok(())
    }
}

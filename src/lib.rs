//! Tabular Q-learning for a two-action blackjack variant
//!
//! This crate provides:
//! - A blackjack environment (stand/hit only, dealer hits soft 17) with a
//!   multi-deck shoe and forced starting hands for exploring starts
//! - A dense state encoding over (player total, softness, dealer upcard)
//! - A tabular Q-learning agent with harmonic learning-rate and exploration
//!   decay
//! - A batch trainer that simulates episodes in parallel and applies updates
//!   sequentially in a fixed order
//! - Greedy policy tables with a line-oriented text format, an evaluation
//!   harness and CSV export

pub mod blackjack;
pub mod cli;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod q_learning;

pub use blackjack::{Action, Card, Environment, State, StateIndex};
pub use error::{Error, Result};
pub use pipeline::{Trainer, TrainingConfig};
pub use policy::StrategyTable;
pub use q_learning::QLearningAgent;

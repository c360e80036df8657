//! Tabular Q-learning
//!
//! Temporal difference control over the 361-entry blackjack state space.
//! The agent bootstraps each transition from the best value of its successor
//! state, with the terminal sentinel contributing nothing.
//!
//! ## Usage Example
//!
//! ```no_run
//! use std::num::NonZeroU64;
//!
//! use blackjack_q::{
//!     blackjack::{Action, StateIndex},
//!     q_learning::QLearningAgent,
//! };
//!
//! let mut agent = QLearningAgent::new(Some(7));
//! agent.decay(NonZeroU64::MIN);
//!
//! let state = StateIndex::encode(16, false, 10)?;
//! let action = agent.select_action(state);
//! agent.update(state, action, -10.0, StateIndex::TERMINAL)?;
//! assert_eq!(agent.visits(state, action), 1);
//! # Ok::<(), blackjack_q::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::{DISCOUNT_FACTOR, QLearningAgent};
pub use q_table::QTable;
pub use serialization::{SavedAgent, TrainingMetadata};

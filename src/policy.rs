//! Policy tables and baseline strategies
//!
//! [`StrategyTable`] is the greedy policy of a trained agent in a fixed
//! hard/soft layout, with a line-oriented text format. The baselines give
//! reference points for evaluation.

pub mod baseline;
pub mod table;

pub use baseline::{RandomStrategy, StandStrategy};
pub use table::{MIN_SOFT_TOTAL, StrategyTable};

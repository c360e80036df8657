//! Strategy port - anything that can play a blackjack hand
//!
//! The evaluation harness drives strategies through this trait, so trained
//! agents, exported lookup tables and fixed baselines can be compared on the
//! same footing.

use crate::{
    Result,
    blackjack::{Action, State},
};

/// A player policy over decision states.
///
/// # Examples
///
/// ```
/// use blackjack_q::{
///     blackjack::{Action, State},
///     ports::Strategy,
/// };
///
/// struct HitBelow17;
///
/// impl Strategy for HitBelow17 {
///     fn decide(&mut self, state: State) -> blackjack_q::Result<Action> {
///         Ok(if state.total < 17 { Action::Hit } else { Action::Stand })
///     }
///
///     fn name(&self) -> &str {
///         "hit-below-17"
///     }
/// }
/// ```
pub trait Strategy: Send {
    /// Choose an action for a non-terminal state.
    ///
    /// # Errors
    ///
    /// Implementations backed by a table may fail if the state cannot be
    /// encoded.
    fn decide(&mut self, state: State) -> Result<Action>;

    /// Name used in reports.
    fn name(&self) -> &str;
}

//! Two-action blackjack: cards, shoe, state encoding and the environment

pub mod card;
pub mod env;
pub mod hand;
pub mod shoe;
pub mod state;

pub use card::Card;
pub use env::{DealerPhase, Environment};
pub use hand::{Hand, HandValue};
pub use shoe::Shoe;
pub use state::{Action, STATE_DIM, State, StateIndex};

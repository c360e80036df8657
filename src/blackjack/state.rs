//! State encoding and actions
//!
//! A decision state is the triple (player total, softness, dealer upcard).
//! It is encoded to a dense index in `1..=360`:
//!
//! ```text
//! index = (total - 4) * 20 + soft * 10 + (upcard - 1) + 1
//! ```
//!
//! Index `0` is reserved for the terminal sentinel and is never produced by
//! the encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::{Error, Result};

pub const MIN_TOTAL: u8 = 4;
pub const MAX_TOTAL: u8 = 21;

/// Number of state indices including the terminal sentinel.
pub const STATE_DIM: usize = 18 * 2 * 10 + 1;

/// Player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    Stand = 0,
    Hit = 1,
}

impl Action {
    /// All actions in tie-break order.
    pub const ALL: [Action; 2] = [Action::Stand, Action::Hit];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Self::try_from(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl TryFrom<i64> for Action {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Action::Stand),
            1 => Ok(Action::Hit),
            value => Err(Error::InvalidAction { value }),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Stand => write!(f, "stand"),
            Action::Hit => write!(f, "hit"),
        }
    }
}

/// Semantic decision state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub total: u8,
    pub soft: bool,
    pub upcard: Card,
}

impl State {
    /// Build a state, validating the total range.
    pub fn new(total: u8, soft: bool, upcard: Card) -> Result<Self> {
        if !(MIN_TOTAL..=MAX_TOTAL).contains(&total) {
            return Err(Error::invalid_state(format!(
                "total {total} outside {MIN_TOTAL}..={MAX_TOTAL}"
            )));
        }
        Ok(Self {
            total,
            soft,
            upcard,
        })
    }

    /// Encode into a dense non-terminal index.
    pub fn encode(self) -> Result<StateIndex> {
        StateIndex::encode(self.total, self.soft, self.upcard.rank())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.soft { "soft" } else { "hard" };
        write!(f, "{kind} {} vs {}", self.total, self.upcard)
    }
}

/// Dense state index in `0..STATE_DIM`; `0` is the terminal sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct StateIndex(u16);

impl StateIndex {
    pub const TERMINAL: StateIndex = StateIndex(0);

    /// Encode a `(total, soft, upcard)` triple.
    pub fn encode(total: u8, soft: bool, upcard: u8) -> Result<Self> {
        if !(MIN_TOTAL..=MAX_TOTAL).contains(&total) {
            return Err(Error::invalid_state(format!(
                "total {total} outside {MIN_TOTAL}..={MAX_TOTAL}"
            )));
        }
        if !(1..=10).contains(&upcard) {
            return Err(Error::invalid_state(format!(
                "upcard {upcard} outside 1..=10"
            )));
        }
        let index =
            u16::from(total - MIN_TOTAL) * 20 + u16::from(soft) * 10 + u16::from(upcard - 1) + 1;
        Ok(StateIndex(index))
    }

    /// Inverse of [`StateIndex::encode`]. The terminal sentinel has no decoding.
    pub fn decode(self) -> Result<State> {
        if self.is_terminal() {
            return Err(Error::invalid_state("cannot decode the terminal sentinel"));
        }
        if usize::from(self.0) >= STATE_DIM {
            return Err(Error::invalid_state(format!(
                "index {} outside 0..{STATE_DIM}",
                self.0
            )));
        }
        let offset = self.0 - 1;
        let upcard = Card::try_new((offset % 10) as u8 + 1)?;
        let soft = (offset / 10) % 2 == 1;
        let total = (offset / 20) as u8 + MIN_TOTAL;
        Ok(State {
            total,
            soft,
            upcard,
        })
    }

    /// Wrap a raw index, rejecting values outside `0..STATE_DIM`.
    pub fn from_raw(raw: usize) -> Result<Self> {
        if raw >= STATE_DIM {
            return Err(Error::invalid_state(format!(
                "index {raw} outside 0..{STATE_DIM}"
            )));
        }
        Ok(StateIndex(raw as u16))
    }

    pub fn is_terminal(self) -> bool {
        self.0 == 0
    }

    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }

    /// Every non-terminal index in ascending order.
    pub fn all() -> impl Iterator<Item = StateIndex> {
        (1..STATE_DIM as u16).map(StateIndex)
    }
}

impl TryFrom<u16> for StateIndex {
    type Error = Error;

    fn try_from(raw: u16) -> Result<Self> {
        Self::from_raw(usize::from(raw))
    }
}

impl From<StateIndex> for u16 {
    fn from(index: StateIndex) -> u16 {
        index.0
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

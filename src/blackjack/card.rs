//! Card ranks

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A card rank in `1..=10`.
///
/// Face cards collapse to 10 and `1` is the Ace, valued 11 or 1 depending on
/// the rest of the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    pub const ACE: Card = Card(1);
    pub const TEN: Card = Card(10);

    /// Every distinct rank, Ace first.
    pub const RANKS: [Card; 10] = [
        Card(1),
        Card(2),
        Card(3),
        Card(4),
        Card(5),
        Card(6),
        Card(7),
        Card(8),
        Card(9),
        Card(10),
    ];

    /// Create a card, rejecting ranks outside `1..=10`.
    pub fn try_new(rank: u8) -> Result<Self> {
        if (1..=10).contains(&rank) {
            Ok(Card(rank))
        } else {
            Err(Error::InvalidCard { rank })
        }
    }

    pub fn rank(self) -> u8 {
        self.0
    }

    pub fn is_ace(self) -> bool {
        self.0 == 1
    }

    /// Number of copies of this rank in a single 52-card deck.
    pub fn copies_per_deck(self) -> usize {
        if self.0 == 10 { 16 } else { 4 }
    }

    /// Zero-based column of this rank in upcard-indexed tables.
    pub(crate) fn column(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for Card {
    type Error = Error;

    fn try_from(rank: u8) -> Result<Self> {
        Card::try_new(rank)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "A"),
            rank => write!(f, "{rank}"),
        }
    }
}

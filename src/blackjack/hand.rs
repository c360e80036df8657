//! Hands and hand valuation

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::Card;

/// Total and softness of a hand. Derived, never stored on the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandValue {
    pub total: u8,
    pub soft: bool,
}

impl HandValue {
    pub fn is_bust(self) -> bool {
        self.total > 21
    }
}

/// An ordered sequence of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn first(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Value the hand.
    ///
    /// Every Ace starts at 11. For each Ace, if the running total exceeds 21
    /// that Ace is demoted to 1. The hand is soft when at least one Ace was
    /// never demoted.
    pub fn value(&self) -> HandValue {
        let mut total: u32 = 0;
        let mut aces = 0usize;
        for card in &self.cards {
            if card.is_ace() {
                aces += 1;
                total += 11;
            } else {
                total += u32::from(card.rank());
            }
        }

        let mut demoted = 0usize;
        for _ in 0..aces {
            if total > 21 {
                total -= 10;
                demoted += 1;
            }
        }

        HandValue {
            total: u8::try_from(total).unwrap_or(u8::MAX),
            soft: aces > demoted,
        }
    }

    pub fn total(&self) -> u8 {
        self.value().total
    }

    pub fn is_bust(&self) -> bool {
        self.value().is_bust()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}

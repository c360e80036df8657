//! Multi-deck shoe with a dealing cursor

use rand::Rng;

use super::card::Card;
use crate::{Error, Result};

/// A shoe of `deck_count` 52-card decks consumed front-to-back via a cursor.
///
/// Shuffling is incremental Fisher-Yates: [`Shoe::reshuffle`] returns every
/// card to the undealt region and each [`Shoe::draw`] swaps a uniformly chosen
/// undealt card to the cursor. The dealt prefix is therefore always a uniform
/// random shuffle, and the shoe is never re-permuted past the cards a hand
/// actually needs.
///
/// Cards are only ever swapped, so the sorted contents always equal the base
/// multiset for the deck count.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    cursor: usize,
    deck_count: usize,
}

impl Shoe {
    /// Create a shoe holding `deck_count` decks.
    pub fn new(deck_count: usize) -> Result<Self> {
        if deck_count == 0 {
            return Err(Error::InvalidConfiguration {
                message: "deck count must be at least 1".to_string(),
            });
        }
        Ok(Self {
            cards: Self::base_multiset(deck_count),
            cursor: 0,
            deck_count,
        })
    }

    /// Sorted multiset of cards for `deck_count` decks.
    pub fn base_multiset(deck_count: usize) -> Vec<Card> {
        Card::RANKS
            .iter()
            .flat_map(|&card| std::iter::repeat_n(card, card.copies_per_deck() * deck_count))
            .collect()
    }

    pub fn deck_count(&self) -> usize {
        self.deck_count
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards not yet dealt since the last reshuffle.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Cards dealt since the last reshuffle, in dealing order.
    pub fn dealt(&self) -> &[Card] {
        &self.cards[..self.cursor]
    }

    /// The whole shoe in its current physical order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Return all cards to the shoe and start a fresh shuffle.
    pub fn reshuffle(&mut self) {
        self.cursor = 0;
    }

    /// Deal the next card.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card> {
        if self.cursor >= self.cards.len() {
            return Err(Error::ShoeExhausted {
                needed: 1,
                remaining: 0,
            });
        }
        let pick = rng.random_range(self.cursor..self.cards.len());
        self.cards.swap(self.cursor, pick);
        let card = self.cards[self.cursor];
        self.cursor += 1;
        Ok(card)
    }

    /// Move one copy of `card` from the undealt region to the head of the
    /// shoe and deal it.
    pub fn deal_specific(&mut self, card: Card) -> Result<Card> {
        let position = self.cards[self.cursor..]
            .iter()
            .position(|&c| c == card)
            .ok_or(Error::RankUnavailable {
                rank: card.rank(),
                remaining: self.remaining(),
            })?;
        self.cards.swap(self.cursor, self.cursor + position);
        self.cursor += 1;
        Ok(card)
    }

    /// Deal every undealt card, emptying the shoe.
    pub fn draw_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<Card>> {
        let mut drawn = Vec::with_capacity(self.remaining());
        while self.remaining() > 0 {
            drawn.push(self.draw(rng)?);
        }
        Ok(drawn)
    }
}

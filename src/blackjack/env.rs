//! Blackjack environment
//!
//! Simulates one hand at a time against a dealer who hits soft 17. The
//! player may only stand or hit; there are no splits, doubles, insurance or
//! naturals.
//!
//! The environment can be forced into an arbitrary decision state
//! ([`Environment::initialize_forced`]) so that training can use exploring
//! starts instead of relying on natural deals to reach every state.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    card::Card,
    hand::{Hand, HandValue},
    shoe::Shoe,
    state::{Action, MAX_TOTAL, MIN_TOTAL, State, StateIndex},
};
use crate::{Error, Result};

pub const WIN_REWARD: i32 = 10;
pub const LOSS_REWARD: i32 = -10;
pub const PUSH_REWARD: i32 = 0;

/// Dealer automaton states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerPhase {
    Drawing,
    Done,
}

impl DealerPhase {
    /// Draw while the total is at most 16 or is a soft 17; stop on hard 17,
    /// 18 or more, or bust.
    pub fn of(value: HandValue) -> Self {
        match value.total {
            0..=16 => DealerPhase::Drawing,
            17 if value.soft => DealerPhase::Drawing,
            _ => DealerPhase::Done,
        }
    }
}

/// Result of a finished hand from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Push,
}

impl Outcome {
    pub fn from_reward(reward: i32) -> Self {
        match reward.signum() {
            1 => Outcome::Win,
            -1 => Outcome::Loss,
            _ => Outcome::Push,
        }
    }
}

/// Player cards and dealer upcard to reproduce on the next deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ForcedStart {
    player: [Card; 2],
    upcard: Card,
}

/// Single-player blackjack table.
#[derive(Debug, Clone)]
pub struct Environment {
    shoe: Shoe,
    rng: StdRng,
    player: Hand,
    dealer: Hand,
    forced: Option<ForcedStart>,
    turn_finished: bool,
}

impl Environment {
    /// Create a table with a `deck_count`-deck shoe.
    pub fn new(deck_count: usize, rng: StdRng) -> Result<Self> {
        Ok(Self {
            shoe: Shoe::new(deck_count)?,
            rng,
            player: Hand::new(),
            dealer: Hand::new(),
            forced: None,
            turn_finished: false,
        })
    }

    pub fn with_seed(deck_count: usize, seed: u64) -> Result<Self> {
        Self::new(deck_count, StdRng::seed_from_u64(seed))
    }

    /// Force the next deal to start in `state`.
    ///
    /// Builds a two-card player hand with the state's total and softness and
    /// fixes the dealer upcard. Soft totals below 12 and hard 21 cannot be
    /// made from two cards; those fall back to the other softness for the
    /// same total. The forced start is consumed by the next
    /// [`Environment::shuffle_and_deal`].
    pub fn initialize_forced(&mut self, index: StateIndex) -> Result<()> {
        let state = index.decode()?;
        let player = two_card_hand(state.total, state.soft, &mut self.rng)?;
        self.forced = Some(ForcedStart {
            player,
            upcard: state.upcard,
        });
        Ok(())
    }

    /// Shuffle and deal a new hand.
    ///
    /// With a forced start the player cards and upcard are moved to the head
    /// of the shoe in that order and the dealer's second card is dealt
    /// naturally. Otherwise both parties receive two cards from the shuffled
    /// shoe.
    pub fn shuffle_and_deal(&mut self) -> Result<()> {
        self.shoe.reshuffle();
        self.player.clear();
        self.dealer.clear();
        self.turn_finished = false;

        match self.forced.take() {
            Some(forced) => {
                for card in forced.player {
                    let card = self.shoe.deal_specific(card)?;
                    self.player.push(card);
                }
                let upcard = self.shoe.deal_specific(forced.upcard)?;
                self.dealer.push(upcard);
            }
            None => {
                for _ in 0..2 {
                    let card = self.shoe.draw(&mut self.rng)?;
                    self.player.push(card);
                }
                let upcard = self.shoe.draw(&mut self.rng)?;
                self.dealer.push(upcard);
            }
        }

        let hole = self.shoe.draw(&mut self.rng)?;
        self.dealer.push(hole);
        Ok(())
    }

    /// Apply a player decision. Ending the turn runs the dealer.
    pub fn apply_action(&mut self, action: Action) -> Result<()> {
        if self.turn_finished {
            return Err(Error::TurnFinished);
        }
        if self.player.is_empty() || self.dealer.is_empty() {
            return Err(Error::invalid_state("no hand has been dealt"));
        }

        match action {
            Action::Stand => self.turn_finished = true,
            Action::Hit => {
                let card = self.shoe.draw(&mut self.rng)?;
                self.player.push(card);
                if self.player.is_bust() {
                    self.turn_finished = true;
                }
            }
        }

        if self.turn_finished {
            self.play_dealer()?;
        }
        Ok(())
    }

    /// Current decision state, or `None` (terminal) when a hand is empty or
    /// the player has busted.
    pub fn current_state(&self) -> Option<State> {
        let upcard = self.dealer.first()?;
        if self.player.is_empty() {
            return None;
        }
        let HandValue { total, soft } = self.player.value();
        if !(MIN_TOTAL..=MAX_TOTAL).contains(&total) {
            return None;
        }
        Some(State {
            total,
            soft,
            upcard,
        })
    }

    /// Encoded current state, [`StateIndex::TERMINAL`] when there is none.
    pub fn current_index(&self) -> Result<StateIndex> {
        match self.current_state() {
            Some(state) => state.encode(),
            None => Ok(StateIndex::TERMINAL),
        }
    }

    /// Whether the player has stood or busted.
    pub fn turn_finished(&self) -> bool {
        self.turn_finished
    }

    /// Reward for the finished hand: +10 win, -10 loss, 0 push.
    pub fn terminal_reward(&self) -> Result<i32> {
        if !self.turn_finished {
            return Err(Error::TurnNotFinished);
        }
        Ok(settle(self.player.value(), self.dealer.value()))
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    fn play_dealer(&mut self) -> Result<()> {
        while DealerPhase::of(self.dealer.value()) == DealerPhase::Drawing {
            let card = self.shoe.draw(&mut self.rng)?;
            self.dealer.push(card);
        }
        Ok(())
    }
}

/// Reward law for a finished hand.
pub fn settle(player: HandValue, dealer: HandValue) -> i32 {
    if player.is_bust() {
        LOSS_REWARD
    } else if dealer.is_bust() || player.total > dealer.total {
        WIN_REWARD
    } else if player.total == dealer.total {
        PUSH_REWARD
    } else {
        LOSS_REWARD
    }
}

/// Two cards whose value is `total` with the requested softness where
/// possible.
fn two_card_hand<R: Rng + ?Sized>(total: u8, soft: bool, rng: &mut R) -> Result<[Card; 2]> {
    let soft_possible = (12..=21).contains(&total);
    let hard_possible = (4..=20).contains(&total);

    if (soft && soft_possible) || !hard_possible {
        if total == 12 {
            return Ok([Card::ACE, Card::ACE]);
        }
        return Ok([Card::ACE, Card::try_new(total - 11)?]);
    }

    let low = total.saturating_sub(10).max(2);
    let high = (total - 2).min(10);
    let first = rng.random_range(low..=high);
    Ok([Card::try_new(first)?, Card::try_new(total - first)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(ranks: &[u8]) -> Hand {
        Hand::from_cards(ranks.iter().map(|&r| Card::try_new(r).unwrap()))
    }

    fn env(seed: u64) -> Environment {
        Environment::with_seed(6, seed).unwrap()
    }

    #[test]
    fn test_dealer_hits_soft_17() {
        assert_eq!(DealerPhase::of(cards(&[1, 6]).value()), DealerPhase::Drawing);
        assert_eq!(
            DealerPhase::of(cards(&[1, 3, 3]).value()),
            DealerPhase::Drawing
        );
    }

    #[test]
    fn test_dealer_stands_hard_17() {
        assert_eq!(DealerPhase::of(cards(&[10, 7]).value()), DealerPhase::Done);
        assert_eq!(
            DealerPhase::of(cards(&[10, 6, 1]).value()),
            DealerPhase::Done
        );
    }

    #[test]
    fn test_dealer_thresholds() {
        assert_eq!(DealerPhase::of(cards(&[10, 6]).value()), DealerPhase::Drawing);
        assert_eq!(DealerPhase::of(cards(&[1, 7]).value()), DealerPhase::Done);
        assert_eq!(DealerPhase::of(cards(&[10, 8]).value()), DealerPhase::Done);
        assert_eq!(
            DealerPhase::of(cards(&[10, 8, 5]).value()),
            DealerPhase::Done
        );
    }

    #[test]
    fn test_reward_law() {
        let v = |r: &[u8]| cards(r).value();
        // player bust loses even if the dealer busts
        assert_eq!(settle(v(&[10, 6, 9]), v(&[10, 6, 8])), LOSS_REWARD);
        assert_eq!(settle(v(&[10, 8]), v(&[10, 6, 8])), WIN_REWARD);
        assert_eq!(settle(v(&[10, 8]), v(&[9, 9])), PUSH_REWARD);
        assert_eq!(settle(v(&[10, 9]), v(&[10, 8])), WIN_REWARD);
        assert_eq!(settle(v(&[10, 7]), v(&[10, 8])), LOSS_REWARD);
    }

    #[test]
    fn test_forced_deal_reproduces_state() {
        let mut env = env(11);
        for index in StateIndex::all() {
            let requested = index.decode().unwrap();
            env.initialize_forced(index).unwrap();
            env.shuffle_and_deal().unwrap();
            let dealt = env.current_state().unwrap();
            assert_eq!(dealt.total, requested.total);
            assert_eq!(dealt.upcard, requested.upcard);
            let constructible = if requested.soft {
                requested.total >= 12
            } else {
                requested.total <= 20
            };
            if constructible {
                assert_eq!(dealt.soft, requested.soft, "state {requested}");
            }
            assert_eq!(env.player_hand().len(), 2);
            assert_eq!(env.dealer_hand().len(), 2);
            assert_eq!(env.shoe().dealt().len(), 4);
        }
    }

    #[test]
    fn test_forced_start_is_consumed() {
        let mut env = env(2);
        let index = StateIndex::encode(16, false, 10).unwrap();
        env.initialize_forced(index).unwrap();
        env.shuffle_and_deal().unwrap();
        assert_eq!(env.current_index().unwrap(), index);

        let mut saw_other = false;
        for _ in 0..20 {
            env.shuffle_and_deal().unwrap();
            saw_other |= env.current_index().unwrap() != index;
        }
        assert!(saw_other);
    }

    #[test]
    fn test_forced_terminal_rejected() {
        let mut env = env(1);
        assert!(env.initialize_forced(StateIndex::TERMINAL).is_err());
    }

    #[test]
    fn test_stand_finishes_turn_and_dealer_completes() {
        let mut env = env(4);
        for _ in 0..200 {
            env.shuffle_and_deal().unwrap();
            assert!(!env.turn_finished());
            env.apply_action(Action::Stand).unwrap();
            assert!(env.turn_finished());
            assert_eq!(DealerPhase::of(env.dealer_hand().value()), DealerPhase::Done);
            let reward = env.terminal_reward().unwrap();
            assert!([WIN_REWARD, LOSS_REWARD, PUSH_REWARD].contains(&reward));
        }
    }

    #[test]
    fn test_hit_until_bust() {
        let mut env = env(8);
        env.initialize_forced(StateIndex::encode(20, false, 5).unwrap())
            .unwrap();
        env.shuffle_and_deal().unwrap();
        while !env.turn_finished() {
            env.apply_action(Action::Hit).unwrap();
        }
        assert!(env.player_hand().is_bust());
        assert_eq!(env.current_state(), None);
        assert_eq!(env.terminal_reward().unwrap(), LOSS_REWARD);
    }

    #[test]
    fn test_action_after_finish_rejected() {
        let mut env = env(5);
        env.shuffle_and_deal().unwrap();
        env.apply_action(Action::Stand).unwrap();
        assert!(matches!(
            env.apply_action(Action::Hit),
            Err(Error::TurnFinished)
        ));
    }

    #[test]
    fn test_reward_before_finish_rejected() {
        let mut env = env(5);
        env.shuffle_and_deal().unwrap();
        assert!(matches!(env.terminal_reward(), Err(Error::TurnNotFinished)));
    }

    #[test]
    fn test_state_before_deal_is_terminal() {
        let env = env(1);
        assert_eq!(env.current_state(), None);
        assert_eq!(env.current_index().unwrap(), StateIndex::TERMINAL);
    }

    #[test]
    fn test_outcome_from_reward() {
        assert_eq!(Outcome::from_reward(WIN_REWARD), Outcome::Win);
        assert_eq!(Outcome::from_reward(LOSS_REWARD), Outcome::Loss);
        assert_eq!(Outcome::from_reward(PUSH_REWARD), Outcome::Push);
    }
}

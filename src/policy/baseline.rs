//! Fixed reference strategies

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Result,
    blackjack::{Action, State},
    ports::Strategy,
};

/// Never draws a card.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandStrategy;

impl Strategy for StandStrategy {
    fn decide(&mut self, _state: State) -> Result<Action> {
        Ok(Action::Stand)
    }

    fn name(&self) -> &str {
        "stand"
    }
}

/// Hits or stands with equal probability.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl Strategy for RandomStrategy {
    fn decide(&mut self, _state: State) -> Result<Action> {
        Ok(if self.rng.random_bool(0.5) {
            Action::Hit
        } else {
            Action::Stand
        })
    }

    fn name(&self) -> &str {
        "random"
    }
}

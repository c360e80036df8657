//! Evaluation harness
//!
//! Plays naturally dealt hands (no forced starts, no exploration) with any
//! [`Strategy`] and reports outcome rates. The interval on the win rate is a
//! Wilson score interval.

use std::{fs::File, path::Path};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::{debug, info};

use crate::{
    Error, Result,
    blackjack::{Environment, env::Outcome},
    pipeline::training::{OutcomeTally, ratio},
    ports::Strategy,
};

/// Evaluation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Hands to play
    pub hands: usize,

    /// Decks in the shoe
    pub deck_count: usize,

    /// Random seed
    pub seed: Option<u64>,

    /// Confidence level of the win-rate interval
    pub confidence: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            hands: 100_000,
            deck_count: 6,
            seed: None,
            confidence: 0.95,
        }
    }
}

impl EvaluationConfig {
    pub fn with_hands(mut self, hands: usize) -> Self {
        self.hands = hands;
        self
    }

    pub fn with_deck_count(mut self, deck_count: usize) -> Self {
        self.deck_count = deck_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let problem = if self.hands == 0 {
            Some("hands must be at least 1")
        } else if self.deck_count == 0 {
            Some("deck count must be at least 1")
        } else if !(self.confidence > 0.0 && self.confidence < 1.0) {
            Some("confidence must lie strictly between 0 and 1")
        } else {
            None
        };
        match problem {
            Some(message) => Err(Error::InvalidConfiguration {
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Outcome rates of an evaluated strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub strategy: String,
    pub hands: usize,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub push_rate: f64,
    /// Mean reward per hand, in reward units (+10 / 0 / -10)
    pub mean_reward: f64,
    /// Lower and upper bound of the win-rate interval
    pub win_rate_interval: (f64, f64),
    pub confidence: f64,
}

impl EvaluationReport {
    fn new(strategy: &str, tally: OutcomeTally, total_reward: i64, confidence: f64) -> Result<Self> {
        let hands = tally.total();
        Ok(Self {
            strategy: strategy.to_string(),
            hands,
            wins: tally.wins,
            losses: tally.losses,
            pushes: tally.pushes,
            win_rate: ratio(tally.wins, hands),
            loss_rate: ratio(tally.losses, hands),
            push_rate: ratio(tally.pushes, hands),
            mean_reward: if hands > 0 {
                total_reward as f64 / hands as f64
            } else {
                0.0
            },
            win_rate_interval: wilson_interval(tally.wins, hands, confidence)?,
            confidence,
        })
    }

    /// Save report to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load report from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Wilson score interval for `successes` out of `trials`.
pub fn wilson_interval(successes: usize, trials: usize, confidence: f64) -> Result<(f64, f64)> {
    if trials == 0 {
        return Ok((0.0, 1.0));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| Error::InvalidConfiguration {
        message: e.to_string(),
    })?;
    let z = normal.inverse_cdf(0.5 + confidence / 2.0);
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;
    let centre = (p + z2 / (2.0 * n)) / (1.0 + z2 / n);
    let half = z / (1.0 + z2 / n) * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();
    Ok(((centre - half).max(0.0), (centre + half).min(1.0)))
}

/// Play `config.hands` natural hands with `strategy`.
pub fn evaluate(strategy: &mut dyn Strategy, config: &EvaluationConfig) -> Result<EvaluationReport> {
    config.validate()?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let mut env = Environment::new(config.deck_count, rng)?;

    let mut tally = OutcomeTally::default();
    let mut total_reward: i64 = 0;
    for hand in 0..config.hands {
        env.shuffle_and_deal()?;
        while !env.turn_finished() {
            let state = env.current_state().ok_or_else(|| {
                Error::invalid_state("no decision state while the turn is running")
            })?;
            let action = strategy.decide(state)?;
            env.apply_action(action)?;
        }
        let reward = env.terminal_reward()?;
        total_reward += i64::from(reward);
        tally.record(Outcome::from_reward(reward));

        if (hand + 1) % 10_000 == 0 {
            debug!(hands = hand + 1, wins = tally.wins, "evaluation progress");
        }
    }

    let report = EvaluationReport::new(strategy.name(), tally, total_reward, config.confidence)?;
    info!(
        strategy = %report.strategy,
        hands = report.hands,
        win_rate = report.win_rate,
        loss_rate = report.loss_rate,
        "evaluation complete"
    );
    Ok(report)
}

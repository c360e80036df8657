//! Training scheduler for the Q-learning agent
//!
//! A run is a sequence of timesteps. Each timestep decays the agent's rates
//! to 1/t, simulates a batch of exploring-start episodes, then applies the
//! agent's update once per recorded transition in a single sequential pass.
//!
//! # Determinism
//!
//! Episodes are simulated in fixed-size chunks. Every chunk receives its own
//! environment and generator, seeded in chunk order from a generator that is
//! a pure function of the run seed and the timestep. A resumed run therefore
//! draws the same episodes as an uninterrupted one. Chunk traces are concatenated in chunk order
//! and, within a chunk, in episode order. Because the update pass links each
//! transition to the next entry of that flat sequence, this ordering is part
//! of the training semantics: the same seed yields the same Q-table whether
//! chunks run sequentially or on the rayon pool, on any number of threads.

use std::{fs::File, num::NonZeroU64, path::Path};

use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    blackjack::{Action, Environment, STATE_DIM, StateIndex, env::Outcome},
    ports::Observer,
    q_learning::{QLearningAgent, TrainingMetadata},
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of timesteps to run
    pub timesteps: u64,

    /// Episodes simulated per timestep
    pub episodes_per_step: usize,

    /// Decks in the shoe
    pub deck_count: usize,

    /// Random seed
    pub seed: Option<u64>,

    /// Simulate chunks on the rayon pool
    pub parallel: bool,

    /// Episodes per simulation chunk
    pub chunk_size: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            timesteps: 250,
            episodes_per_step: 100_000,
            deck_count: 6,
            seed: None,
            parallel: true,
            chunk_size: 1_000,
        }
    }
}

impl TrainingConfig {
    pub fn with_timesteps(mut self, timesteps: u64) -> Self {
        self.timesteps = timesteps;
        self
    }

    pub fn with_episodes_per_step(mut self, episodes: usize) -> Self {
        self.episodes_per_step = episodes;
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

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Reject configurations that cannot run.
    pub fn validate(&self) -> Result<()> {
        let problem = if self.timesteps == 0 {
            Some("timesteps must be at least 1")
        } else if self.episodes_per_step == 0 {
            Some("episodes per step must be at least 1")
        } else if self.deck_count == 0 {
            Some("deck count must be at least 1")
        } else if self.chunk_size == 0 {
            Some("chunk size must be at least 1")
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

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open config {}", path.as_ref().display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// One recorded `(state, action, reward)` tuple.
///
/// Each episode trace ends with a sentinel tuple whose state is
/// [`StateIndex::TERMINAL`]; it is never an update target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: StateIndex,
    pub action: Action,
    pub reward: f64,
}

impl Transition {
    pub const SENTINEL: Transition = Transition {
        state: StateIndex::TERMINAL,
        action: Action::Stand,
        reward: 0.0,
    };

    pub fn is_sentinel(&self) -> bool {
        self.state.is_terminal()
    }
}

/// Win/loss/push counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Push => self.pushes += 1,
        }
    }

    pub fn merge(&mut self, other: OutcomeTally) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.pushes += other.pushes;
    }

    pub fn total(&self) -> usize {
        self.wins + self.losses + self.pushes
    }
}

/// Statistics for one completed timestep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    /// Timestep index (starts at 1)
    pub timestep: u64,
    /// Episodes simulated
    pub episodes: usize,
    /// Updates applied (sentinel tuples excluded)
    pub updates: usize,
    /// Wins under the behaviour policy
    pub wins: usize,
    /// Losses under the behaviour policy
    pub losses: usize,
    /// Pushes under the behaviour policy
    pub pushes: usize,
    /// Learning rate used for this timestep
    pub learning_rate: f64,
    /// Exploration rate used for this timestep
    pub epsilon: f64,
}

impl StepSummary {
    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.episodes)
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Timesteps executed in this run
    pub timesteps: u64,

    /// Last timestep executed
    pub final_timestep: u64,

    /// Episodes simulated in this run
    pub episodes: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of losses
    pub losses: usize,

    /// Number of pushes
    pub pushes: usize,

    /// Win rate
    pub win_rate: f64,

    /// Loss rate
    pub loss_rate: f64,

    /// Push rate
    pub push_rate: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(timesteps: u64, final_timestep: u64, tally: OutcomeTally) -> Self {
        let episodes = tally.total();
        Self {
            timesteps,
            final_timestep,
            episodes,
            wins: tally.wins,
            losses: tally.losses,
            pushes: tally.pushes,
            win_rate: ratio(tally.wins, episodes),
            loss_rate: ratio(tally.losses, episodes),
            push_rate: ratio(tally.pushes, episodes),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

pub(crate) fn ratio(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    }
}

/// Play one exploring-start episode and append its trace to `trace`.
///
/// The episode starts in `start`, follows the agent's ε-greedy policy until
/// the player stands or busts, and ends with a sentinel tuple. Only the last
/// player decision carries the episode reward; earlier decisions get 0 and
/// learn through the bootstrapped value of their successor.
///
/// Returns the episode reward.
pub fn collect_episode<R: Rng + ?Sized>(
    agent: &QLearningAgent,
    env: &mut Environment,
    start: StateIndex,
    rng: &mut R,
    trace: &mut Vec<Transition>,
) -> Result<i32> {
    env.initialize_forced(start)?;
    env.shuffle_and_deal()?;

    let first = trace.len();
    while !env.turn_finished() {
        let state = env.current_index()?;
        if state.is_terminal() {
            return Err(Error::invalid_state(
                "environment reported a terminal state before the turn finished",
            ));
        }
        let action = agent.select_action_with(state, rng);
        trace.push(Transition {
            state,
            action,
            reward: 0.0,
        });
        env.apply_action(action)?;
    }

    let reward = env.terminal_reward()?;
    if let Some(last) = trace[first..].last_mut() {
        last.reward = f64::from(reward);
    }
    trace.push(Transition::SENTINEL);
    Ok(reward)
}

fn timestep_rng(seed: u64, timestep: NonZeroU64) -> StdRng {
    // Golden-ratio stride over timesteps
    StdRng::seed_from_u64(seed ^ timestep.get().wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

struct ChunkPlan {
    episodes: usize,
    seed: u64,
}

struct ChunkOutput {
    trace: Vec<Transition>,
    tally: OutcomeTally,
}

fn run_chunk(agent: &QLearningAgent, deck_count: usize, plan: &ChunkPlan) -> Result<ChunkOutput> {
    let mut rng = StdRng::seed_from_u64(plan.seed);
    let mut env = Environment::new(deck_count, StdRng::from_rng(&mut rng))?;
    // Typical episodes record one or two decisions plus the sentinel
    let mut trace = Vec::with_capacity(plan.episodes * 3);
    let mut tally = OutcomeTally::default();

    for _ in 0..plan.episodes {
        let start = StateIndex::from_raw(rng.random_range(1..STATE_DIM))?;
        let reward = collect_episode(agent, &mut env, start, &mut rng, &mut trace)?;
        tally.record(Outcome::from_reward(reward));
    }

    Ok(ChunkOutput { trace, tally })
}

/// Apply the agent's update over a flat batch trace.
///
/// Each non-sentinel tuple is updated with the state of the following tuple
/// as its successor, or the terminal sentinel for the last tuple. Returns the
/// number of updates applied.
pub fn apply_batch(agent: &mut QLearningAgent, trace: &[Transition]) -> Result<usize> {
    let mut updates = 0;
    for (i, transition) in trace.iter().enumerate() {
        if transition.is_sentinel() {
            continue;
        }
        let next_state = trace
            .get(i + 1)
            .map_or(StateIndex::TERMINAL, |next| next.state);
        agent.update(
            transition.state,
            transition.action,
            transition.reward,
            next_state,
        )?;
        updates += 1;
    }
    Ok(updates)
}

/// Drives repeated timesteps of batch collection and Q-learning updates.
pub struct Trainer {
    config: TrainingConfig,
    agent: QLearningAgent,
    seed: u64,
    timestep: NonZeroU64,
    episodes_trained: u64,
    observers: Vec<Box<dyn Observer>>,
}

impl Trainer {
    /// Create a trainer with a fresh agent.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        let agent = QLearningAgent::new(config.seed.map(|seed| seed.wrapping_add(1)));
        Self::with_agent(config, agent, &TrainingMetadata::default())
    }

    /// Continue training an existing agent from where `metadata` left off.
    ///
    /// Without a configured seed the run keeps the seed recorded in
    /// `metadata`, or draws a fresh one.
    pub fn with_agent(
        mut config: TrainingConfig,
        agent: QLearningAgent,
        metadata: &TrainingMetadata,
    ) -> Result<Self> {
        config.validate()?;
        config.seed = config.seed.or(metadata.seed);
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Ok(Self {
            config,
            agent,
            seed,
            timestep: NonZeroU64::MIN.saturating_add(metadata.timesteps_trained),
            episodes_trained: metadata.episodes_trained,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the trainer
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run `config.timesteps` timesteps.
    pub fn train(&mut self) -> Result<TrainingResult> {
        self.run(self.config.timesteps)
    }

    /// Run `timesteps` further timesteps, continuing from the current one.
    pub fn run(&mut self, timesteps: u64) -> Result<TrainingResult> {
        for observer in &mut self.observers {
            observer.on_training_start(timesteps)?;
        }

        let mut tally = OutcomeTally::default();
        for _ in 0..timesteps {
            let summary = self.step()?;
            tally.merge(OutcomeTally {
                wins: summary.wins,
                losses: summary.losses,
                pushes: summary.pushes,
            });
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::new(timesteps, self.timestep.get() - 1, tally);
        info!(
            timesteps = result.timesteps,
            episodes = result.episodes,
            win_rate = result.win_rate,
            "training run complete"
        );
        Ok(result)
    }

    /// Run a single timestep.
    pub fn step(&mut self) -> Result<StepSummary> {
        let timestep = self.timestep;
        self.agent.decay(timestep);

        let plans = self.plan_chunks();
        let agent = &self.agent;
        let deck_count = self.config.deck_count;
        let outputs: Vec<ChunkOutput> = if self.config.parallel {
            plans
                .par_iter()
                .map(|plan| run_chunk(agent, deck_count, plan))
                .collect::<Result<_>>()?
        } else {
            plans
                .iter()
                .map(|plan| run_chunk(agent, deck_count, plan))
                .collect::<Result<_>>()?
        };

        let mut tally = OutcomeTally::default();
        let mut trace = Vec::with_capacity(outputs.iter().map(|o| o.trace.len()).sum());
        for output in outputs {
            tally.merge(output.tally);
            trace.extend(output.trace);
        }
        debug!(
            timestep = timestep.get(),
            chunks = plans.len(),
            transitions = trace.len(),
            "batch collected"
        );

        let updates = apply_batch(&mut self.agent, &trace)?;

        let summary = StepSummary {
            timestep: timestep.get(),
            episodes: tally.total(),
            updates,
            wins: tally.wins,
            losses: tally.losses,
            pushes: tally.pushes,
            learning_rate: self.agent.learning_rate(),
            epsilon: self.agent.epsilon(),
        };
        info!(
            timestep = summary.timestep,
            episodes = summary.episodes,
            updates = summary.updates,
            win_rate = summary.win_rate(),
            "timestep complete"
        );

        for observer in &mut self.observers {
            observer.on_step_end(&summary)?;
        }

        self.episodes_trained += summary.episodes as u64;
        self.timestep = timestep.saturating_add(1);
        Ok(summary)
    }

    fn plan_chunks(&self) -> Vec<ChunkPlan> {
        let chunk_size = self.config.chunk_size;
        let total = self.config.episodes_per_step;
        let mut rng = timestep_rng(self.seed, self.timestep);
        (0..total.div_ceil(chunk_size))
            .map(|chunk| ChunkPlan {
                episodes: chunk_size.min(total - chunk * chunk_size),
                seed: rng.random(),
            })
            .collect()
    }

    /// Next timestep to run.
    pub fn timestep(&self) -> NonZeroU64 {
        self.timestep
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn into_agent(self) -> QLearningAgent {
        self.agent
    }

    /// Metadata describing the training performed so far.
    pub fn metadata(&self) -> TrainingMetadata {
        TrainingMetadata {
            timesteps_trained: self.timestep.get() - 1,
            episodes_trained: self.episodes_trained,
            episodes_per_step: self.config.episodes_per_step,
            deck_count: self.config.deck_count,
            seed: Some(self.seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::SavedAgent;

    fn small_config(seed: u64) -> TrainingConfig {
        TrainingConfig::default()
            .with_timesteps(3)
            .with_episodes_per_step(500)
            .with_chunk_size(64)
            .with_seed(seed)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrainingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let base = TrainingConfig::default();
        assert!(base.clone().with_timesteps(0).validate().is_err());
        assert!(base.clone().with_episodes_per_step(0).validate().is_err());
        assert!(base.clone().with_deck_count(0).validate().is_err());
        assert!(base.with_chunk_size(0).validate().is_err());
    }

    #[test]
    fn test_only_last_decision_rewarded() {
        let mut agent = QLearningAgent::new(Some(1));
        agent.decay(NonZeroU64::MIN);
        let mut env = Environment::with_seed(6, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        let mut multi_step_seen = false;
        for raw in 1..STATE_DIM {
            let mut trace = Vec::new();
            let start = StateIndex::from_raw(raw).unwrap();
            let reward = collect_episode(&agent, &mut env, start, &mut rng, &mut trace).unwrap();

            let (sentinel, decisions) = trace.split_last().unwrap();
            assert!(sentinel.is_sentinel());
            assert!(!decisions.is_empty());
            assert!(decisions.iter().all(|t| !t.is_sentinel()));

            let (last, earlier) = decisions.split_last().unwrap();
            assert_eq!(last.reward, f64::from(reward));
            assert!(earlier.iter().all(|t| t.reward == 0.0));
            assert!(earlier.iter().all(|t| t.action == Action::Hit));
            multi_step_seen |= !earlier.is_empty();
        }
        assert!(multi_step_seen);
    }

    #[test]
    fn test_apply_batch_does_not_cross_episodes() {
        let mut agent = QLearningAgent::new(Some(1));
        agent.decay(NonZeroU64::MIN);

        let a = StateIndex::encode(20, false, 10).unwrap();
        let b = StateIndex::encode(12, false, 10).unwrap();
        let trace = vec![
            Transition {
                state: a,
                action: Action::Stand,
                reward: 10.0,
            },
            Transition::SENTINEL,
            Transition {
                state: b,
                action: Action::Hit,
                reward: -10.0,
            },
            Transition::SENTINEL,
        ];
        let updates = apply_batch(&mut agent, &trace).unwrap();
        assert_eq!(updates, 2);
        // α = 1 and terminal successors: values equal the rewards exactly
        assert_eq!(agent.q_value(a, Action::Stand), 10.0);
        assert_eq!(agent.q_value(b, Action::Hit), -10.0);
        assert_eq!(agent.visits(StateIndex::TERMINAL, Action::Stand), 0);
    }

    #[test]
    fn test_apply_batch_bootstraps_within_episode() {
        let mut agent = QLearningAgent::new(Some(1));
        agent.decay(NonZeroU64::MIN);

        let soft = StateIndex::encode(14, true, 6).unwrap();
        let hard = StateIndex::encode(19, false, 6).unwrap();
        let trace = vec![
            Transition {
                state: hard,
                action: Action::Stand,
                reward: 10.0,
            },
            Transition::SENTINEL,
            Transition {
                state: soft,
                action: Action::Hit,
                reward: 0.0,
            },
            Transition {
                state: hard,
                action: Action::Stand,
                reward: -10.0,
            },
            Transition::SENTINEL,
        ];
        apply_batch(&mut agent, &trace).unwrap();
        // soft 14 hit bootstraps from max Q(hard 19) = 10 at that point
        assert_eq!(agent.q_value(soft, Action::Hit), 10.0);
        assert_eq!(agent.q_value(hard, Action::Stand), -10.0);
    }

    #[test]
    fn test_step_advances_timestep_and_decays() {
        let mut trainer = Trainer::new(small_config(7)).unwrap();
        assert_eq!(trainer.timestep().get(), 1);
        let first = trainer.step().unwrap();
        assert_eq!(first.timestep, 1);
        assert_eq!(first.learning_rate, 1.0);
        assert_eq!(first.episodes, 500);
        assert_eq!(first.wins + first.losses + first.pushes, 500);
        assert!(first.updates >= 500);

        let second = trainer.step().unwrap();
        assert_eq!(second.timestep, 2);
        assert_eq!(second.epsilon, 0.5);
        assert_eq!(trainer.timestep().get(), 3);
        assert_eq!(trainer.metadata().episodes_trained, 1000);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut sequential = Trainer::new(small_config(21).with_parallel(false)).unwrap();
        let mut parallel = Trainer::new(small_config(21).with_parallel(true)).unwrap();
        sequential.train().unwrap();
        parallel.train().unwrap();
        assert_eq!(sequential.agent().q_table(), parallel.agent().q_table());
    }

    #[test]
    fn test_same_seed_same_table() {
        let mut a = Trainer::new(small_config(5)).unwrap();
        let mut b = Trainer::new(small_config(5)).unwrap();
        a.train().unwrap();
        b.train().unwrap();
        assert_eq!(a.agent().q_table(), b.agent().q_table());

        let mut c = Trainer::new(small_config(6)).unwrap();
        c.train().unwrap();
        assert_ne!(a.agent().q_table(), c.agent().q_table());
    }

    #[test]
    fn test_resume_continues_timesteps() {
        let mut trainer = Trainer::new(small_config(3)).unwrap();
        trainer.run(2).unwrap();
        let metadata = trainer.metadata();
        assert_eq!(metadata.timesteps_trained, 2);

        let agent = trainer.into_agent();
        let mut resumed = Trainer::with_agent(small_config(4), agent, &metadata).unwrap();
        let summary = resumed.step().unwrap();
        assert_eq!(summary.timestep, 3);
        assert!((summary.learning_rate - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_saved_and_resumed_run_matches_uninterrupted() {
        let config = small_config(42);
        let mut continuous = Trainer::new(config.clone()).unwrap();
        continuous.run(4).unwrap();

        let mut first = Trainer::new(config.clone()).unwrap();
        first.run(2).unwrap();
        let saved = SavedAgent::from_agent(first.agent(), first.metadata());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.msgpack");
        saved.save_to_file(&path).unwrap();

        let loaded = SavedAgent::load_from_file(&path).unwrap();
        let mut resumed =
            Trainer::with_agent(config, loaded.to_agent().unwrap(), &loaded.metadata).unwrap();
        resumed.run(2).unwrap();

        assert_eq!(resumed.timestep(), continuous.timestep());
        assert_eq!(continuous.agent().q_table(), resumed.agent().q_table());
    }

    #[test]
    fn test_resume_without_seed_keeps_recorded_seed() {
        let mut first = Trainer::new(small_config(9)).unwrap();
        first.run(1).unwrap();
        let metadata = first.metadata();
        assert_eq!(metadata.seed, Some(9));

        let unseeded = TrainingConfig {
            seed: None,
            ..small_config(9)
        };
        let resumed = Trainer::with_agent(unseeded, first.into_agent(), &metadata).unwrap();
        assert_eq!(resumed.config().seed, Some(9));
    }

    #[test]
    fn test_unseeded_trainer_records_drawn_seed() {
        let config = TrainingConfig {
            seed: None,
            ..small_config(0)
        };
        let trainer = Trainer::new(config).unwrap();
        assert!(trainer.metadata().seed.is_some());
    }

    #[test]
    fn test_transition_rejects_out_of_range_state() {
        let json = r#"{"state":9999,"action":"Stand","reward":0.0}"#;
        assert!(serde_json::from_str::<Transition>(json).is_err());
        let json = r#"{"state":20,"action":"Hit","reward":0.0}"#;
        let transition: Transition = serde_json::from_str(json).unwrap();
        assert_eq!(transition.state.as_usize(), 20);
    }

    #[test]
    fn test_small_shoe_still_trains() {
        let config = small_config(8).with_deck_count(1);
        let mut trainer = Trainer::new(config).unwrap();
        let result = trainer.train().unwrap();
        assert_eq!(result.episodes, 1500);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = small_config(11).with_parallel(false);
        config.save(&path).unwrap();
        assert_eq!(TrainingConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TrainingConfig = serde_json::from_str(r#"{"timesteps": 5}"#).unwrap();
        assert_eq!(config.timesteps, 5);
        assert_eq!(config.episodes_per_step, 100_000);
        assert_eq!(config.deck_count, 6);
    }
}

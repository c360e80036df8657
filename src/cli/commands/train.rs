//! Train command - Run the Q-learning trainer

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        commands::load_agent,
        output::{format_number, format_rate, print_kv, print_report, print_section},
    },
    pipeline::{
        EvaluationConfig, EvaluationReport, JsonlObserver, MetricsObserver, MetricsSummary,
        ProgressObserver, Trainer, TrainingConfig, TrainingResult, evaluate,
    },
    policy::StrategyTable,
    q_learning::{SavedAgent, TrainingMetadata},
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    config: TrainingConfig,
    training: TrainingResult,
    metrics: MetricsSummary,
    metadata: TrainingMetadata,
    evaluation: Option<EvaluationReport>,
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent")]
pub struct TrainArgs {
    /// Number of timesteps (each decays the rates to 1/t)
    #[arg(long, short = 't')]
    pub timesteps: Option<u64>,

    /// Episodes simulated per timestep
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Decks in the shoe
    #[arg(long, short = 'd')]
    pub decks: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Episodes per simulation chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Simulate episodes on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// JSON training configuration; flags override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Continue training a saved agent
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Output file for the trained agent (MessagePack)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output file for the greedy policy table
    #[arg(long, short = 'p')]
    pub policy: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional file for per-timestep JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Hands to evaluate the greedy policy on after training (0 to skip)
    #[arg(long, default_value_t = 0)]
    pub eval_hands: usize,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

impl TrainArgs {
    /// Resolve the training configuration from the config file and flags.
    pub fn training_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => TrainingConfig::default(),
        };
        if let Some(timesteps) = self.timesteps {
            config.timesteps = timesteps;
        }
        if let Some(episodes) = self.episodes {
            config.episodes_per_step = episodes;
        }
        if let Some(decks) = self.decks {
            config.deck_count = decks;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if self.sequential {
            config.parallel = false;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.training_config()?;

    let mut trainer = match &args.resume {
        Some(path) => {
            let (agent, metadata) = load_agent(path)?;
            println!(
                "Resuming from {} after {} timesteps",
                path.display(),
                metadata.timesteps_trained
            );
            Trainer::with_agent(config.clone(), agent, &metadata)?
        }
        None => Trainer::new(config.clone())?,
    };
    let config = trainer.config().clone();

    print_section("Training");
    print_kv("Timesteps", &format_number(config.timesteps));
    print_kv(
        "Episodes per step",
        &format_number(config.episodes_per_step as u64),
    );
    print_kv("Decks", &config.deck_count.to_string());
    print_kv("Starting timestep", &trainer.timestep().to_string());
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let metrics = MetricsObserver::new();
    trainer = trainer.with_observer(Box::new(metrics.clone()));
    if args.progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        trainer = trainer.with_observer(Box::new(observer));
    }

    let result = trainer.train()?;
    let metadata = trainer.metadata();

    print_section("Results");
    print_kv("Episodes", &format_number(result.episodes as u64));
    print_kv("Final timestep", &result.final_timestep.to_string());
    print_kv("Behaviour win rate", &format_rate(result.win_rate));
    print_kv("Behaviour loss rate", &format_rate(result.loss_rate));

    let mut agent = trainer.into_agent();
    let table = StrategyTable::from_agent(&agent)?;
    let (hard_hits, soft_hits) = table.hit_counts();
    print_kv("Hit cells", &format!("{hard_hits} hard, {soft_hits} soft"));

    let evaluation = if args.eval_hands > 0 {
        let mut eval_config = EvaluationConfig::default()
            .with_hands(args.eval_hands)
            .with_deck_count(config.deck_count);
        if let Some(seed) = config.seed {
            eval_config = eval_config.with_seed(seed.wrapping_add(2));
        }
        print_section("Evaluation");
        let report = evaluate(&mut agent, &eval_config)?;
        print_report(&report);
        Some(report)
    } else {
        None
    };

    if let Some(path) = &args.output {
        SavedAgent::from_agent(&agent, metadata.clone()).save_to_file(path)?;
        println!("\nAgent saved to: {}", path.display());
    }

    if let Some(path) = &args.policy {
        table
            .save(path)
            .with_context(|| format!("Failed to write policy to {}", path.display()))?;
        println!("Policy saved to: {}", path.display());
    }

    if let Some(path) = &args.summary {
        let summary = TrainingSummaryFile {
            config,
            training: result,
            metrics: metrics.summary(),
            metadata,
            evaluation,
        };
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("Summary saved to: {}", path.display());
    }

    Ok(())
}

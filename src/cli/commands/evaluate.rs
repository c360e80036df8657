//! Evaluate command - Play naturally dealt hands with a strategy

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        commands::{is_policy_file, load_agent},
        output::{print_kv, print_report, print_section},
    },
    pipeline::{EvaluationConfig, evaluate},
    policy::{RandomStrategy, StandStrategy, StrategyTable},
    ports::Strategy,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a strategy")]
pub struct EvaluateArgs {
    /// Strategy to evaluate: `stand`, `random`, a policy `.txt` file or a
    /// saved agent
    pub strategy: String,

    /// Number of hands to play
    #[arg(long, short = 'n', default_value_t = 100_000)]
    pub hands: usize,

    /// Decks in the shoe
    #[arg(long, short = 'd', default_value_t = 6)]
    pub decks: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Confidence level of the win-rate interval
    #[arg(long, default_value_t = 0.95)]
    pub confidence: f64,

    /// Export the report to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Resolve a strategy argument.
pub fn load_strategy(source: &str, seed: Option<u64>) -> Result<Box<dyn Strategy>> {
    match source.to_ascii_lowercase().as_str() {
        "stand" => return Ok(Box::new(StandStrategy)),
        "random" => return Ok(Box::new(RandomStrategy::new(seed))),
        _ => {}
    }

    let path = Path::new(source);
    if is_policy_file(path) {
        let table = StrategyTable::load(path)
            .with_context(|| format!("Failed to load policy from {}", path.display()))?;
        Ok(Box::new(table))
    } else {
        let (agent, _) = load_agent(path)?;
        Ok(Box::new(agent))
    }
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let mut strategy = load_strategy(&args.strategy, args.seed)?;

    let mut config = EvaluationConfig::default()
        .with_hands(args.hands)
        .with_deck_count(args.decks)
        .with_confidence(args.confidence);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    print_section("Evaluation");
    print_kv("Source", &args.strategy);
    print_kv("Decks", &args.decks.to_string());
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }
    println!();

    let report = evaluate(strategy.as_mut(), &config)?;
    print_report(&report);

    if let Some(path) = &args.export {
        report
            .save(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("\nReport saved to: {}", path.display());
    }

    Ok(())
}

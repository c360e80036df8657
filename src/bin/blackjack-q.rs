//! blackjack-q CLI - Train and evaluate tabular Q-learning blackjack agents
//!
//! This CLI provides a unified interface for:
//! - Training agents with exploring starts
//! - Evaluating trained agents, policy tables and baselines
//! - Exporting greedy policies and Q-tables
//! - Printing policy tables

use anyhow::Result;
use blackjack_q::{
    cli::commands::{evaluate, export, show, train},
    logging::init_logging,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blackjack-q")]
#[command(version, about = "Tabular Q-learning for two-action blackjack", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent
    Train(Box<train::TrainArgs>),

    /// Evaluate a strategy on naturally dealt hands
    Evaluate(evaluate::EvaluateArgs),

    /// Export a trained agent as a policy table or CSV
    Export(export::ExportArgs),

    /// Print the policy of an agent or policy file
    Show(show::ShowArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Train(args) => train::execute(*args),
        Commands::Evaluate(args) => evaluate::execute(args),
        Commands::Export(args) => export::execute(args),
        Commands::Show(args) => show::execute(args),
    }
}

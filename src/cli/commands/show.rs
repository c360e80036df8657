//! Show command - Print a policy table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        commands::{is_policy_file, load_agent},
        output::{format_number, print_kv, print_policy, print_section},
    },
    policy::StrategyTable,
};

#[derive(Parser, Debug)]
#[command(about = "Print the greedy policy of an agent or policy file")]
pub struct ShowArgs {
    /// Saved agent or policy `.txt` file
    pub source: PathBuf,
}

pub fn execute(args: ShowArgs) -> Result<()> {
    let table = if is_policy_file(&args.source) {
        print_section(&format!("Policy {}", args.source.display()));
        StrategyTable::load(&args.source)
            .with_context(|| format!("Failed to load policy from {}", args.source.display()))?
    } else {
        let (agent, metadata) = load_agent(&args.source)?;
        print_section(&format!("Agent {}", args.source.display()));
        print_kv("Timesteps", &format_number(metadata.timesteps_trained));
        print_kv("Episodes", &format_number(metadata.episodes_trained));
        print_kv("Decks", &metadata.deck_count.to_string());
        print_kv("Visited pairs", &agent.q_table().visited_pairs().to_string());
        StrategyTable::from_agent(&agent)?
    };

    print_policy(&table);
    Ok(())
}

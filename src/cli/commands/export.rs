//! Export command - Write a saved agent's tables in other formats

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{cli::commands::load_agent, export::QTableCsvExporter, policy::StrategyTable};

#[derive(Parser, Debug)]
#[command(about = "Export a trained agent")]
pub struct ExportArgs {
    /// Saved agent (MessagePack)
    pub agent: PathBuf,

    /// Output file path
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Export format
    #[arg(long, short = 'f', value_enum, default_value = "policy")]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Greedy policy in the hard/soft text layout
    Policy,
    /// Q-values, visit counts and greedy action per state
    Csv,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let (agent, _) = load_agent(&args.agent)?;

    match args.format {
        ExportFormat::Policy => {
            StrategyTable::from_agent(&agent)?
                .save(&args.output)
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
            println!("Policy exported to: {}", args.output.display());
        }
        ExportFormat::Csv => {
            let rows = QTableCsvExporter::export(&agent, &args.output)
                .with_context(|| format!("Failed to write {}", args.output.display()))?;
            println!("Exported {rows} states to: {}", args.output.display());
        }
    }

    Ok(())
}

//! Subcommands of the `blackjack-q` binary

pub mod evaluate;
pub mod export;
pub mod show;
pub mod train;

use std::path::Path;

use anyhow::{Context, Result};

use crate::q_learning::{QLearningAgent, SavedAgent, TrainingMetadata};

/// Load a saved agent together with how it was trained.
pub(crate) fn load_agent(path: &Path) -> Result<(QLearningAgent, TrainingMetadata)> {
    let saved = SavedAgent::load_from_file(path)
        .with_context(|| format!("Failed to load agent from {}", path.display()))?;
    let agent = saved.to_agent()?;
    Ok((agent, saved.metadata))
}

/// Whether `path` names a policy text file rather than a saved agent.
pub(crate) fn is_policy_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the trainer to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Result, pipeline::training::StepSummary, ports::Observer};

/// Progress bar observer - Shows training progress per timestep
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    completed: u64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            completed: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, timesteps: u64) -> Result<()> {
        let pb = ProgressBar::new(timesteps);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} steps ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        self.completed = 0;
        Ok(())
    }

    fn on_step_end(&mut self, summary: &StepSummary) -> Result<()> {
        self.completed += 1;
        if let Some(pb) = &self.progress_bar {
            pb.set_position(self.completed);
            pb.set_message(format!(
                "t={} W:{:.3}",
                summary.timestep,
                summary.win_rate()
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message("done");
        }
        Ok(())
    }
}

/// Metrics observer - Keeps every step summary for later inspection
///
/// The history lives behind an `Arc<Mutex<_>>` so a handle can be kept after
/// the observer is boxed into a trainer.
#[derive(Clone, Default)]
pub struct MetricsObserver {
    history: Arc<Mutex<Vec<StepSummary>>>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the summaries recorded so far
    pub fn history(&self) -> Vec<StepSummary> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Summary of the recorded history
    pub fn summary(&self) -> MetricsSummary {
        let history = self.history();
        let episodes: usize = history.iter().map(|s| s.episodes).sum();
        let wins: usize = history.iter().map(|s| s.wins).sum();
        MetricsSummary {
            timesteps: history.len(),
            episodes,
            updates: history.iter().map(|s| s.updates).sum(),
            behaviour_win_rate: super::training::ratio(wins, episodes),
            final_epsilon: history.last().map(|s| s.epsilon),
        }
    }
}

impl Observer for MetricsObserver {
    fn on_step_end(&mut self, summary: &StepSummary) -> Result<()> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(summary.clone());
        Ok(())
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub timesteps: usize,
    pub episodes: usize,
    pub updates: usize,
    pub behaviour_win_rate: f64,
    pub final_epsilon: Option<f64>,
}

/// JSONL observer - Writes one step summary per line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a JSONL observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|source| crate::Error::Io {
            operation: format!("create {}", path.as_ref().display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_step_end(&mut self, summary: &StepSummary) -> Result<()> {
        serde_json::to_writer(&mut self.writer, summary)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

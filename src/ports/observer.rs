//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training timesteps,
//! allowing composable data collection without coupling the trainer to
//! specific output formats or metrics.

use crate::{Result, pipeline::StepSummary};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(timesteps)` - once per [`Trainer::run`] call
/// 2. `on_step_end(summary)` - after each timestep's update pass
/// 3. `on_training_end()` - once at the end
///
/// [`Trainer::run`]: crate::pipeline::Trainer::run
///
/// # Examples
///
/// ```no_run
/// use blackjack_q::{pipeline::StepSummary, ports::Observer};
///
/// struct WinCounter {
///     wins: usize,
/// }
///
/// impl Observer for WinCounter {
///     fn on_step_end(&mut self, summary: &StepSummary) -> blackjack_q::Result<()> {
///         self.wins += summary.wins;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when a training run starts.
    ///
    /// # Parameters
    ///
    /// * `timesteps` - Number of timesteps this run will execute
    fn on_training_start(&mut self, _timesteps: u64) -> Result<()> {
        Ok(())
    }

    /// Called after a timestep's batch has been collected and applied.
    fn on_step_end(&mut self, _summary: &StepSummary) -> Result<()> {
        Ok(())
    }

    /// Called when the training run completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

//! Training and evaluation pipeline
//!
//! This module provides:
//! - The batch Q-learning trainer with exploring starts
//! - The evaluation harness for any [`Strategy`]
//! - Observers recording progress during training

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{EvaluationConfig, EvaluationReport, evaluate, wilson_interval};
pub use observers::{JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{
    OutcomeTally, StepSummary, Trainer, TrainingConfig, TrainingResult, Transition, apply_batch,
    collect_episode,
};

pub use crate::ports::{Observer, Strategy};

//! Ports (trait boundaries) between the training core and its consumers.
//!
//! The core owns these traits; progress bars, metrics collectors and
//! strategy baselines implement them.

pub mod observer;
pub mod strategy;

pub use observer::Observer;
pub use strategy::Strategy;

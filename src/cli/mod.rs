//! CLI infrastructure for the blackjack Q-learning toolkit
//!
//! This module provides the command-line interface for training agents,
//! evaluating strategies and exporting learned tables.

pub mod commands;
pub mod output;

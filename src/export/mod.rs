//! Export functionality for analysis
//!
//! Currently supports CSV export of the learned Q-table. The policy text
//! format lives in [`crate::policy`].

mod q_csv;

pub use q_csv::{QTableCsvExporter, QTableRecord};

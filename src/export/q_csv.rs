//! CSV export of the learned Q-table
//!
//! One row per non-terminal state, ordered by state index.

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::{
    Error, Result,
    blackjack::{Action, StateIndex},
    q_learning::QLearningAgent,
};

/// A single row in the Q-table CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QTableRecord {
    pub state: usize,
    pub total: u8,
    pub soft: bool,
    pub upcard: u8,
    pub q_stand: f64,
    pub q_hit: f64,
    pub n_stand: u64,
    pub n_hit: u64,
    pub greedy: Action,
}

/// Writes an agent's values, visit counts and greedy actions as CSV.
pub struct QTableCsvExporter;

impl QTableCsvExporter {
    /// Rows for every non-terminal state.
    pub fn records(agent: &QLearningAgent) -> Result<Vec<QTableRecord>> {
        StateIndex::all()
            .map(|index| {
                let state = index.decode()?;
                Ok(QTableRecord {
                    state: index.as_usize(),
                    total: state.total,
                    soft: state.soft,
                    upcard: state.upcard.rank(),
                    q_stand: agent.q_value(index, Action::Stand),
                    q_hit: agent.q_value(index, Action::Hit),
                    n_stand: agent.visits(index, Action::Stand),
                    n_hit: agent.visits(index, Action::Hit),
                    greedy: agent.optimal_action(index),
                })
            })
            .collect()
    }

    /// Write the CSV to any writer. Returns the number of data rows.
    pub fn write_to<W: Write>(agent: &QLearningAgent, writer: W) -> Result<usize> {
        let records = Self::records(agent)?;
        let mut csv = csv::Writer::from_writer(writer);
        for record in &records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(records.len())
    }

    /// Export to `path`. Returns the number of data rows.
    pub fn export<P: AsRef<Path>>(agent: &QLearningAgent, path: P) -> Result<usize> {
        let file = File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create {}", path.as_ref().display()),
            source,
        })?;
        Self::write_to(agent, file)
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use super::*;

    #[test]
    fn test_one_row_per_state() {
        let agent = QLearningAgent::new(Some(1));
        let mut buffer = Vec::new();
        let rows = QTableCsvExporter::write_to(&agent, &mut buffer).unwrap();
        assert_eq!(rows, 360);

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("state,total,soft,upcard,q_stand,q_hit,n_stand,n_hit,greedy")
        );
        assert_eq!(lines.next(), Some("1,4,false,1,0.0,0.0,0,0,Stand"));
        assert_eq!(lines.count(), 359);
    }

    #[test]
    fn test_records_reflect_updates() {
        let mut agent = QLearningAgent::new(Some(1));
        agent.decay(NonZeroU64::MIN);
        let index = StateIndex::encode(11, false, 6).unwrap();
        agent
            .update(index, Action::Hit, 10.0, StateIndex::TERMINAL)
            .unwrap();

        let records = QTableCsvExporter::records(&agent).unwrap();
        let record = &records[index.as_usize() - 1];
        assert_eq!((record.total, record.soft, record.upcard), (11, false, 6));
        assert_eq!(record.q_hit, 10.0);
        assert_eq!(record.n_hit, 1);
        assert_eq!(record.greedy, Action::Hit);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.csv");
        let rows = QTableCsvExporter::export(&QLearningAgent::new(None), &path).unwrap();
        assert_eq!(rows, 360);
        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 360);
    }
}

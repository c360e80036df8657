//! Greedy lookup tables and their text format
//!
//! ```text
//! Hard totals
//! 4: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
//! ...
//! 21: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
//! Soft totals
//! 13: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
//! ...
//! 21: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
//! ```
//!
//! Column `i` is the action against dealer upcard `i + 1` (Ace first), with
//! 0 for stand and 1 for hit.

use std::{fmt::Write as _, fs, path::Path};

use crate::{
    Error, Result,
    blackjack::{
        Action, Card, State, StateIndex,
        state::{MAX_TOTAL, MIN_TOTAL},
    },
    ports::Strategy,
    q_learning::QLearningAgent,
};

/// Lowest soft total a two-card hand other than {A, A} can make.
pub const MIN_SOFT_TOTAL: u8 = 13;

const UPCARDS: usize = 10;
const HARD_ROWS: usize = (MAX_TOTAL - MIN_TOTAL + 1) as usize;
const SOFT_ROWS: usize = (MAX_TOTAL - MIN_SOFT_TOTAL + 1) as usize;

type Row = [Action; UPCARDS];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Hard,
    Soft,
}

impl Section {
    fn min_total(self) -> u8 {
        match self {
            Section::Hard => MIN_TOTAL,
            Section::Soft => MIN_SOFT_TOTAL,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Section::Hard => "hard",
            Section::Soft => "soft",
        }
    }
}

/// Hard (4-21) and soft (13-21) action tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyTable {
    hard: [Row; HARD_ROWS],
    soft: [Row; SOFT_ROWS],
}

impl Default for StrategyTable {
    /// Stand everywhere.
    fn default() -> Self {
        Self {
            hard: [[Action::Stand; UPCARDS]; HARD_ROWS],
            soft: [[Action::Stand; UPCARDS]; SOFT_ROWS],
        }
    }
}

impl StrategyTable {
    /// Greedy actions of `agent` for every table cell.
    pub fn from_agent(agent: &QLearningAgent) -> Result<Self> {
        let mut table = Self::default();
        for (section, rows) in [
            (Section::Hard, &mut table.hard[..]),
            (Section::Soft, &mut table.soft[..]),
        ] {
            for (offset, row) in rows.iter_mut().enumerate() {
                let total = section.min_total() + offset as u8;
                for (column, cell) in row.iter_mut().enumerate() {
                    let state =
                        StateIndex::encode(total, section == Section::Soft, column as u8 + 1)?;
                    *cell = agent.optimal_action(state);
                }
            }
        }
        Ok(table)
    }

    /// Build a table from a rule over `(total, soft, upcard)`.
    pub fn from_fn(mut rule: impl FnMut(u8, bool, Card) -> Action) -> Self {
        let mut table = Self::default();
        for (offset, row) in table.hard.iter_mut().enumerate() {
            for (cell, upcard) in row.iter_mut().zip(Card::RANKS) {
                *cell = rule(MIN_TOTAL + offset as u8, false, upcard);
            }
        }
        for (offset, row) in table.soft.iter_mut().enumerate() {
            for (cell, upcard) in row.iter_mut().zip(Card::RANKS) {
                *cell = rule(MIN_SOFT_TOTAL + offset as u8, true, upcard);
            }
        }
        table
    }

    /// Action for a decision state.
    ///
    /// Soft totals below 13 (only a pair of aces) play the hard row of the
    /// same total.
    pub fn action(&self, state: State) -> Result<Action> {
        let State {
            total,
            soft,
            upcard,
        } = state;
        if !(MIN_TOTAL..=MAX_TOTAL).contains(&total) {
            return Err(Error::invalid_state(format!(
                "total {total} outside {MIN_TOTAL}-{MAX_TOTAL}"
            )));
        }
        let column = upcard.column();
        let action = if soft && total >= MIN_SOFT_TOTAL {
            self.soft[(total - MIN_SOFT_TOTAL) as usize][column]
        } else {
            self.hard[(total - MIN_TOTAL) as usize][column]
        };
        Ok(action)
    }

    /// Overwrite a single cell.
    pub fn set(&mut self, total: u8, soft: bool, upcard: Card, action: Action) -> Result<()> {
        let section = if soft { Section::Soft } else { Section::Hard };
        let row = self.row_mut(section, total).ok_or_else(|| {
            Error::invalid_state(format!("no {} row for total {total}", section.name()))
        })?;
        row[upcard.column()] = action;
        Ok(())
    }

    fn row_mut(&mut self, section: Section, total: u8) -> Option<&mut Row> {
        let offset = usize::from(total.checked_sub(section.min_total())?);
        match section {
            Section::Hard => self.hard.get_mut(offset),
            Section::Soft => self.soft.get_mut(offset),
        }
    }

    /// Render in the policy text format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (title, section, rows) in [
            ("Hard totals", Section::Hard, &self.hard[..]),
            ("Soft totals", Section::Soft, &self.soft[..]),
        ] {
            out.push_str(title);
            out.push('\n');
            for (offset, row) in rows.iter().enumerate() {
                let cells: Vec<String> = row.iter().map(|a| a.index().to_string()).collect();
                // Writing to a String cannot fail
                let _ = writeln!(
                    out,
                    "{}: [{}]",
                    section.min_total() as usize + offset,
                    cells.join(", ")
                );
            }
        }
        out
    }

    /// Parse the policy text format.
    ///
    /// A line containing "hard" or "soft" (any case) starts a section; every
    /// other non-blank line is a `<total>: [<10 comma-separated 0/1>]` row of
    /// the current section. The whole input is rejected on the first bad line,
    /// and when any row is missing.
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::default();
        let mut seen_hard = [false; HARD_ROWS];
        let mut seen_soft = [false; SOFT_ROWS];
        let mut section = None;

        for (number, raw) in text.lines().enumerate() {
            let line_no = number + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let lower = line.to_ascii_lowercase();
            if lower.contains("hard") {
                section = Some(Section::Hard);
                continue;
            }
            if lower.contains("soft") {
                section = Some(Section::Soft);
                continue;
            }

            let section = section.ok_or_else(|| {
                Error::malformed_policy(line_no, "row before any section header")
            })?;
            let (total, row) = parse_row(line, line_no)?;
            let offset = total
                .checked_sub(section.min_total())
                .filter(|_| total <= MAX_TOTAL)
                .map(usize::from)
                .ok_or_else(|| {
                    Error::malformed_policy(
                        line_no,
                        format!(
                            "{} total {total} outside {}-{MAX_TOTAL}",
                            section.name(),
                            section.min_total()
                        ),
                    )
                })?;
            let seen = match section {
                Section::Hard => &mut seen_hard[offset],
                Section::Soft => &mut seen_soft[offset],
            };
            if std::mem::replace(seen, true) {
                return Err(Error::malformed_policy(
                    line_no,
                    format!("duplicate {} row for total {total}", section.name()),
                ));
            }
            match section {
                Section::Hard => table.hard[offset] = row,
                Section::Soft => table.soft[offset] = row,
            }
        }

        let line_count = text.lines().count();
        for (section, seen) in [
            (Section::Hard, &seen_hard[..]),
            (Section::Soft, &seen_soft[..]),
        ] {
            if let Some(offset) = seen.iter().position(|&s| !s) {
                return Err(Error::malformed_policy(
                    line_count,
                    format!(
                        "missing {} row for total {}",
                        section.name(),
                        section.min_total() as usize + offset
                    ),
                ));
            }
        }
        Ok(table)
    }

    /// Write the rendered table to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.render()).map_err(|source| Error::Io {
            operation: format!("write policy {}", path.as_ref().display()),
            source,
        })
    }

    /// Read and parse a policy file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("read policy {}", path.as_ref().display()),
            source,
        })?;
        Self::parse(&text)
    }

    /// `(total, row)` pairs of the hard or soft table, lowest total first.
    pub fn rows(&self, soft: bool) -> impl Iterator<Item = (u8, &[Action; UPCARDS])> {
        let (min, rows) = if soft {
            (MIN_SOFT_TOTAL, &self.soft[..])
        } else {
            (MIN_TOTAL, &self.hard[..])
        };
        rows.iter()
            .enumerate()
            .map(move |(offset, row)| (min + offset as u8, row))
    }

    /// Number of hit cells in the hard and soft tables.
    pub fn hit_counts(&self) -> (usize, usize) {
        let count = |rows: &[Row]| {
            rows.iter()
                .flatten()
                .filter(|&&action| action == Action::Hit)
                .count()
        };
        (count(&self.hard), count(&self.soft))
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<(u8, Row)> {
    let (total, rest) = line
        .split_once(':')
        .ok_or_else(|| Error::malformed_policy(line_no, "expected `<total>: [...]`"))?;
    let total: u8 = total
        .trim()
        .parse()
        .map_err(|_| Error::malformed_policy(line_no, format!("bad total `{}`", total.trim())))?;

    let body = rest
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| Error::malformed_policy(line_no, "row must be bracketed"))?;

    let cells = body
        .split(',')
        .map(|cell| {
            let cell = cell.trim();
            cell.parse::<i64>()
                .map_err(|_| Error::malformed_policy(line_no, format!("bad entry `{cell}`")))
                .and_then(|value| {
                    Action::try_from(value).map_err(|_| {
                        Error::malformed_policy(line_no, format!("entry {value} is not 0 or 1"))
                    })
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let row: Row = cells.try_into().map_err(|cells: Vec<Action>| {
        Error::malformed_policy(
            line_no,
            format!("expected {UPCARDS} entries, found {}", cells.len()),
        )
    })?;
    Ok((total, row))
}

impl Strategy for StrategyTable {
    fn decide(&mut self, state: State) -> Result<Action> {
        self.action(state)
    }

    fn name(&self) -> &str {
        "policy table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_like() -> StrategyTable {
        StrategyTable::from_fn(|total, soft, upcard| {
            let strong_dealer = upcard.rank() >= 7 || upcard.is_ace();
            let hit = if soft {
                total <= 17 || (total == 18 && strong_dealer)
            } else {
                total <= 11 || (total <= 16 && strong_dealer)
            };
            if hit { Action::Hit } else { Action::Stand }
        })
    }

    fn card(rank: u8) -> Card {
        Card::try_new(rank).unwrap()
    }

    #[test]
    fn test_render_layout() {
        let text = basic_like().render();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 18 + 1 + 9);
        assert_eq!(lines[0], "Hard totals");
        assert_eq!(lines[1], "4: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]");
        assert_eq!(lines[13], "16: [1, 0, 0, 0, 0, 0, 1, 1, 1, 1]");
        assert_eq!(lines[19], "Soft totals");
        assert_eq!(lines[20], "13: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]");
        assert_eq!(lines[28], "21: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0]");
    }

    #[test]
    fn test_roundtrip() {
        let table = basic_like();
        assert_eq!(StrategyTable::parse(&table.render()).unwrap(), table);

        let mut odd = StrategyTable::default();
        odd.set(21, true, card(1), Action::Hit).unwrap();
        odd.set(4, false, card(10), Action::Hit).unwrap();
        assert_eq!(StrategyTable::parse(&odd.render()).unwrap(), odd);
    }

    #[test]
    fn test_parse_is_lenient_about_layout() {
        let text = basic_like()
            .render()
            .replace("Hard totals", "  HARD ")
            .replace("Soft totals", "\nsoft:\n")
            .replace(", ", ",");
        assert_eq!(StrategyTable::parse(&text).unwrap(), basic_like());
    }

    fn expect_malformed(text: &str, expected_line: usize) {
        match StrategyTable::parse(text) {
            Err(Error::MalformedPolicy { line, .. }) => assert_eq!(line, expected_line, "{text}"),
            other => panic!("expected malformed policy, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_wrong_entry_count() {
        let rendered = basic_like().render();
        let nine = rendered.replacen(
            "4: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]",
            "4: [1, 1, 1, 1, 1, 1, 1, 1, 1]",
            1,
        );
        expect_malformed(&nine, 2);
        let eleven = rendered.replacen(
            "4: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]",
            "4: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]",
            1,
        );
        expect_malformed(&eleven, 2);
    }

    #[test]
    fn test_rejects_bad_totals_and_values() {
        let rendered = basic_like().render();
        expect_malformed(&rendered.replacen("4: [", "3: [", 1), 2);
        expect_malformed(
            &rendered.replace("Soft totals\n13: [", "Soft totals\n12: ["),
            21,
        );
        expect_malformed(&format!("{rendered}22: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0]\n"), 30);
        expect_malformed(&rendered.replacen("4: [1,", "4: [2,", 1), 2);
        expect_malformed(&rendered.replacen("4: [", "four: [", 1), 2);
        expect_malformed(&rendered.replacen("4: [1, 1,", "4: 1, 1,", 1), 2);
    }

    #[test]
    fn test_rejects_structure_errors() {
        expect_malformed("4: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1]\n", 1);

        let rendered = basic_like().render();
        let duplicated = rendered.replacen("5: [", "4: [", 1);
        expect_malformed(&duplicated, 3);

        let missing: String = rendered
            .lines()
            .filter(|line| !line.starts_with("17:"))
            .map(|line| format!("{line}\n"))
            .collect();
        assert!(matches!(
            StrategyTable::parse(&missing),
            Err(Error::MalformedPolicy { .. })
        ));
        assert!(StrategyTable::parse("").is_err());
    }

    #[test]
    fn test_lookup_uses_hard_row_for_pair_of_aces() {
        let mut table = StrategyTable::default();
        table.set(12, false, card(6), Action::Hit).unwrap();
        let aces = State::new(12, true, card(6)).unwrap();
        assert_eq!(table.action(aces).unwrap(), Action::Hit);
        assert!(table.set(12, true, card(6), Action::Hit).is_err());
    }

    #[test]
    fn test_from_agent_matches_optimal_action() {
        let mut agent = QLearningAgent::new(Some(2));
        agent.decay(std::num::NonZeroU64::MIN);
        let state = StateIndex::encode(16, false, 10).unwrap();
        agent
            .update(state, Action::Hit, 10.0, StateIndex::TERMINAL)
            .unwrap();

        let table = StrategyTable::from_agent(&agent).unwrap();
        let decoded = state.decode().unwrap();
        assert_eq!(table.action(decoded).unwrap(), Action::Hit);
        // Untouched cells tie at zero and resolve to stand
        assert_eq!(table.hit_counts(), (1, 0));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        basic_like().save(&path).unwrap();
        assert_eq!(StrategyTable::load(&path).unwrap(), basic_like());
    }
}

//! Output formatting for CLI

use crate::{
    blackjack::{Action, Card},
    pipeline::EvaluationReport,
    policy::StrategyTable,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate as a percentage
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print an evaluation report
pub fn print_report(report: &EvaluationReport) {
    let (low, high) = report.win_rate_interval;
    print_kv("Strategy", &report.strategy);
    print_kv("Hands", &format_number(report.hands as u64));
    print_kv("Win rate", &format_rate(report.win_rate));
    print_kv("Loss rate", &format_rate(report.loss_rate));
    print_kv("Push rate", &format_rate(report.push_rate));
    print_kv("Mean reward", &format!("{:+.3}", report.mean_reward));
    print_kv(
        "Win rate interval",
        &format!(
            "{} - {} ({:.0}%)",
            format_rate(low),
            format_rate(high),
            report.confidence * 100.0
        ),
    );
}

/// Render a policy table as an H/S grid with upcards across the top
pub fn format_policy_grid(table: &StrategyTable, soft: bool) -> String {
    let mut out = String::from("      ");
    for upcard in Card::RANKS {
        out.push_str(&format!("{:>3}", upcard.to_string()));
    }
    out.push('\n');
    for (total, row) in table.rows(soft) {
        out.push_str(&format!("  {total:>2}: "));
        for action in row {
            let symbol = match action {
                Action::Stand => 'S',
                Action::Hit => 'H',
            };
            out.push_str(&format!("{symbol:>3}"));
        }
        out.push('\n');
    }
    out
}

/// Print both halves of a policy table
pub fn print_policy(table: &StrategyTable) {
    print_subsection("Hard totals");
    print!("{}", format_policy_grid(table, false));
    print_subsection("Soft totals");
    print!("{}", format_policy_grid(table, true));
}

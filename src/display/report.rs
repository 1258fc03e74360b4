//! Report formatting utilities for terminal output
//!
//! Summaries, category bar charts and budget status tables.

use std::collections::BTreeMap;
use std::fmt::Write;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Budget;
use crate::reports::{BudgetStatusReport, CategoryBreakdown, Summary};

/// Shown instead of a chart when nothing fell in range
pub const NO_CHART_DATA: &str = "No data in the specified time range.";

/// Bar of `#` proportional to `value / max_value`, rounded down
pub fn format_bar(value: Decimal, max_value: Decimal, width: usize) -> String {
    if max_value <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }

    let width_dec = Decimal::from(width);
    // Scale first for exact results; divide first when the product overflows.
    let scaled = match value.checked_mul(width_dec) {
        Some(product) => product.checked_div(max_value),
        None => value
            .checked_div(max_value)
            .and_then(|ratio| ratio.checked_mul(width_dec)),
    };

    let filled = scaled
        .and_then(|bar| bar.floor().to_usize())
        .unwrap_or(0)
        .min(width);

    "#".repeat(filled)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Format an income/expenses/balance summary under a title
pub fn format_summary(title: &str, summary: &Summary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", title);
    let _ = writeln!(output, "{}", separator(32));
    for (field, value) in summary.entries() {
        let _ = writeln!(output, "{:<10} {:>21}", capitalize(field), value.to_string());
    }
    output
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render income and expense bar charts per category
///
/// Each section is scaled to its own largest value so that value fills
/// `width` characters.
pub fn format_category_chart(breakdown: &CategoryBreakdown, width: usize) -> String {
    if breakdown.is_empty() {
        return format!("{}\n", NO_CHART_DATA);
    }

    let mut output = String::new();
    write_chart_section(&mut output, "Income", &breakdown.income, width);
    output.push('\n');
    write_chart_section(&mut output, "Expenses", &breakdown.expenses, width);
    output
}

fn write_chart_section(
    output: &mut String,
    title: &str,
    data: &BTreeMap<String, Decimal>,
    width: usize,
) {
    let _ = writeln!(output, "{}:", title);

    let label_width = data.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let max_value = data.values().copied().max().unwrap_or(Decimal::ZERO);

    for (category, value) in data {
        let _ = writeln!(
            output,
            "{:>label_width$} | {} ({})",
            category,
            format_bar(*value, max_value, width),
            value,
            label_width = label_width
        );
    }
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
}

/// Format budgets as a table
pub fn format_budget_list(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        category: b.category.clone(),
        limit: b.limit.to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(1), Alignment::right());
    format!("{}\n", table)
}

#[derive(Tabled)]
struct BudgetStatusLine {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format a budget status report as a table with totals
pub fn format_budget_status(report: &BudgetStatusReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Budget status {} to {}", report.start, report.end);

    if report.rows.is_empty() {
        output.push_str("No budgets set.\n");
        return output;
    }

    let rows = report.rows.iter().map(|r| BudgetStatusLine {
        category: r.category.clone(),
        limit: r.limit.to_string(),
        spent: r.spent.to_string(),
        remaining: r.remaining.to_string(),
        status: if r.exceeded { "OVER" } else { "ok" },
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..4), Alignment::right());
    let _ = writeln!(output, "{}", table);

    let over = report.over_budget().count();
    let _ = writeln!(
        output,
        "Total spent {} of {} ({} over budget)",
        report.total_spent,
        report.total_limit,
        over
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::models::{Timestamp, Transaction};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(dec("50"), dec("100"), 10), "#####");
        assert_eq!(format_bar(dec("100"), dec("100"), 10).len(), 10);
        assert_eq!(format_bar(dec("9.99"), dec("100"), 10), "");
        assert_eq!(format_bar(dec("5"), Decimal::ZERO, 10), "");
        assert_eq!(format_bar(dec("10"), dec("30"), 30), "#".repeat(10));
    }

    #[test]
    fn test_format_bar_near_decimal_max() {
        assert_eq!(format_bar(Decimal::MAX, Decimal::MAX, 40), "#".repeat(40));
        assert_eq!(format_bar(dec("1"), Decimal::MAX, 40), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
    }

    #[test]
    fn test_format_summary() {
        let summary = Summary {
            income: dec("100"),
            expenses: dec("-40"),
            balance: dec("60"),
        };
        let text = format_summary("Summary for 2025-01", &summary);
        assert!(text.starts_with("Summary for 2025-01\n"));
        assert!(text.contains("Income"));
        assert!(text.contains("-40"));
        assert!(text.lines().last().unwrap().ends_with("60"));
    }

    #[test]
    fn test_empty_chart() {
        let breakdown = CategoryBreakdown::default();
        assert_eq!(format_category_chart(&breakdown, 40), format!("{}\n", NO_CHART_DATA));
    }

    #[test]
    fn test_chart_layout() {
        let at = Timestamp::from_ymd(2025, 1, 10).unwrap();
        let ledger: Ledger = vec![
            Transaction::new(at, "salary", dec("200"), ""),
            Transaction::new(at, "food", dec("-40"), ""),
            Transaction::new(at, "rent", dec("-80"), ""),
        ]
        .into_iter()
        .collect();

        let breakdown = CategoryBreakdown::from_ledger(&ledger).unwrap();
        let text = format_category_chart(&breakdown, 40);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Income:");
        assert_eq!(lines[1], format!("salary | {} (200)", "#".repeat(40)));
        assert_eq!(lines[3], "Expenses:");
        assert_eq!(lines[4], format!("food | {} (40)", "#".repeat(20)));
        assert_eq!(lines[5], format!("rent | {} (80)", "#".repeat(40)));
    }

    #[test]
    fn test_chart_of_zero_amounts_prints_empty_sections() {
        let at = Timestamp::from_ymd(2025, 1, 10).unwrap();
        let ledger: Ledger = vec![Transaction::new(at, "noop", Decimal::ZERO, "")]
            .into_iter()
            .collect();

        let breakdown = CategoryBreakdown::from_ledger(&ledger).unwrap();
        let text = format_category_chart(&breakdown, 40);
        assert_eq!(text, "Income:\n\nExpenses:\n");
        assert!(!text.contains(NO_CHART_DATA));
    }

    #[test]
    fn test_budget_status_flags_overspend() {
        let at = Timestamp::from_ymd(2025, 1, 10).unwrap();
        let ledger: Ledger = vec![Transaction::new(at, "food", dec("-120"), "")]
            .into_iter()
            .collect();
        let budgets = vec![Budget::new("food", dec("100")).unwrap()];
        let report = BudgetStatusReport::generate(
            &ledger,
            &budgets,
            Timestamp::from_ymd(2025, 1, 1).unwrap(),
            Timestamp::from_ymd(2025, 1, 31).unwrap().end_of_day(),
        )
        .unwrap();

        let text = format_budget_status(&report);
        assert!(text.contains("OVER"));
        assert!(text.contains("(1 over budget)"));
    }

    #[test]
    fn test_budget_list() {
        assert_eq!(format_budget_list(&[]), "No budgets set.\n");

        let text = format_budget_list(&[Budget::new("food", dec("150")).unwrap()]);
        assert!(text.contains("Category"));
        assert!(text.contains("150"));
    }
}

//! Summary display formatting
//!
//! Renders an [`ExpenseSummary`] as the per-category, total, remaining and
//! daily-allowance lines shown after every expense.

use crate::reports::ExpenseSummary;

use super::chart::format_category_chart;
use super::report::DisplayOptions;

/// Format the full summary block, chart included when enabled
pub fn format_summary(summary: &ExpenseSummary, options: &DisplayOptions) -> String {
    let mut output = String::new();

    if summary.categories.is_empty() {
        output.push_str("No expenses recorded yet.\n");
    } else {
        output.push_str(&options.heading("Expenses by Category:"));
        output.push('\n');
        for line in category_lines(summary, options) {
            output.push_str("  ");
            output.push_str(&line);
            output.push('\n');
        }
    }

    output.push_str(&format!("Total Expense: {}\n", options.money(summary.total)));
    output.push_str(&format!(
        "Remaining Budget: {}\n",
        options.money_colored(summary.remaining)
    ));

    output.push_str(&allowance_line(summary, options));
    output.push('\n');

    if options.chart && !summary.categories.is_empty() {
        output.push('\n');
        output.push_str(&format_category_chart(summary, options));
    }

    output
}

/// One `"{category}: {amount}"` line per category with spending
pub fn category_lines(summary: &ExpenseSummary, options: &DisplayOptions) -> Vec<String> {
    summary
        .categories
        .iter()
        .map(|c| format!("{}: {}", c.category, options.money(c.total)))
        .collect()
}

fn allowance_line(summary: &ExpenseSummary, options: &DisplayOptions) -> String {
    let text = if summary.remaining_days == 0 {
        format!(
            "Today is the last day of the month; recommended daily budget: {}.",
            options.money(summary.daily_allowance)
        )
    } else {
        format!(
            "It's recommended to spend a daily budget of {} in the remaining {} days.",
            options.money(summary.daily_allowance),
            summary.remaining_days
        )
    };
    options.green(&text)
}

//! Category bar chart
//!
//! Horizontal bars scaled to the largest category, each annotated with the
//! names of the expenses it contains.

use crate::reports::ExpenseSummary;

use super::report::{format_bar, format_percentage, separator, truncate, DisplayOptions};

/// Longest annotation printed after a bar
const MAX_ANNOTATION: usize = 40;

/// Draw one bar per category with spending
pub fn format_category_chart(summary: &ExpenseSummary, options: &DisplayOptions) -> String {
    let width = options.chart_width.max(1);
    let max_total = summary
        .categories
        .iter()
        .map(|c| c.total.as_f64())
        .fold(0.0, f64::max);

    let label_width = summary
        .categories
        .iter()
        .map(|c| c.category.name().chars().count())
        .max()
        .unwrap_or(0);

    let amounts: Vec<String> = summary
        .categories
        .iter()
        .map(|c| options.money(c.total))
        .collect();
    let amount_width = amounts.iter().map(|a| a.chars().count()).max().unwrap_or(0);

    let mut output = String::new();
    let count = summary.expense_count();
    let noun = if count == 1 { "expense" } else { "expenses" };
    output.push_str(&options.heading(&format!("Expenses by Category ({} {})", count, noun)));
    if summary.is_over_budget() {
        output.push_str("  ");
        output.push_str(&options.red("OVER BUDGET"));
    }
    output.push('\n');
    output.push_str(&separator(label_width + width + amount_width + 4));
    output.push('\n');

    for (category, amount) in summary.categories.iter().zip(&amounts) {
        let names = truncate(&category.names.join(", "), MAX_ANNOTATION);
        output.push_str(&format!(
            "{:<label_width$} {} {:>amount_width$} {:>4}  {}\n",
            category.category.name(),
            format_bar(category.total.as_f64(), max_total, width),
            amount,
            format_percentage(summary.percentage_of_total(category.category)),
            names,
        ));
    }

    output
}

//! Expense summary
//!
//! Totals expenses per category, compares them with the budget, and works
//! out how much can still be spent per day for the rest of the month.

use chrono::{Datelike, NaiveDate};

use crate::models::{Category, ExpenseRecord, Money};

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    /// Sum of the category's expense amounts
    pub total: Money,
    /// Number of expenses in the category
    pub count: usize,
    /// Expense names in the order they were logged
    pub names: Vec<String>,
}

/// Summary of a set of expenses against a budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseSummary {
    /// Date the summary was computed for
    pub today: NaiveDate,
    /// Categories with spending, in category display order
    pub categories: Vec<CategoryTotal>,
    /// Sum of all expense amounts
    pub total: Money,
    pub budget: Money,
    /// `budget - total`; negative when overspent
    pub remaining: Money,
    pub days_in_month: u32,
    /// Days left in the month after `today`
    pub remaining_days: u32,
    /// `remaining / remaining_days`, or zero on the last day of the month
    pub daily_allowance: Money,
}

impl ExpenseSummary {
    /// Summarize `records` against `budget` as of `today`
    ///
    /// Pure: the same input always yields the same summary.
    pub fn summarize<'a, I>(records: I, budget: Money, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut slots: [Option<CategoryTotal>; Category::COUNT] = Default::default();

        for record in records {
            let slot = slots[record.category.index()].get_or_insert_with(|| CategoryTotal {
                category: record.category,
                total: Money::zero(),
                count: 0,
                names: Vec::new(),
            });
            slot.total += record.amount;
            slot.count += 1;
            slot.names.push(record.name.clone());
        }

        let categories: Vec<CategoryTotal> = slots.into_iter().flatten().collect();
        let total: Money = categories.iter().map(|c| c.total).sum();
        let remaining = budget - total;

        let days_in_month = days_in_month(today.year(), today.month());
        let remaining_days = days_in_month - today.day();
        let daily_allowance = remaining
            .checked_div_rounded(i64::from(remaining_days))
            .unwrap_or_else(Money::zero);

        Self {
            today,
            categories,
            total,
            budget,
            remaining,
            days_in_month,
            remaining_days,
            daily_allowance,
        }
    }

    /// Total spent in `category`, zero if nothing was logged there
    pub fn category_total(&self, category: Category) -> Money {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.total)
            .unwrap_or_default()
    }

    /// Share of total spending that went to `category`, in percent
    pub fn percentage_of_total(&self, category: Category) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        self.category_total(category).as_f64() / self.total.as_f64() * 100.0
    }

    /// Whether spending has exceeded the budget
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Number of expenses summarized
    pub fn expense_count(&self) -> usize {
        self.categories.iter().map(|c| c.count).sum()
    }
}

/// Number of days in the given month of the Gregorian calendar
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

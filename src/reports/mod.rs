//! Reports module
//!
//! Summaries derived from the stored expenses.

pub mod summary;

pub use summary::{days_in_month, CategoryTotal, ExpenseSummary};

//! Core data models for the expense tracker
//!
//! Expense records, the fixed category set, and the fixed-point money type.

pub mod category;
pub mod expense;
pub mod money;

pub use category::{Category, UnknownCategory};
pub use expense::{ExpenseRecord, ExpenseValidationError};
pub use money::{Money, MoneyParseError};

//! Interactive console session
//!
//! [`Prompter`] owns console I/O and input validation; [`Session`] drives the
//! collect, persist, summarise loop against an [`ExpenseStore`](crate::storage::ExpenseStore).

mod prompt;
mod tracker;

pub use prompt::Prompter;
pub use tracker::{local_now, Clock, Session};

//! Expense Tracker - interactive console expense logging
//!
//! Records named, categorised expenses against a monthly budget, persists
//! them to a local store, and after every entry prints per-category totals,
//! the remaining budget, and a recommended daily allowance for the rest of
//! the month.
//!
//! # Architecture
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, categories and expense records
//! - `storage`: Text and spreadsheet store formats behind one trait
//! - `reports`: Pure aggregation of records into a summary
//! - `display`: Terminal rendering of summaries and the category chart
//! - `session`: Prompts and the interactive loop
//! - `audit`: Append-only audit trail
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{Settings, TrackerPaths};
//! use expense_tracker::storage::open_store;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = open_store(&paths, settings.store_format)?;
//! ```

pub mod audit;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod session;
pub mod storage;

pub use error::TrackerError;

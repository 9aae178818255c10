//! Storage layer for the expense tracker
//!
//! Every backing format implements [`ExpenseStore`]; the session only talks
//! to the trait.

pub mod csv_store;
pub mod file_io;
pub mod workbook_store;

pub use csv_store::CsvStore;
pub use file_io::{read_json, write_json_atomic};
pub use workbook_store::WorkbookStore;

use std::path::Path;

use crate::config::paths::TrackerPaths;
use crate::config::settings::StoreFormat;
use crate::error::TrackerResult;
use crate::models::{ExpenseRecord, Money};

/// Timestamp layout used inside store files, independent of display settings
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Persistent home of expense records and the budget
pub trait ExpenseStore {
    /// Read every stored record, oldest first, and the saved budget if any
    fn load_all(&self) -> TrackerResult<(Vec<ExpenseRecord>, Option<Money>)>;

    /// Persist one new record after the existing ones
    fn append(&self, record: &ExpenseRecord) -> TrackerResult<()>;

    /// Persist the budget, replacing any previous value
    fn save_budget(&self, budget: Money) -> TrackerResult<()>;

    /// File the records are written to
    fn location(&self) -> &Path;
}

/// Open the store for the configured format
pub fn open_store(
    paths: &TrackerPaths,
    format: StoreFormat,
) -> TrackerResult<Box<dyn ExpenseStore>> {
    paths.ensure_directories()?;

    let store: Box<dyn ExpenseStore> = match format {
        StoreFormat::Csv => Box::new(CsvStore::new(paths.expenses_csv(), paths.budget_file())),
        StoreFormat::Xlsx => Box::new(WorkbookStore::new(paths.workbook_file())),
    };

    tracing::debug!(?format, path = %store.location().display(), "opened expense store");
    Ok(store)
}

//! Delimited text store
//!
//! One expense per line in `expenses.csv`, no header:
//! `name,amount,category[,timestamp]`. Lines written by older versions carry
//! only the first three fields and load as undated records. The budget lives
//! in a `budget.json` sidecar.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, ExpenseRecord, Money, UnknownCategory};

use super::file_io::{ensure_parent_dir, read_json, write_json_atomic};
use super::{ExpenseStore, STORED_TIMESTAMP_FORMAT};

/// Contents of the budget sidecar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BudgetFile {
    #[serde(default)]
    budget: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Store backed by a comma-delimited text file
pub struct CsvStore {
    path: PathBuf,
    budget_path: PathBuf,
}

impl CsvStore {
    /// Create a store over the given expense and budget files
    pub fn new(path: PathBuf, budget_path: PathBuf) -> Self {
        Self { path, budget_path }
    }

    fn load_records(&self) -> TrackerResult<Vec<ExpenseRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.path)
            .map_err(|e| {
                TrackerError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let fallback_line = index as u64 + 1;
            let row = row.map_err(|e| {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(fallback_line);
                TrackerError::malformed_line(&self.path, line, e)
            })?;
            let line = row.position().map(|p| p.line()).unwrap_or(fallback_line);

            let record = parse_row(&row)
                .map_err(|reason| TrackerError::malformed_line(&self.path, line, reason))?;
            records.push(record);
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded text store");
        Ok(records)
    }
}

/// Turn one text line into a validated record
fn parse_row(row: &StringRecord) -> Result<ExpenseRecord, String> {
    if row.len() != 3 && row.len() != 4 {
        return Err(format!("expected 3 or 4 fields, found {}", row.len()));
    }

    let amount = Money::parse(&row[1]).map_err(|e| e.to_string())?;
    let category: Category = row[2].parse().map_err(|e: UnknownCategory| e.to_string())?;
    let record = ExpenseRecord::new(&row[0], category, amount).map_err(|e| e.to_string())?;

    match row.get(3).filter(|s| !s.is_empty()) {
        Some(raw) => {
            let timestamp = NaiveDateTime::parse_from_str(raw, STORED_TIMESTAMP_FORMAT)
                .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))?;
            Ok(record.at(timestamp))
        }
        None => Ok(record),
    }
}

impl ExpenseStore for CsvStore {
    fn load_all(&self) -> TrackerResult<(Vec<ExpenseRecord>, Option<Money>)> {
        let records = self.load_records()?;
        let budget_file: BudgetFile = read_json(&self.budget_path)?;
        Ok((records, budget_file.budget))
    }

    fn append(&self, record: &ExpenseRecord) -> TrackerResult<()> {
        record.validate()?;
        ensure_parent_dir(&self.path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                TrackerError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        let amount = record.amount.to_string();
        match record.timestamp {
            Some(ts) => {
                let stamp = ts.format(STORED_TIMESTAMP_FORMAT).to_string();
                writer.write_record([
                    record.name.as_str(),
                    amount.as_str(),
                    record.category.name(),
                    stamp.as_str(),
                ])?;
            }
            None => {
                writer.write_record([
                    record.name.as_str(),
                    amount.as_str(),
                    record.category.name(),
                ])?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    fn save_budget(&self, budget: Money) -> TrackerResult<()> {
        let file = BudgetFile {
            budget: Some(budget),
            updated_at: Some(Utc::now()),
        };
        write_json_atomic(&self.budget_path, &file)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, CsvStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvStore::new(
            temp_dir.path().join("expenses.csv"),
            temp_dir.path().join("budget.json"),
        );
        (temp_dir, store)
    }

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_store() {
        let (_temp_dir, store) = create_test_store();
        let (records, budget) = store.load_all().unwrap();
        assert!(records.is_empty());
        assert_eq!(budget, None);
    }

    #[test]
    fn test_append_and_load() {
        let (_temp_dir, store) = create_test_store();

        let lunch = ExpenseRecord::new("Lunch", Category::Food, Money::from_cents(5000))
            .unwrap()
            .at(stamp());
        let power =
            ExpenseRecord::new("Electric bill", Category::Utilities, Money::from_cents(2000))
                .unwrap();
        store.append(&lunch).unwrap();
        store.append(&power).unwrap();

        let contents = fs::read_to_string(store.location()).unwrap();
        assert_eq!(
            contents,
            "Lunch,50.00,Food,2025-01-10 08:15:00\nElectric bill,20.00,Utilities\n"
        );

        let (records, _) = store.load_all().unwrap();
        assert_eq!(records, vec![lunch, power]);
    }

    #[test]
    fn test_name_with_delimiter_survives() {
        let (_temp_dir, store) = create_test_store();

        let record =
            ExpenseRecord::new("Rice, beans", Category::Food, Money::from_cents(1234)).unwrap();
        store.append(&record).unwrap();

        let (records, _) = store.load_all().unwrap();
        assert_eq!(records[0].name, "Rice, beans");
        assert_eq!(records[0].amount, Money::from_cents(1234));
    }

    #[test]
    fn test_loads_legacy_float_lines() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.location(),
            "Jeepney,13.0,Miscellaneous\nMeds,250.5,Health/Insurance\n\n",
        )
        .unwrap();

        let (records, _) = store.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].amount, Money::from_cents(1300));
        assert_eq!(records[1].category, Category::HealthInsurance);
        assert!(records[1].timestamp.is_none());
    }

    #[test]
    fn test_malformed_line_fails_with_line_number() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.location(), "Lunch,50.0,Food\nBroken line\n").unwrap();

        let err = store.load_all().unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_unknown_category_fails() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.location(), "Lunch,50.0,Groceries\n").unwrap();

        let err = store.load_all().unwrap_err();
        assert!(err.to_string().contains("Unknown category: Groceries"), "{}", err);
    }

    #[test]
    fn test_budget_round_trip() {
        let (_temp_dir, store) = create_test_store();
        store.save_budget(Money::from_cents(200000)).unwrap();

        let (_, budget) = store.load_all().unwrap();
        assert_eq!(budget, Some(Money::from_cents(200000)));
    }
}

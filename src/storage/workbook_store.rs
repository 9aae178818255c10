//! Spreadsheet workbook store
//!
//! Keeps every expense and the budget in `expenses.xlsx`: an `Expenses`
//! sheet with a `Date, Name, Amount, Category` header row and one row per
//! expense, and a `Budget` sheet holding a `Budget` header over a single
//! value. The workbook is read with calamine and rewritten in full with
//! rust_xlsxwriter on every change.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, ExpenseRecord, Money, UnknownCategory};

use super::file_io::write_bytes_atomic;
use super::{ExpenseStore, STORED_TIMESTAMP_FORMAT};

pub const EXPENSES_SHEET: &str = "Expenses";
pub const BUDGET_SHEET: &str = "Budget";

const HEADERS: [&str; 4] = ["Date", "Name", "Amount", "Category"];

/// Everything the workbook holds
#[derive(Debug, Default)]
struct WorkbookData {
    expenses: Vec<ExpenseRecord>,
    budget: Option<Money>,
}

/// Column positions found in the Expenses header row
struct Columns {
    date: Option<usize>,
    name: usize,
    amount: usize,
    category: usize,
}

/// Store backed by a two-sheet `.xlsx` workbook
pub struct WorkbookStore {
    path: PathBuf,
}

impl WorkbookStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> TrackerResult<WorkbookData> {
        if !self.path.exists() {
            return Ok(WorkbookData::default());
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to open workbook {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let sheets = workbook.sheet_names();

        let expenses = if sheets.iter().any(|s| s == EXPENSES_SHEET) {
            let range = self.sheet(&mut workbook, EXPENSES_SHEET)?;
            self.parse_expenses(&range)?
        } else {
            Vec::new()
        };

        // A workbook without a Budget sheet has no saved budget yet
        let budget = if sheets.iter().any(|s| s == BUDGET_SHEET) {
            let range = self.sheet(&mut workbook, BUDGET_SHEET)?;
            self.parse_budget(&range)?
        } else {
            None
        };

        tracing::debug!(path = %self.path.display(), count = expenses.len(), "loaded workbook");
        Ok(WorkbookData { expenses, budget })
    }

    fn sheet(
        &self,
        workbook: &mut Xlsx<BufReader<File>>,
        name: &str,
    ) -> TrackerResult<Range<Data>> {
        workbook.worksheet_range(name).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to read sheet '{}' of {}: {}",
                name,
                self.path.display(),
                e
            ))
        })
    }

    fn parse_expenses(&self, range: &Range<Data>) -> TrackerResult<Vec<ExpenseRecord>> {
        let first_row = range.start().map(|(row, _)| u64::from(row)).unwrap_or(0);
        let mut rows = range.rows().enumerate();

        let columns = match rows.next() {
            Some((_, header)) => find_columns(header)
                .map_err(|reason| self.malformed(EXPENSES_SHEET, first_row + 1, reason))?,
            None => return Ok(Vec::new()),
        };

        let mut records = Vec::new();
        for (index, row) in rows {
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }
            let sheet_row = first_row + index as u64 + 1;
            let record = parse_row(row, &columns)
                .map_err(|reason| self.malformed(EXPENSES_SHEET, sheet_row, reason))?;
            records.push(record);
        }

        Ok(records)
    }

    fn parse_budget(&self, range: &Range<Data>) -> TrackerResult<Option<Money>> {
        let first_row = range.start().map(|(row, _)| u64::from(row)).unwrap_or(0);

        // Row 0 is the "Budget" header; the value sits below it
        match range.rows().nth(1).and_then(|row| row.first()) {
            None | Some(Data::Empty) => Ok(None),
            Some(cell) => cell_money(cell)
                .map(Some)
                .map_err(|reason| self.malformed(BUDGET_SHEET, first_row + 2, reason)),
        }
    }

    fn malformed(&self, sheet: &str, row: u64, reason: String) -> TrackerError {
        TrackerError::Storage(format!(
            "Malformed record in {} (sheet '{}') at row {}: {}",
            self.path.display(),
            sheet,
            row,
            reason
        ))
    }

    fn write(&self, data: &WorkbookData) -> TrackerResult<()> {
        let bytes = build_workbook(data).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to build workbook {}: {}",
                self.path.display(),
                e
            ))
        })?;
        write_bytes_atomic(&self.path, &bytes)
    }
}

fn find_columns(header: &[Data]) -> Result<Columns, String> {
    let position = |wanted: &str| {
        header.iter().position(|cell| match cell {
            Data::String(s) => s.trim().eq_ignore_ascii_case(wanted),
            _ => false,
        })
    };
    let required =
        |wanted: &str| position(wanted).ok_or_else(|| format!("missing '{}' column", wanted));

    Ok(Columns {
        date: position("Date"),
        name: required("Name")?,
        amount: required("Amount")?,
        category: required("Category")?,
    })
}

fn parse_row(row: &[Data], columns: &Columns) -> Result<ExpenseRecord, String> {
    let cell = |index: usize| row.get(index).unwrap_or(&Data::Empty);

    let name = cell_text(cell(columns.name)).unwrap_or_default();
    let amount = cell_money(cell(columns.amount))?;
    let category: Category = cell_text(cell(columns.category))
        .unwrap_or_default()
        .parse()
        .map_err(|e: UnknownCategory| e.to_string())?;

    let record = ExpenseRecord::new(name, category, amount).map_err(|e| e.to_string())?;

    match columns.date.map(cell) {
        None | Some(Data::Empty) => Ok(record),
        Some(Data::String(s)) if s.trim().is_empty() => Ok(record),
        Some(date) => Ok(record.at(cell_timestamp(date)?)),
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) => Some(s.trim().to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

fn cell_money(cell: &Data) -> Result<Money, String> {
    let text = match cell {
        Data::Float(f) if f.is_finite() => format!("{:.2}", f),
        Data::Int(i) => i.to_string(),
        Data::String(s) => s.trim().to_string(),
        other => return Err(format!("expected an amount, found {:?}", other)),
    };
    Money::parse(&text).map_err(|e| e.to_string())
}

fn cell_timestamp(cell: &Data) -> Result<NaiveDateTime, String> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) => {
            NaiveDateTime::parse_from_str(s.trim(), STORED_TIMESTAMP_FORMAT)
                .map_err(|e| format!("invalid date '{}': {}", s, e))
        }
        Data::DateTime(dt) => dt
            .as_datetime()
            .ok_or_else(|| format!("invalid date serial {:?}", dt)),
        other => Err(format!("expected a date, found {:?}", other)),
    }
}

fn build_workbook(data: &WorkbookData) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let amount = Format::new().set_num_format("#,##0.00");

    let expenses = workbook.add_worksheet().set_name(EXPENSES_SHEET)?;
    for (col, title) in HEADERS.iter().enumerate() {
        expenses.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (index, record) in data.expenses.iter().enumerate() {
        let row = index as u32 + 1;
        if let Some(ts) = record.timestamp {
            expenses.write_string(row, 0, ts.format(STORED_TIMESTAMP_FORMAT).to_string())?;
        }
        expenses.write_string(row, 1, record.name.as_str())?;
        expenses.write_number_with_format(row, 2, record.amount.as_f64(), &amount)?;
        expenses.write_string(row, 3, record.category.name())?;
    }
    expenses.set_column_width(0, 20)?;
    expenses.set_column_width(1, 20)?;
    expenses.set_column_width(2, 12)?;
    expenses.set_column_width(3, 20)?;

    let budget = workbook.add_worksheet().set_name(BUDGET_SHEET)?;
    budget.write_string_with_format(0, 0, "Budget", &header)?;
    if let Some(value) = data.budget {
        budget.write_number_with_format(1, 0, value.as_f64(), &amount)?;
    }

    workbook.save_to_buffer()
}

impl ExpenseStore for WorkbookStore {
    fn load_all(&self) -> TrackerResult<(Vec<ExpenseRecord>, Option<Money>)> {
        let data = self.read()?;
        Ok((data.expenses, data.budget))
    }

    fn append(&self, record: &ExpenseRecord) -> TrackerResult<()> {
        record.validate()?;

        let mut data = self.read()?;
        data.expenses.push(record.clone());
        self.write(&data)
    }

    fn save_budget(&self, budget: Money) -> TrackerResult<()> {
        let mut data = self.read()?;
        data.budget = Some(budget);
        self.write(&data)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

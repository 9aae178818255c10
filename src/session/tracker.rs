//! The interactive tracking session
//!
//! Bootstraps the budget, then collects one expense at a time, persisting
//! and summarising after each until the user declines to continue.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use chrono::{Local, NaiveDateTime};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::SummaryScope;
use crate::display::{format_summary, DisplayOptions};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{ExpenseRecord, Money};
use crate::reports::ExpenseSummary;
use crate::storage::{ExpenseStore, STORED_TIMESTAMP_FORMAT};

use super::prompt::Prompter;

/// Source of the current local time
pub type Clock = fn() -> NaiveDateTime;

/// Wall-clock time in the local timezone
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// One run of the tracker against a store
pub struct Session<'a> {
    store: &'a dyn ExpenseStore,
    display: DisplayOptions,
    scope: SummaryScope,
    timestamp_format: String,
    audit: Option<AuditLogger>,
    clock: Clock,
}

impl<'a> Session<'a> {
    pub fn new(store: &'a dyn ExpenseStore, display: DisplayOptions) -> Self {
        Self {
            store,
            display,
            scope: SummaryScope::default(),
            timestamp_format: STORED_TIMESTAMP_FORMAT.to_string(),
            audit: None,
            clock: local_now,
        }
    }

    pub fn with_scope(mut self, scope: SummaryScope) -> Self {
        self.scope = scope;
        self
    }

    /// strftime layout used when echoing a new expense
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Run until the user says no; returns how many expenses were logged
    pub fn run<R: BufRead, W: Write>(&self, prompter: &mut Prompter<R, W>) -> TrackerResult<usize> {
        prompter.say("Running Expense Tracker!")?;

        let budget = self.bootstrap_budget(prompter)?;
        let mut logged = 0;

        loop {
            let record = self.collect_expense(prompter)?;

            prompter.say(&format!(
                "Saving User Expense: {} to {}...",
                record,
                self.store.location().display()
            ))?;
            self.store.append(&record)?;
            self.audit(&AuditEntry::expense_created(&record));
            logged += 1;
            tracing::info!(
                name = %record.name,
                category = %record.category,
                amount = %record.amount,
                "expense saved"
            );

            let summary = self.summarize(budget)?;
            prompter.say("Summarizing User Expenses...")?;
            prompter.write_block(&format_summary(&summary, &self.display))?;

            if !prompter.confirm("\nDo you want to add another expense? (yes/no): ")? {
                break;
            }
        }

        prompter.say("Exiting Expense Tracker. Have a great day!")?;
        Ok(logged)
    }

    /// Load the saved budget, or ask for one and persist it
    fn bootstrap_budget<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> TrackerResult<Money> {
        let (_, saved) = self.store.load_all()?;

        if let Some(budget) = saved {
            prompter.say(&format!("Retrieved saved budget: {}", self.display.money(budget)))?;
            return Ok(budget);
        }

        let budget = prompter.budget()?;
        self.store.save_budget(budget)?;
        self.audit(&AuditEntry::budget_set(budget));
        tracing::info!(%budget, "budget saved");
        Ok(budget)
    }

    fn collect_expense<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> TrackerResult<ExpenseRecord> {
        prompter.say("Getting User Expense...")?;
        let name = prompter.expense_name()?;
        let amount = prompter.expense_amount()?;
        let now = (self.clock)();

        prompter.say(&format!(
            "You've entered: {}, {}, {}",
            name,
            self.display.money(amount),
            self.format_timestamp(now)?
        ))?;

        let category = prompter.category()?;
        prompter.say(&format!("You've selected: {}", category))?;

        Ok(ExpenseRecord::new(name, category, amount)?.at(now))
    }

    /// Reload every record and aggregate the ones the scope counts
    fn summarize(&self, budget: Money) -> TrackerResult<ExpenseSummary> {
        let (records, _) = self.store.load_all()?;
        let today = (self.clock)().date();
        let counted = self.scope.select(&records, today);
        tracing::debug!(
            loaded = records.len(),
            counted = counted.len(),
            scope = ?self.scope,
            "summarizing"
        );
        Ok(ExpenseSummary::summarize(counted, budget, today))
    }

    fn format_timestamp(&self, ts: NaiveDateTime) -> TrackerResult<String> {
        let mut out = String::new();
        write!(out, "{}", ts.format(&self.timestamp_format)).map_err(|_| {
            TrackerError::Config(format!("Invalid timestamp format: {:?}", self.timestamp_format))
        })?;
        Ok(out)
    }

    // The audit trail is best effort; a failure there must not lose the expense
    fn audit(&self, entry: &AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(entry) {
                tracing::warn!(
                    error = %e,
                    path = %logger.path().display(),
                    "failed to write audit entry"
                );
            }
        }
    }
}

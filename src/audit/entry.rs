//! Audit entry data structures
//!
//! Defines the structure of audit log entries including operation types,
//! entity types, and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ExpenseRecord, Money};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A new entity was stored
    Create,
    /// A value was set, replacing any previous one
    Set,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Set => write!(f, "SET"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Expense,
    Budget,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
            EntityType::Budget => write!(f, "Budget"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// Human-readable description of the entity (e.g., expense name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// JSON representation of the entity after the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Entry for a newly logged expense
    pub fn expense_created(record: &ExpenseRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type: EntityType::Expense,
            entity_name: Some(record.name.clone()),
            after: serde_json::to_value(record).ok(),
        }
    }

    /// Entry for a budget being saved
    pub fn budget_set(budget: Money) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Set,
            entity_type: EntityType::Budget,
            entity_name: None,
            after: serde_json::to_value(budget).ok(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Set.to_string(), "SET");
    }

    #[test]
    fn test_expense_entry() {
        let record = ExpenseRecord::new("Lunch", Category::Food, Money::from_cents(1500)).unwrap();
        let entry = AuditEntry::expense_created(&record);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Expense);
        assert_eq!(entry.entity_name.as_deref(), Some("Lunch"));

        let after = entry.after.unwrap();
        assert_eq!(after["amount"], 1500);
        assert_eq!(after["category"], "Food");
    }

    #[test]
    fn test_budget_entry() {
        let entry = AuditEntry::budget_set(Money::from_cents(200000));
        assert_eq!(entry.operation, Operation::Set);
        assert_eq!(entry.after, Some(serde_json::json!(200000)));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::budget_set(Money::from_cents(100));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("entity_name"));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::Set);
        assert_eq!(deserialized.entity_type, EntityType::Budget);
    }

    #[test]
    fn test_human_readable_format() {
        let record = ExpenseRecord::new("Tuition", Category::School, Money::from_cents(1)).unwrap();
        let formatted = AuditEntry::expense_created(&record).format_human_readable();
        assert!(formatted.contains("CREATE Expense (Tuition)"));
    }
}

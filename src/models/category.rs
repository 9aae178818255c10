//! Expense categories
//!
//! The category set is closed: every expense belongs to exactly one of six
//! fixed buckets, in a fixed display order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification bucket for an expense
///
/// Variant order is the display order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Utilities,
    Entertainment,
    School,
    #[serde(rename = "Health/Insurance")]
    HealthInsurance,
    Miscellaneous,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 6;

    /// All categories in display order
    pub const ALL: [Category; Self::COUNT] = [
        Self::Food,
        Self::Utilities,
        Self::Entertainment,
        Self::School,
        Self::HealthInsurance,
        Self::Miscellaneous,
    ];

    /// Get all categories in order
    pub fn all() -> &'static [Self] {
        &Self::ALL
    }

    /// Get the display name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::School => "School",
            Self::HealthInsurance => "Health/Insurance",
            Self::Miscellaneous => "Miscellaneous",
        }
    }

    /// Look up a category by its 1-based menu number
    pub fn from_menu_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Position of this category in display order (0-based)
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parse a category from its display name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

/// Error for a category name outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order() {
        let names: Vec<_> = Category::all().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "Food",
                "Utilities",
                "Entertainment",
                "School",
                "Health/Insurance",
                "Miscellaneous"
            ]
        );
        assert!(Category::Food < Category::Miscellaneous);
        assert_eq!(Category::HealthInsurance.index(), 4);
    }

    #[test]
    fn test_from_menu_number() {
        assert_eq!(Category::from_menu_number(1), Some(Category::Food));
        assert_eq!(Category::from_menu_number(6), Some(Category::Miscellaneous));
        assert_eq!(Category::from_menu_number(0), None);
        assert_eq!(Category::from_menu_number(7), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Food".parse::<Category>(), Ok(Category::Food));
        assert_eq!(
            " health/insurance ".parse::<Category>(),
            Ok(Category::HealthInsurance)
        );
        assert_eq!(
            "Groceries".parse::<Category>(),
            Err(UnknownCategory("Groceries".into()))
        );
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Category::HealthInsurance).unwrap();
        assert_eq!(json, "\"Health/Insurance\"");

        let deserialized: Category = serde_json::from_str("\"School\"").unwrap();
        assert_eq!(deserialized, Category::School);
    }
}

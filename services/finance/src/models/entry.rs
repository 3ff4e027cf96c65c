//! Entry ("lançamento") model and its enumerated attributes

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when stored text does not name a known variant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Entry classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "INCOME",
            EntryType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(EntryType::Income),
            "EXPENSE" => Ok(EntryType::Expense),
            other => Err(ParseEnumError {
                kind: "entry type",
                value: other.to_string(),
            }),
        }
    }
}

/// Entry lifecycle tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Pending,
    Settled,
    Cancelled,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "PENDING",
            EntryStatus::Settled => "SETTLED",
            EntryStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(EntryStatus::Pending),
            "SETTLED" => Ok(EntryStatus::Settled),
            "CANCELLED" => Ok(EntryStatus::Cancelled),
            other => Err(ParseEnumError {
                kind: "entry status",
                value: other.to_string(),
            }),
        }
    }
}

/// A single income or expense record owned by one user.
///
/// Every attribute is optional so the same shape can carry unvalidated input,
/// persisted rows, and search filters. Persisted entries always have `id` set
/// and pass [`crate::validation::validate_entry`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entry {
    pub id: Option<i64>,
    pub description: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub user_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub registered_on: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
}

impl Entry {
    /// Whether `candidate` agrees with every attribute set on this filter.
    /// Unset attributes leave the match unconstrained.
    pub fn matches(&self, candidate: &Entry) -> bool {
        fn field<T: PartialEq>(filter: &Option<T>, value: &Option<T>) -> bool {
            filter.as_ref().is_none_or(|f| value.as_ref() == Some(f))
        }

        field(&self.id, &candidate.id)
            && field(&self.description, &candidate.description)
            && field(&self.month, &candidate.month)
            && field(&self.year, &candidate.year)
            && field(&self.user_id, &candidate.user_id)
            && field(&self.amount, &candidate.amount)
            && field(&self.registered_on, &candidate.registered_on)
            && field(&self.entry_type, &candidate.entry_type)
            && field(&self.status, &candidate.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_text_form() {
        assert_eq!(EntryType::Income.to_string(), "INCOME");
        assert_eq!("EXPENSE".parse::<EntryType>(), Ok(EntryType::Expense));
        assert_eq!("SETTLED".parse::<EntryStatus>(), Ok(EntryStatus::Settled));

        let err = "settled".parse::<EntryStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown entry status: settled");
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let entry = Entry {
            id: Some(3),
            description: Some("Salário".to_string()),
            month: Some(5),
            ..Default::default()
        };

        assert!(Entry::default().matches(&entry));
    }

    #[test]
    fn test_filter_constrains_set_fields_only() {
        let entry = Entry {
            user_id: Some(1),
            month: Some(5),
            year: Some(2024),
            entry_type: Some(EntryType::Expense),
            ..Default::default()
        };

        let same_month = Entry {
            user_id: Some(1),
            month: Some(5),
            ..Default::default()
        };
        let other_month = Entry {
            user_id: Some(1),
            month: Some(6),
            ..Default::default()
        };
        let needs_status = Entry {
            status: Some(EntryStatus::Pending),
            ..Default::default()
        };

        assert!(same_month.matches(&entry));
        assert!(!other_month.matches(&entry));
        assert!(!needs_status.matches(&entry));
    }
}

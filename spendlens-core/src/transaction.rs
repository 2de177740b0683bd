use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of spending categories the model is allowed to answer with.
///
/// Labels are the exact strings presented in the categorization prompt and on
/// the wire; anything outside this set is rejected during response validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Rent")]
    Rent,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Transfers")]
    Transfers,
}

impl Category {
    /// All categories, in the order they are presented to the model.
    pub const ALL: [Category; 10] = [
        Category::FoodAndDining,
        Category::Groceries,
        Category::Utilities,
        Category::Shopping,
        Category::Transportation,
        Category::Entertainment,
        Category::Income,
        Category::Rent,
        Category::Travel,
        Category::Transfers,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Groceries => "Groceries",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Income => "Income",
            Category::Rent => "Rent",
            Category::Travel => "Travel",
            Category::Transfers => "Transfers",
        }
    }

    /// Look up a category by its exact label.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label.trim())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One statement row, normalized across dialects.
///
/// Parsers construct records with `category: None`; the pipeline assigns a
/// category exactly once (position-aligned against the model response) and
/// drops anything still uncategorized. Dates are canonical `NaiveDate`
/// regardless of how the source statement wrote them, serialized as ISO-8601.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub description: String,
    /// Negative = debit, positive = credit.
    pub amount: f64,
    /// Running balance after this transaction.
    pub balance: f64,
    pub category: Option<Category>,
}

impl TransactionRecord {
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_label(cat.label()), Some(cat));
        }
    }

    #[test]
    fn test_from_label_rejects_unknown() {
        assert_eq!(Category::from_label("Gambling"), None);
        assert_eq!(Category::from_label(""), None);
    }

    #[test]
    fn test_from_label_trims_whitespace() {
        assert_eq!(Category::from_label("  Groceries "), Some(Category::Groceries));
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Category::FoodAndDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");
        let back: Category = serde_json::from_str("\"Transfers\"").unwrap();
        assert_eq!(back, Category::Transfers);
    }

    #[test]
    fn test_record_serializes_iso_date() {
        let rec = TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Grocery Store".to_string(),
            amount: -45.0,
            balance: 1000.0,
            category: Some(Category::Groceries),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["date"], "2024-01-15");
        assert_eq!(json["category"], "Groceries");
    }
}

//! Per-user transaction storage.
//!
//! The seam where a managed document store or warehouse would plug in; the
//! server ships with the in-memory implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use spendlens_core::TransactionRecord;

/// A categorized record with the identifier assigned at the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTransaction {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: TransactionRecord,
}

impl StoredTransaction {
    pub fn new(record: TransactionRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            record,
        }
    }
}

pub trait TransactionStore: Send + Sync {
    fn append(&self, user_id: &str, records: Vec<StoredTransaction>);
    fn for_user(&self, user_id: &str) -> Vec<StoredTransaction>;
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Vec<StoredTransaction>>>,
}

impl TransactionStore for MemoryStore {
    fn append(&self, user_id: &str, mut records: Vec<StoredTransaction>) {
        let mut map = self.inner.lock().unwrap();
        map.entry(user_id.to_string()).or_default().append(&mut records);
    }

    fn for_user(&self, user_id: &str) -> Vec<StoredTransaction> {
        self.inner
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendlens_core::Category;

    fn stored(description: &str) -> StoredTransaction {
        StoredTransaction::new(TransactionRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: description.to_string(),
            amount: -1.0,
            balance: 0.0,
            category: Some(Category::Shopping),
        })
    }

    #[test]
    fn test_append_accumulates_per_user() {
        let store = MemoryStore::default();
        store.append("alice", vec![stored("a")]);
        store.append("alice", vec![stored("b")]);
        store.append("bob", vec![stored("c")]);

        let alice = store.for_user("alice");
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[0].record.description, "a");
        assert_eq!(store.for_user("bob").len(), 1);
        assert!(store.for_user("nobody").is_empty());
    }

    #[test]
    fn test_stored_transaction_flattens_record_fields() {
        let json = serde_json::to_value(stored("Grocery Store")).unwrap();
        assert!(json["id"].is_string());
        assert_eq!(json["description"], "Grocery Store");
        assert_eq!(json["category"], "Shopping");
    }
}

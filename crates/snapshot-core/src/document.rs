//! The document produced by one fetch run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One fetched data category: the query description and its payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Human-readable description of the query performed (diagnostic only).
    pub request: String,
    /// Category payload.
    pub data: Value,
}

impl CategoryRecord {
    /// Creates a record from a request description and payload.
    #[must_use]
    pub fn new(request: impl Into<String>, data: Value) -> Self {
        Self {
            request: request.into(),
            data,
        }
    }
}

/// The full batch for one fetch run: category key to record, in insertion
/// order.
///
/// A category that failed or returned no data is simply absent; a present
/// category always carries a payload (possibly an empty mapping when the
/// provider returned a shell that downstream filtering preserves as empty).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    records: IndexMap<String, CategoryRecord>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a category record, replacing any previous record for the key.
    pub fn insert(&mut self, key: impl Into<String>, record: CategoryRecord) {
        self.records.insert(key.into(), record);
    }

    /// Looks up a category record by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CategoryRecord> {
        self.records.get(key)
    }

    /// Returns true if the document contains the category.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Number of categories present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no categories are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates categories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CategoryRecord)> {
        self.records.iter()
    }

    /// Category keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.records.keys()
    }

    /// Applies payload normalization to every record.
    ///
    /// See [`Value::normalized`]; idempotent.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            records: self
                .records
                .into_iter()
                .map(|(key, record)| {
                    (
                        key,
                        CategoryRecord {
                            request: record.request,
                            data: record.data.normalized(),
                        },
                    )
                })
                .collect(),
        }
    }
}

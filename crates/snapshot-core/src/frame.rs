//! Tabular provider results.
//!
//! Providers hand back two table-shaped forms: time-indexed statement tables
//! (balance sheets, income statements) and plain column-oriented tables
//! (price history, holder rosters). [`Frame`] holds both and normalizes them
//! into the uniform keyed-mapping representation used by documents.

use crate::value::{Map, Value};

/// A provider-native table: optional row labels plus named columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    index: Vec<String>,
    columns: Vec<(String, Vec<Value>)>,
}

impl Frame {
    /// Creates an empty frame without row labels.
    ///
    /// Rows of an unlabeled frame are addressed by position when nested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty frame with the given row labels.
    #[must_use]
    pub fn with_index(index: Vec<String>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Appends a named column.
    ///
    /// Columns shorter than the row count are padded with [`Value::Null`] so
    /// every row label resolves to a value.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) {
        self.columns.push((name.into(), values));
    }

    /// Number of rows: the index length, or the longest column if unlabeled.
    #[must_use]
    pub fn row_count(&self) -> usize {
        if self.index.is_empty() {
            self.columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0)
        } else {
            self.index.len()
        }
    }

    /// Returns true if the frame has no rows or no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.row_count() == 0
    }

    /// Normalizes to the nested orientation: `{column: {row_label: value}}`.
    ///
    /// This is the statement orientation, where columns are report dates and
    /// row labels are line items. Unlabeled rows use their position as key.
    #[must_use]
    pub fn into_nested(self) -> Value {
        let rows = self.row_count();
        let mut out = Map::with_capacity(self.columns.len());
        for (name, values) in self.columns {
            let mut column = Map::with_capacity(rows);
            for row in 0..rows {
                let label = self
                    .index
                    .get(row)
                    .cloned()
                    .unwrap_or_else(|| row.to_string());
                let value = values.get(row).cloned().unwrap_or(Value::Null);
                column.insert(label, value);
            }
            out.insert(name, Value::Map(column));
        }
        Value::Map(out)
    }

    /// Normalizes to the columnar orientation: `{column: [values]}`.
    ///
    /// Row labels, if any, are not emitted; callers that need them push the
    /// label column explicitly (the way a date column rides along with price
    /// history).
    #[must_use]
    pub fn into_columnar(self) -> Value {
        let rows = self.row_count();
        let mut out = Map::with_capacity(self.columns.len());
        for (name, mut values) in self.columns {
            values.resize(rows, Value::Null);
            out.insert(name, Value::List(values));
        }
        Value::Map(out)
    }
}

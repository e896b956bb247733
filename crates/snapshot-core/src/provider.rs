//! Provider capability trait.
//!
//! A provider exposes one on-demand retrieval operation per [`Category`].
//! The outcome of a fetch is an explicit tagged result: data, an empty
//! result, or an error. The adapter decides which, so downstream code never
//! has to introspect payload shapes to tell "no data" from "data".

use async_trait::async_trait;
use std::fmt::Debug;

use crate::category::Category;
use crate::error::Result;
use crate::types::Symbol;
use crate::value::Value;

/// Outcome of a successful provider call.
#[derive(Clone, Debug, PartialEq)]
pub enum Fetched {
    /// The category has data.
    Data(Value),
    /// The provider answered but had no data for this category.
    Empty,
}

impl Fetched {
    /// Wraps a payload, demoting empty mappings/sequences to [`Fetched::Empty`].
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Data(value)
        }
    }
}

/// A source of per-ticker category data.
#[async_trait]
pub trait CategoryProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "Yahoo Finance").
    fn name(&self) -> &str;

    /// Fetches one category of data for a symbol.
    ///
    /// Failures here are per-category: the fetch loop logs and moves on, so
    /// implementations should return errors rather than panic.
    async fn fetch(&self, symbol: &Symbol, category: Category) -> Result<Fetched>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Map;

    #[test]
    fn test_empty_shells_demoted() {
        assert_eq!(Fetched::from_value(Value::Map(Map::new())), Fetched::Empty);
        assert_eq!(Fetched::from_value(Value::List(Vec::new())), Fetched::Empty);
        assert_eq!(Fetched::from_value(Value::Null), Fetched::Empty);
        assert_eq!(
            Fetched::from_value(Value::from("US02079K1079")),
            Fetched::Data(Value::from("US02079K1079"))
        );
    }
}

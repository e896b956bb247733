//! Fetch stage: walk the category registry and assemble a document.

use snapshot_core::{Category, CategoryProvider, CategoryRecord, Document, Fetched, Symbol};
use tracing::{error, warn};

/// Fetches every registry category for a symbol and assembles the document.
///
/// Categories are fetched independently: a failed or empty category is
/// logged and omitted, never aborting the run. The document carries only
/// the categories that produced data, in registry order.
pub async fn fetch_document(provider: &dyn CategoryProvider, symbol: &Symbol) -> Document {
    let mut document = Document::new();

    for &category in Category::ALL {
        match provider.fetch(symbol, category).await {
            Ok(Fetched::Data(payload)) => {
                document.insert(
                    category.key(),
                    CategoryRecord::new(category.request(), payload),
                );
            }
            Ok(Fetched::Empty) => {
                warn!(symbol = %symbol, category = %category, "no data returned, skipping");
            }
            Err(error) => {
                error!(symbol = %symbol, category = %category, %error, "fetch failed, skipping");
            }
        }
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use snapshot_core::{Result, SnapshotError, Value};

    /// Provider that fails some categories and returns nothing for others.
    #[derive(Debug)]
    struct FlakyProvider;

    #[async_trait]
    impl CategoryProvider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn fetch(&self, _symbol: &Symbol, category: Category) -> Result<Fetched> {
            match category {
                Category::Info => Err(SnapshotError::Network("connection reset".to_string())),
                Category::Isin => Ok(Fetched::Empty),
                _ => Ok(Fetched::Data(Value::from(category.key()))),
            }
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let symbol = Symbol::new("GOOG");
        let document = fetch_document(&FlakyProvider, &symbol).await;

        assert!(!document.contains("info"));
        assert!(!document.contains("isin"));
        assert_eq!(document.len(), Category::ALL.len() - 2);
        assert_eq!(
            document.get("history").map(|r| &r.data),
            Some(&Value::from("history"))
        );
    }

    #[tokio::test]
    async fn test_records_carry_request_descriptions() {
        let symbol = Symbol::new("GOOG");
        let document = fetch_document(&FlakyProvider, &symbol).await;

        let record = document.get("balance_sheet").unwrap();
        assert_eq!(record.request, Category::BalanceSheet.request());
    }

    #[tokio::test]
    async fn test_registry_order_preserved() {
        let symbol = Symbol::new("GOOG");
        let document = fetch_document(&FlakyProvider, &symbol).await;

        let fetched: Vec<&String> = document.keys().collect();
        let expected: Vec<&str> = Category::ALL
            .iter()
            .map(|c| c.key())
            .filter(|&k| k != "info" && k != "isin")
            .collect();
        assert_eq!(fetched, expected);
    }
}

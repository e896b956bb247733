//! End-to-end snapshot runs.

use std::path::{Path, PathBuf};

use chrono::Local;
use snapshot_core::{CategoryProvider, Result, Symbol};
use tracing::info;

use crate::fetch::fetch_document;
use crate::filter::filter_document;
use crate::rules::DEFAULT_RULES;
use crate::store::{Store, read_document, write_document};

/// Fetches a full snapshot for a symbol, persisting the raw and cleaned
/// documents.
///
/// Returns the cleaned document path.
pub async fn run(
    provider: &dyn CategoryProvider,
    symbol: &Symbol,
    store: &Store,
) -> Result<PathBuf> {
    info!(symbol = %symbol, provider = provider.name(), "fetching snapshot");
    let document = fetch_document(provider, symbol).await.normalized();

    let now = Local::now().naive_local();
    let raw_path = store.raw_path(symbol, now);
    write_document(&raw_path, &document)?;
    info!(path = %raw_path.display(), categories = document.len(), "wrote raw snapshot");

    let cleaned = filter_document(&document, DEFAULT_RULES, now.date());
    let cleaned_path = store.cleaned_path(&raw_path)?;
    write_document(&cleaned_path, &cleaned)?;
    info!(path = %cleaned_path.display(), categories = cleaned.len(), "wrote cleaned snapshot");

    Ok(cleaned_path)
}

/// Re-filters a previously persisted raw document.
///
/// Returns the cleaned document path, derived from the input file stem.
pub fn clean_file(input: &Path, store: &Store) -> Result<PathBuf> {
    let document = read_document(input)?;
    let cleaned = filter_document(&document, DEFAULT_RULES, Local::now().date_naive());

    let cleaned_path = store.cleaned_path(input)?;
    write_document(&cleaned_path, &cleaned)?;
    info!(path = %cleaned_path.display(), categories = cleaned.len(), "wrote cleaned snapshot");

    Ok(cleaned_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use snapshot_core::{Category, Fetched, Map, SnapshotError, Value};

    /// Provider with canned payloads for a handful of categories.
    #[derive(Debug)]
    struct CannedProvider;

    #[async_trait]
    impl CategoryProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn fetch(&self, _symbol: &Symbol, category: Category) -> Result<Fetched> {
            match category {
                Category::Info => {
                    let mut info = Map::new();
                    info.insert("sector".to_string(), Value::from("Technology"));
                    info.insert("website".to_string(), Value::from("https://example.com"));
                    info.insert("beta".to_string(), Value::Float(f64::NAN));
                    Ok(Fetched::Data(Value::Map(info)))
                }
                Category::Isin => Ok(Fetched::Data(Value::from("US02079K1079"))),
                Category::History => Err(SnapshotError::Network("timeout".to_string())),
                _ => Ok(Fetched::Empty),
            }
        }
    }

    #[tokio::test]
    async fn test_run_writes_raw_and_cleaned() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let symbol = Symbol::new("GOOG");

        let cleaned_path = run(&CannedProvider, &symbol, &store).await.unwrap();
        assert!(cleaned_path.is_file());

        let raw_dir = dir.path().join("full");
        let raw_path = std::fs::read_dir(&raw_dir)
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .path();
        let raw = read_document(&raw_path).unwrap();

        // Only the categories that produced data, NaN scrubbed to null.
        assert_eq!(raw.len(), 2);
        let Value::Map(info) = &raw.get("info").unwrap().data else {
            panic!("expected map");
        };
        assert_eq!(info["beta"], Value::Null);

        // Cleaned output reduces ruled categories and passes the rest through.
        let cleaned = read_document(&cleaned_path).unwrap();
        assert_eq!(cleaned.keys().collect::<Vec<_>>(), ["isin", "info"]);
        let Value::Map(info) = &cleaned.get("info").unwrap().data else {
            panic!("expected map");
        };
        assert_eq!(info.keys().collect::<Vec<_>>(), ["sector"]);
        assert_eq!(
            cleaned.get("isin").unwrap().data,
            Value::from("US02079K1079")
        );
    }

    #[tokio::test]
    async fn test_cleaned_path_matches_raw_stem() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let symbol = Symbol::new("GOOG");

        let cleaned_path = run(&CannedProvider, &symbol, &store).await.unwrap();
        let name = cleaned_path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("GOOG_"));
        assert!(name.ends_with("_cleaned.json"));
    }

    #[tokio::test]
    async fn test_clean_file_refilters_raw_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let symbol = Symbol::new("GOOG");

        let cleaned_path = run(&CannedProvider, &symbol, &store).await.unwrap();
        let raw_path = std::fs::read_dir(dir.path().join("full"))
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .path();

        let recleaned_path = clean_file(&raw_path, &store).unwrap();
        assert_eq!(recleaned_path, cleaned_path);
        assert_eq!(
            read_document(&recleaned_path).unwrap(),
            read_document(&cleaned_path).unwrap()
        );
    }

    #[test]
    fn test_clean_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let error = clean_file(Path::new("/nonexistent/input.json"), &store).unwrap_err();
        assert!(matches!(error, SnapshotError::ReadInput { .. }));
    }
}

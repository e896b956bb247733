//! On-disk document store.
//!
//! Layout under the storage root:
//!
//! ```text
//! <root>/full/<SYMBOL>_<YYYYMMDD_HHMM>.json
//! <root>/cleaned/<raw file stem>_cleaned.json
//! ```
//!
//! Runs within the same minute share a raw path and overwrite each other.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use snapshot_core::{Document, Result, SnapshotError, Symbol};

/// Directory for raw snapshot documents.
const RAW_DIR: &str = "full";

/// Directory for cleaned snapshot documents.
const CLEANED_DIR: &str = "cleaned";

/// Suffix appended to a raw file stem for its cleaned counterpart.
const CLEANED_SUFFIX: &str = "_cleaned";

/// Storage root with the raw and cleaned subdirectories.
#[derive(Clone, Debug)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Opens a store at `root`, creating the subdirectories if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for dir in [root.join(RAW_DIR), root.join(CLEANED_DIR)] {
            fs::create_dir_all(&dir).map_err(|e| SnapshotError::WriteOutput {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(Self { root })
    }

    /// The storage root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw document path for a symbol at a timestamp, minute resolution.
    #[must_use]
    pub fn raw_path(&self, symbol: &Symbol, timestamp: NaiveDateTime) -> PathBuf {
        self.root.join(RAW_DIR).join(format!(
            "{}_{}.json",
            symbol.as_str(),
            timestamp.format("%Y%m%d_%H%M")
        ))
    }

    /// Cleaned document path derived from a raw document path.
    ///
    /// The raw file may live anywhere; only its stem is used.
    pub fn cleaned_path(&self, raw_path: &Path) -> Result<PathBuf> {
        let stem = raw_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SnapshotError::ReadInput {
                path: raw_path.to_path_buf(),
                reason: "file name is not valid UTF-8".to_string(),
            })?;
        Ok(self
            .root
            .join(CLEANED_DIR)
            .join(format!("{stem}{CLEANED_SUFFIX}.json")))
    }
}

/// Serializes a document as pretty-printed JSON with four-space indent.
pub fn to_json_string(document: &Document) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| SnapshotError::Parse(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| SnapshotError::Parse(e.to_string()))
}

/// Writes a document to `path`, overwriting any existing file.
pub fn write_document(path: &Path, document: &Document) -> Result<()> {
    let json = to_json_string(document)?;
    fs::write(path, json).map_err(|e| SnapshotError::WriteOutput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Reads a document back from `path`.
pub fn read_document(path: &Path) -> Result<Document> {
    let json = fs::read_to_string(path).map_err(|e| SnapshotError::ReadInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&json).map_err(|e| SnapshotError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapshot_core::{CategoryRecord, Value};

    fn timestamp() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 8, 12)
            .unwrap()
            .and_hms_opt(9, 5, 42)
            .unwrap()
    }

    #[test]
    fn test_new_creates_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        assert!(store.root().join("full").is_dir());
        assert!(store.root().join("cleaned").is_dir());
    }

    #[test]
    fn test_raw_path_minute_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let path = store.raw_path(&Symbol::new("goog"), timestamp());
        assert_eq!(path, dir.path().join("full").join("GOOG_20240812_0905.json"));
    }

    #[test]
    fn test_cleaned_path_from_raw_stem() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let cleaned = store
            .cleaned_path(Path::new("/elsewhere/GOOG_20240812_0905.json"))
            .unwrap();
        assert_eq!(
            cleaned,
            dir.path().join("cleaned").join("GOOG_20240812_0905_cleaned.json")
        );
    }

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let mut document = Document::new();
        document.insert("isin", CategoryRecord::new("lookup", Value::from("US02079K1079")));

        let path = store.raw_path(&Symbol::new("GOOG"), timestamp());
        write_document(&path, &document).unwrap();
        assert_eq!(read_document(&path).unwrap(), document);
    }

    #[test]
    fn test_json_is_indented_four_spaces() {
        let mut document = Document::new();
        document.insert("isin", CategoryRecord::new("lookup", Value::Null));
        let json = to_json_string(&document).unwrap();
        assert!(json.contains("\n    \"isin\""));
        assert!(json.contains("\n        \"request\""));
    }

    #[test]
    fn test_read_missing_file_is_read_error() {
        let error = read_document(Path::new("/nonexistent/input.json")).unwrap_err();
        assert!(matches!(error, SnapshotError::ReadInput { .. }));
    }
}

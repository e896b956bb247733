#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tickersnap/snapshot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # Example
//!
//! ```no_run
//! use snapshot::{Store, Symbol, YahooProvider};
//!
//! # async fn example() -> snapshot::Result<()> {
//! let provider = YahooProvider::new();
//! let store = Store::new("memory")?;
//! let cleaned = snapshot::pipeline::run(&provider, &Symbol::new("GOOG"), &store).await?;
//! println!("cleaned snapshot at {}", cleaned.display());
//! # Ok(())
//! # }
//! ```

pub mod fetch;
pub mod filter;
pub mod pipeline;
pub mod rules;
pub mod store;

pub use fetch::fetch_document;
pub use filter::filter_document;
pub use rules::{DEFAULT_RULES, Rule, RuleKind};
pub use snapshot_core::{
    Category, CategoryProvider, CategoryRecord, Document, Fetched, Frame, Map, Result,
    SnapshotError, Symbol, Value,
};
pub use store::Store;

#[cfg(feature = "yahoo")]
pub use snapshot_yahoo::YahooProvider;

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/tickersnap/snapshot/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the ticker snapshot pipeline:
//!
//! - [`Value`](value::Value) - Dynamic payload value model
//! - [`Frame`](frame::Frame) - Tabular provider results and their normalization
//! - [`Category`](category::Category) - Fixed registry of data categories
//! - [`CategoryProvider`](provider::CategoryProvider) - Provider capability trait
//! - [`Document`](document::Document) - The batch produced by one fetch run
//! - [`SnapshotError`](error::SnapshotError) - Error taxonomy

/// Category registry.
pub mod category;
/// Document and category record types.
pub mod document;
/// Error types for snapshot operations.
pub mod error;
/// Tabular provider results.
pub mod frame;
/// Provider capability trait.
pub mod provider;
/// Core identifier types.
pub mod types;
/// Dynamic payload value model.
pub mod value;

// Re-export commonly used items at crate root
pub use category::Category;
pub use document::{CategoryRecord, Document};
pub use error::{Result, SnapshotError};
pub use frame::Frame;
pub use provider::{CategoryProvider, Fetched};
pub use types::Symbol;
pub use value::{Map, Value};

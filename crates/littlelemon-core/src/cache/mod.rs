//! Local menu cache.
//!
//! `MenuCache` keeps the menu in the SQLite store. The remote document is
//! fetched only when the store is empty (a cold cache); afterwards every read
//! is a filtered query against the store. Results come back in insertion
//! order, which is the order of the remote document.

pub mod filter;
pub mod ingestion;
pub mod manager;

pub use filter::MenuFilter;
pub use ingestion::IngestionRecord;
pub use manager::{MenuCache, IMAGE_PLACEHOLDER};

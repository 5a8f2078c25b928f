//! Local persistence.
//!
//! - `MenuStore`: SQLite table of menu items plus the last-ingestion stamp
//! - `KeyValueStore`: string-keyed records (`FileKeyValueStore` on disk,
//!   `MemoryKeyValueStore` in process)
//!
//! Every failure surfaces as a `StoreError`; nothing here retries.

pub mod error;
pub mod kv;
pub mod menu_db;

pub use error::StoreError;
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use menu_db::MenuStore;

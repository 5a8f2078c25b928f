//! Little Lemon core library.
//!
//! The device-side core of the Little Lemon ordering app:
//!
//! - `api`: fetches the remote menu document
//! - `store`: SQLite menu table and key-value records
//! - `cache`: loads the menu once into the store and serves filtered reads
//! - `profile`: the user profile state container
//! - `validation`: onboarding and profile form checks
//! - `config`: where things live and which URLs to use
//!
//! Front ends own navigation and rendering; they hold a `MenuCache` and a
//! `ProfileState` and call into them.

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod profile;
pub mod store;
pub mod utils;
pub mod validation;

pub use api::{ApiError, MenuClient, MenuSource};
pub use cache::{IngestionRecord, MenuCache, MenuFilter};
pub use config::Config;
pub use models::{Category, MenuItem, ProfileUpdate, RemoteMenuItem, UserProfile};
pub use profile::{ProfileError, ProfileState};
pub use store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, MenuStore, StoreError};

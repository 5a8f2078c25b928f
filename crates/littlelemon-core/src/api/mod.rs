//! Remote menu fetcher.
//!
//! `MenuSource` is the seam the menu cache fetches through; `MenuClient`
//! implements it over HTTP. The document needs no authentication,
//! pagination or versioning.

pub mod client;
pub mod error;

use async_trait::async_trait;

pub use client::MenuClient;
pub use error::ApiError;

use crate::models::RemoteMenuItem;

/// Something that can produce the full remote menu.
#[async_trait]
pub trait MenuSource: Send + Sync {
    async fn fetch_menu(&self) -> Result<Vec<RemoteMenuItem>, ApiError>;
}

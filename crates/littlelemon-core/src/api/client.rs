//! HTTP client for the remote menu document.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use crate::models::{MenuDocument, RemoteMenuItem};

use super::{ApiError, MenuSource};

/// HTTP request timeout in seconds.
/// Without it a hung request would block the cold-cache path indefinitely.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fetches the menu document from a fixed URL.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct MenuClient {
    client: Client,
    menu_url: String,
}

impl MenuClient {
    pub fn new(menu_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            menu_url: menu_url.into(),
        })
    }

    pub fn menu_url(&self) -> &str {
        &self.menu_url
    }

    /// Turn a non-success response into the matching `ApiError`.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }
}

#[async_trait]
impl MenuSource for MenuClient {
    async fn fetch_menu(&self) -> Result<Vec<RemoteMenuItem>, ApiError> {
        debug!(url = %self.menu_url, "Fetching menu document");

        let response = self
            .client
            .get(&self.menu_url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await?;

        // Raw hosts serve the document as text/plain.
        let body = response.text().await?;
        let document: MenuDocument = serde_json::from_str(&body)?;

        debug!(count = document.menu.len(), "Menu document parsed");
        Ok(document.menu)
    }
}

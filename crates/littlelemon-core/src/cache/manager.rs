use tracing::{debug, info, warn};

use crate::api::{MenuClient, MenuSource};
use crate::models::MenuItem;
use crate::store::{MenuStore, StoreError};

use super::{IngestionRecord, MenuFilter};

/// Placeholder replaced by the image file name in image URL templates.
pub const IMAGE_PLACEHOLDER: &str = "{image}";

/// Serves menu reads from the local store, populating it from the remote
/// document the first time the store is found empty.
pub struct MenuCache<S = MenuClient> {
    store: MenuStore,
    source: S,
    image_url_template: String,
}

impl<S: MenuSource> MenuCache<S> {
    pub fn new(store: MenuStore, source: S, image_url_template: impl Into<String>) -> Self {
        Self {
            store,
            source,
            image_url_template: image_url_template.into(),
        }
    }

    /// Fetch and store the menu if the store is empty, then return every row.
    ///
    /// Fetch and ingestion failures are logged and leave the store empty, so
    /// the next call tries again; only a failing final read is returned.
    pub async fn ensure_menu_loaded(&self) -> Result<Vec<MenuItem>, StoreError> {
        match self.store.count() {
            Ok(0) => self.ingest().await,
            Ok(count) => debug!(count, "Menu already cached, skipping fetch"),
            Err(e) => warn!(error = %e, "Failed to count cached menu items"),
        }
        self.query_menu_items(&MenuFilter::default())
    }

    /// Rows matching `filter`, in insertion order.
    pub fn query_menu_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, StoreError> {
        let items = self.store.query(filter)?;
        debug!(
            search = filter.search_term(),
            categories = ?filter.selected_categories(),
            results = items.len(),
            "Menu query"
        );
        Ok(items)
    }

    /// Drop the cached menu and load it again from the remote document.
    pub async fn refresh(&self) -> Result<Vec<MenuItem>, StoreError> {
        self.store.delete_all()?;
        info!("Menu cache cleared");
        self.ensure_menu_loaded().await
    }

    pub fn last_ingestion(&self) -> Result<Option<IngestionRecord>, StoreError> {
        self.store.last_ingestion()
    }

    /// Remote URL of the item's picture.
    pub fn image_url(&self, item: &MenuItem) -> String {
        self.image_url_template.replace(IMAGE_PLACEHOLDER, &item.image)
    }

    pub fn store(&self) -> &MenuStore {
        &self.store
    }

    async fn ingest(&self) {
        info!("Menu cache is cold, fetching remote menu");

        let remote = match self.source.fetch_menu().await {
            Ok(remote) => remote,
            Err(e) => {
                warn!(error = %e, "Failed to fetch menu; will retry on next load");
                return;
            }
        };

        if remote.is_empty() {
            warn!("Remote menu is empty; nothing to cache");
            return;
        }

        let items: Vec<MenuItem> = remote
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.into_menu_item(index as i64))
            .collect();

        match self.store.insert_all(&items) {
            Ok(count) => info!(count, "Menu cached"),
            Err(e) => warn!(error = %e, "Failed to store fetched menu"),
        }
    }
}

//! Menu models: the wire shape of the remote document and the stored row.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level shape of the remote menu document: `{ "menu": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuDocument {
    pub menu: Vec<RemoteMenuItem>,
}

/// A menu entry as it arrives from the remote document.
/// It carries no id; ids are assigned at ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteMenuItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub image: String,
}

impl RemoteMenuItem {
    /// Convert into a stored row, using the position in the fetched batch as id.
    pub fn into_menu_item(self, id: i64) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: Category::normalize(&self.category),
            image: self.image,
        }
    }
}

/// A menu row in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Canonical lowercase category key.
    pub category: String,
    /// Image file name; see `MenuCache::image_url`.
    pub image: String,
}

impl MenuItem {
    /// Description shortened for list display.
    pub fn short_description(&self) -> String {
        crate::utils::truncate_description(&self.description)
    }

    pub fn display_price(&self) -> String {
        crate::utils::format_price(self.price)
    }
}

/// The fixed set of categories offered as filter buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Starters,
    Mains,
    Desserts,
    Drinks,
    Specials,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Starters,
        Category::Mains,
        Category::Desserts,
        Category::Drinks,
        Category::Specials,
    ];

    /// Label shown on the filter button.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Starters => "Starters",
            Category::Mains => "Mains",
            Category::Desserts => "Desserts",
            Category::Drinks => "Drinks",
            Category::Specials => "Specials",
        }
    }

    /// Canonical key stored in the database and used in filters.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Starters => "starters",
            Category::Mains => "mains",
            Category::Desserts => "desserts",
            Category::Drinks => "drinks",
            Category::Specials => "specials",
        }
    }

    /// Parse a label or key, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let key = Self::normalize(s);
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Canonical casing for any category string, known or not.
    pub fn normalize(s: &str) -> String {
        s.trim().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::debug;

use crate::cache::{IngestionRecord, MenuFilter};
use crate::models::MenuItem;

use super::StoreError;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS menu_items (
        id          INTEGER PRIMARY KEY,
        name        TEXT NOT NULL,
        name_folded TEXT NOT NULL,
        description TEXT NOT NULL,
        price       TEXT NOT NULL,
        category    TEXT NOT NULL,
        image       TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS menu_ingestion (
        id          INTEGER PRIMARY KEY CHECK (id = 0),
        item_count  INTEGER NOT NULL,
        ingested_at TEXT NOT NULL
    );
";

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, category, image FROM menu_items";

/// SQLite-backed menu table.
///
/// Every operation takes the connection lock for its own duration, so calls
/// from several tasks are serialized rather than interleaved.
pub struct MenuStore {
    conn: Mutex<Connection>,
}

impl MenuStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "Opening menu database");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Create the tables if absent. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.lock()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Insert a batch in one transaction and stamp the ingestion record.
    /// Ids must not collide with existing rows; on any failure nothing is written.
    pub fn insert_all(&self, items: &[MenuItem]) -> Result<usize, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO menu_items (id, name, name_folded, description, price, category, image)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for item in items {
                stmt.execute(params![
                    item.id,
                    item.name,
                    item.name.to_lowercase(),
                    item.description,
                    item.price.to_string(),
                    item.category,
                    item.image,
                ])?;
            }
        }
        let total: i64 = tx.query_row("SELECT COUNT(*) FROM menu_items", [], |row| row.get(0))?;
        tx.execute(
            "INSERT OR REPLACE INTO menu_ingestion (id, item_count, ingested_at) VALUES (0, ?1, ?2)",
            params![total, Utc::now()],
        )?;
        tx.commit()?;

        debug!(inserted = items.len(), total, "Menu items stored");
        Ok(items.len())
    }

    /// Number of stored rows; zero means the cache is cold.
    pub fn count(&self) -> Result<i64, StoreError> {
        let count = self
            .lock()?
            .query_row("SELECT COUNT(*) FROM menu_items", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Rows matching `filter`, in insertion order.
    pub fn query(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, StoreError> {
        let (clause, values) = filter.where_clause();
        let sql = if clause.is_empty() {
            format!("{SELECT_COLUMNS} ORDER BY id")
        } else {
            format!("{SELECT_COLUMNS} WHERE {clause} ORDER BY id")
        };

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), Self::row_to_item)?;
        let items = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Remove every menu row and the ingestion record.
    pub fn delete_all(&self) -> Result<(), StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM menu_items", [])?;
        tx.execute("DELETE FROM menu_ingestion", [])?;
        tx.commit()?;
        debug!(removed, "Menu items deleted");
        Ok(())
    }

    pub fn last_ingestion(&self) -> Result<Option<IngestionRecord>, StoreError> {
        let record = self
            .lock()?
            .query_row(
                "SELECT item_count, ingested_at FROM menu_ingestion WHERE id = 0",
                [],
                |row| {
                    Ok(IngestionRecord {
                        item_count: row.get(0)?,
                        ingested_at: row.get::<_, DateTime<Utc>>(1)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<MenuItem> {
        let price: String = row.get(3)?;
        let price = Decimal::from_str(&price)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        Ok(MenuItem {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            price,
            category: row.get(4)?,
            image: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, category: &str) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            description: format!("{name} description"),
            price: Decimal::new(999 + id, 2),
            category: category.to_string(),
            image: format!("{id}.jpg"),
        }
    }

    fn seeded() -> MenuStore {
        let store = MenuStore::open_in_memory().unwrap();
        store
            .insert_all(&[
                item(0, "Greek Salad", "starters"),
                item(1, "Bruschetta", "starters"),
                item(2, "Grilled Fish", "mains"),
                item(3, "Lemon Cake", "desserts"),
                item(4, "Cheesecake", "desserts"),
                item(5, "Lemonade", "drinks"),
                item(6, "Veggie Burger", "mains"),
            ])
            .unwrap();
        store
    }

    fn names(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = MenuStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_count() {
        let store = seeded();
        assert_eq!(store.count().unwrap(), 7);
    }

    #[test]
    fn test_empty_filter_returns_all_in_insertion_order() {
        let store = seeded();
        let all = store.query(&MenuFilter::default()).unwrap();
        assert_eq!(all.len(), 7);
        assert_eq!(
            all.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let store = seeded();
        let hits = store.query(&MenuFilter::new().search("BURGER")).unwrap();
        assert_eq!(names(&hits), vec!["Veggie Burger"]);

        let hits = store.query(&MenuFilter::new().search("lemon")).unwrap();
        assert_eq!(names(&hits), vec!["Lemon Cake", "Lemonade"]);
    }

    #[test]
    fn test_search_folds_non_ascii_case() {
        let store = MenuStore::open_in_memory().unwrap();
        store
            .insert_all(&[
                item(0, "Crème Brûlée", "desserts"),
                item(1, "Lemon Cake", "desserts"),
            ])
            .unwrap();

        for term in ["crème", "CRÈME", "BRÛLÉE", "Crème Brûlée"] {
            let hits = store.query(&MenuFilter::new().search(term)).unwrap();
            assert_eq!(names(&hits), vec!["Crème Brûlée"], "search {term:?}");
        }
    }

    #[test]
    fn test_category_filter() {
        let store = seeded();
        let hits = store.query(&MenuFilter::new().category("desserts")).unwrap();
        assert_eq!(names(&hits), vec!["Lemon Cake", "Cheesecake"]);
    }

    #[test]
    fn test_search_and_categories_combine_with_and() {
        let store = seeded();
        let filter = MenuFilter::new()
            .search("cake")
            .categories(["desserts", "drinks"]);
        let hits = store.query(&filter).unwrap();
        assert_eq!(names(&hits), vec!["Lemon Cake", "Cheesecake"]);

        let filter = MenuFilter::new().search("lemon").category("drinks");
        assert_eq!(names(&store.query(&filter).unwrap()), vec!["Lemonade"]);
    }

    #[test]
    fn test_search_text_is_bound_not_interpolated() {
        let store = seeded();
        for hostile in ["' OR 1=1 --", "%", "_", "\\", "x'); DROP TABLE menu_items; --"] {
            let hits = store.query(&MenuFilter::new().search(hostile)).unwrap();
            assert!(hits.is_empty(), "{hostile:?} matched {:?}", names(&hits));
        }
        let hits = store
            .query(&MenuFilter::new().category("desserts' OR '1'='1"))
            .unwrap();
        assert!(hits.is_empty());
        assert_eq!(store.count().unwrap(), 7);
    }

    #[test]
    fn test_price_round_trips_exactly() {
        let store = seeded();
        let fish = store.query(&MenuFilter::new().search("fish")).unwrap();
        assert_eq!(fish[0].price, Decimal::new(1001, 2));
    }

    #[test]
    fn test_duplicate_ids_roll_back_whole_batch() {
        let store = MenuStore::open_in_memory().unwrap();
        let result = store.insert_all(&[item(0, "A", "mains"), item(0, "B", "mains")]);
        assert!(result.is_err());
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.last_ingestion().unwrap().is_none());
    }

    #[test]
    fn test_delete_all_clears_rows_and_ingestion() {
        let store = seeded();
        assert_eq!(store.last_ingestion().unwrap().unwrap().item_count, 7);

        store.delete_all().unwrap();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.last_ingestion().unwrap().is_none());
    }

    #[test]
    fn test_open_file_persists_between_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("menu.db");
        {
            let store = MenuStore::open(&path).unwrap();
            store.insert_all(&[item(0, "Pasta", "mains")]).unwrap();
        }
        let reopened = MenuStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }
}

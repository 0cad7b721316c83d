//! In-process store

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{Condition, Item, Key, Store, Table};
use crate::error::AppResult;

/// Hash-map backed store. Cloning shares the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<Table, HashMap<Key, Item>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn put_item(&self, table: Table, item: Item) -> AppResult<()> {
        let key = table.key_of(&item)?;
        self.tables
            .write()
            .await
            .entry(table)
            .or_default()
            .insert(key, item);
        Ok(())
    }

    async fn get_item(&self, table: Table, key: &Key) -> AppResult<Option<Item>> {
        Ok(self
            .tables
            .read()
            .await
            .get(&table)
            .and_then(|items| items.get(key))
            .cloned())
    }

    async fn scan(&self, table: Table, condition: &Condition) -> AppResult<Vec<Item>> {
        Ok(self
            .tables
            .read()
            .await
            .get(&table)
            .map(|items| {
                items
                    .values()
                    .filter(|item| condition.matches(item))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::store::AttributeValue;

    fn tx_item(book: &str, person: &str, rent: i64) -> Item {
        Item::new()
            .with("book_name", AttributeValue::S(book.into()))
            .with("person_name", AttributeValue::S(person.into()))
            .with("rent", AttributeValue::N(rust_decimal::Decimal::from(rent)))
    }

    #[tokio::test]
    async fn test_put_overwrites_same_key() {
        let store = MemoryStore::new();
        store.put_item(Table::Transactions, tx_item("Dune", "Ann", 0)).await.unwrap();
        store.put_item(Table::Transactions, tx_item("Dune", "Ann", 7)).await.unwrap();
        store.put_item(Table::Transactions, tx_item("Dune", "Bob", 0)).await.unwrap();

        let all = store.scan(Table::Transactions, &Condition::All).await.unwrap();
        assert_eq!(all.len(), 2);

        let item = store
            .get_item(Table::Transactions, &Key::new(["Dune", "Ann"]))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.get_number("rent"), Some(rust_decimal::Decimal::from(7)));
    }

    #[tokio::test]
    async fn test_tables_are_isolated() {
        let store = MemoryStore::new();
        store.put_item(Table::Transactions, tx_item("Dune", "Ann", 0)).await.unwrap();

        assert!(store.scan(Table::Books, &Condition::All).await.unwrap().is_empty());
        assert!(store
            .get_item(Table::Books, &Key::new(["Dune"]))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_scan_filters() {
        let store = MemoryStore::new();
        store.put_item(Table::Transactions, tx_item("Dune", "Ann", 0)).await.unwrap();
        store.put_item(Table::Transactions, tx_item("Emma", "Ann", 0)).await.unwrap();

        let found = store
            .scan(Table::Transactions, &Condition::equals("book_name", "Emma"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("book_name"), Some("Emma"));
    }
}

//! Books table repository

use std::sync::Arc;

use super::store::{AttributeValue, Condition, Item, Key, Store, Table};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter},
};

const BOOK_NAME: &str = "book_name";
const CATEGORY: &str = "category";
const RENT_PER_DAY: &str = "rent_per_day";

#[derive(Clone)]
pub struct BooksRepository {
    store: Arc<dyn Store>,
}

impl BooksRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get book by exact name
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<Book>> {
        self.store
            .get_item(Table::Books, &Key::new([name]))
            .await?
            .map(book_from_item)
            .transpose()
    }

    /// Insert or replace a book
    pub async fn put(&self, book: &Book) -> AppResult<()> {
        self.store.put_item(Table::Books, book_to_item(book)).await
    }

    /// Scan books matching every set field of the filter
    pub async fn search(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let mut condition = Condition::All;
        if let Some(ref name) = filter.name_contains {
            condition = condition.and(Condition::contains(BOOK_NAME, name.as_str()));
        }
        if let Some(ref category) = filter.category_contains {
            condition = condition.and(Condition::contains(CATEGORY, category.as_str()));
        }
        if let Some(range) = filter.rate {
            condition = condition.and(Condition::between(RENT_PER_DAY, range.min(), range.max()));
        }

        self.store
            .scan(Table::Books, &condition)
            .await?
            .into_iter()
            .map(book_from_item)
            .collect()
    }
}

pub(crate) fn book_to_item(book: &Book) -> Item {
    Item::new()
        .with(BOOK_NAME, AttributeValue::S(book.name.clone()))
        .with(CATEGORY, AttributeValue::S(book.category.clone()))
        .with(RENT_PER_DAY, AttributeValue::N(book.rent_per_day))
}

fn book_from_item(item: Item) -> AppResult<Book> {
    let name = item
        .get_str(BOOK_NAME)
        .ok_or_else(|| AppError::Storage("book item without book_name".to_string()))?;
    let rent_per_day = item.get_number(RENT_PER_DAY).ok_or_else(|| {
        AppError::Storage(format!("book '{}' has no numeric rent_per_day", name))
    })?;

    Ok(Book {
        name: name.to_string(),
        // Older items may predate the category attribute
        category: item.get_str(CATEGORY).unwrap_or_default().to_string(),
        rent_per_day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_malformed_item_is_storage_error() {
        let store = Arc::new(MemoryStore::new());
        store
            .put_item(
                Table::Books,
                Item::new()
                    .with(BOOK_NAME, AttributeValue::S("Dune".into()))
                    .with(RENT_PER_DAY, AttributeValue::S("cheap".into())),
            )
            .await
            .unwrap();

        let repo = BooksRepository::new(store);
        assert!(matches!(
            repo.get_by_name("Dune").await,
            Err(AppError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_category_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store
            .put_item(
                Table::Books,
                Item::new()
                    .with(BOOK_NAME, AttributeValue::S("Dune".into()))
                    .with(RENT_PER_DAY, AttributeValue::N(Decimal::ONE)),
            )
            .await
            .unwrap();

        let book = BooksRepository::new(store)
            .get_by_name("Dune")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(book.category, "");
    }
}

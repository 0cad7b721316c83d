//! Transactions table repository

use std::sync::Arc;

use chrono::NaiveDate;

use super::store::{AttributeValue, Condition, Item, Key, Store, Table};
use crate::{
    error::{AppError, AppResult},
    models::{
        date::{format_iso_date, parse_iso_date},
        transaction::Transaction,
    },
};

const BOOK_NAME: &str = "book_name";
const PERSON_NAME: &str = "person_name";
const ISSUE_DATE: &str = "issue_date";
const RETURN_DATE: &str = "return_date";
const RENT_PER_DAY: &str = "rent_per_day";
const RENT: &str = "rent";

#[derive(Clone)]
pub struct TransactionsRepository {
    store: Arc<dyn Store>,
}

impl TransactionsRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Get the transaction for a (book, person) pair
    pub async fn get(&self, book_name: &str, person_name: &str) -> AppResult<Option<Transaction>> {
        self.store
            .get_item(Table::Transactions, &Key::new([book_name, person_name]))
            .await?
            .map(transaction_from_item)
            .transpose()
    }

    /// Insert or replace the transaction under its (book, person) key
    pub async fn put(&self, transaction: &Transaction) -> AppResult<()> {
        self.store
            .put_item(Table::Transactions, transaction_to_item(transaction))
            .await
    }

    /// Transactions on a book, open and closed
    pub async fn find_by_book(&self, book_name: &str) -> AppResult<Vec<Transaction>> {
        self.scan(&Condition::equals(BOOK_NAME, book_name)).await
    }

    /// Transactions of a person, open and closed
    pub async fn find_by_person(&self, person_name: &str) -> AppResult<Vec<Transaction>> {
        self.scan(&Condition::equals(PERSON_NAME, person_name)).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<Transaction>> {
        self.scan(&Condition::All).await
    }

    async fn scan(&self, condition: &Condition) -> AppResult<Vec<Transaction>> {
        self.store
            .scan(Table::Transactions, condition)
            .await?
            .into_iter()
            .map(transaction_from_item)
            .collect()
    }
}

pub(crate) fn transaction_to_item(transaction: &Transaction) -> Item {
    let return_date = match transaction.return_date {
        Some(date) => AttributeValue::S(format_iso_date(date)),
        None => AttributeValue::Null,
    };

    Item::new()
        .with(BOOK_NAME, AttributeValue::S(transaction.book_name.clone()))
        .with(PERSON_NAME, AttributeValue::S(transaction.person_name.clone()))
        .with(ISSUE_DATE, AttributeValue::S(format_iso_date(transaction.issue_date)))
        .with(RETURN_DATE, return_date)
        .with(RENT_PER_DAY, AttributeValue::N(transaction.rent_per_day))
        .with(RENT, AttributeValue::N(transaction.rent))
}

fn required_str<'a>(item: &'a Item, attribute: &str) -> AppResult<&'a str> {
    item.get_str(attribute).ok_or_else(|| {
        AppError::Storage(format!("transaction item without string '{}'", attribute))
    })
}

fn required_number(item: &Item, attribute: &str) -> AppResult<rust_decimal::Decimal> {
    item.get_number(attribute).ok_or_else(|| {
        AppError::Storage(format!("transaction item without numeric '{}'", attribute))
    })
}

/// A stored date that does not parse is corrupt data, not a bad request
fn stored_date(value: &str, attribute: &str) -> AppResult<NaiveDate> {
    parse_iso_date(value)
        .map_err(|e| AppError::Storage(format!("malformed {} '{}': {}", attribute, value, e)))
}

fn transaction_from_item(item: Item) -> AppResult<Transaction> {
    let return_date = match item.get(RETURN_DATE) {
        None | Some(AttributeValue::Null) => None,
        Some(AttributeValue::S(s)) => Some(stored_date(s, RETURN_DATE)?),
        Some(AttributeValue::N(_)) => {
            return Err(AppError::Storage("numeric return_date".to_string()))
        }
    };

    Ok(Transaction {
        book_name: required_str(&item, BOOK_NAME)?.to_string(),
        person_name: required_str(&item, PERSON_NAME)?.to_string(),
        issue_date: stored_date(required_str(&item, ISSUE_DATE)?, ISSUE_DATE)?,
        return_date,
        rent_per_day: required_number(&item, RENT_PER_DAY)?,
        rent: required_number(&item, RENT)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_transaction_stores_null_return_date() {
        let tx = Transaction::open("Dune", "Ann", date(2024, 1, 1), Decimal::TEN);
        let item = transaction_to_item(&tx);
        assert_eq!(item.get(RETURN_DATE), Some(&AttributeValue::Null));
        assert_eq!(item.get_str(ISSUE_DATE), Some("2024-01-01"));
        assert_eq!(transaction_from_item(item).unwrap(), tx);
    }

    #[tokio::test]
    async fn test_stored_bad_date_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let item = transaction_to_item(&Transaction::open("Dune", "Ann", date(2024, 1, 1), Decimal::TEN))
            .with(ISSUE_DATE, AttributeValue::S("01/01/2024".into()));
        store.put_item(Table::Transactions, item).await.unwrap();

        let repo = TransactionsRepository::new(store.clone());
        assert!(matches!(
            repo.get("Dune", "Ann").await,
            Err(AppError::Storage(_))
        ));

        let item = transaction_to_item(&Transaction::open("Emma", "Bob", date(2024, 1, 1), Decimal::TEN))
            .with(RETURN_DATE, AttributeValue::S("2024-02-30".into()));
        store.put_item(Table::Transactions, item).await.unwrap();
        assert!(matches!(
            repo.find_by_person("Bob").await,
            Err(AppError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_book_and_person() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let repo = TransactionsRepository::new(store);
        for (book, person) in [("Dune", "Ann"), ("Dune", "Bob"), ("Emma", "Ann")] {
            repo.put(&Transaction::open(book, person, date(2024, 1, 1), Decimal::ONE))
                .await
                .unwrap();
        }

        assert_eq!(repo.find_by_book("Dune").await.unwrap().len(), 2);
        assert_eq!(repo.find_by_person("Ann").await.unwrap().len(), 2);
        assert!(repo.find_by_person("Zed").await.unwrap().is_empty());
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }
}

//! Rental ledger service: issue, return and aggregate queries

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::transaction::{HoldingStatus, Transaction},
    repository::Repository,
};

use super::catalog::CatalogService;

#[derive(Clone)]
pub struct LedgerService {
    repository: Repository,
    catalog: CatalogService,
}

impl LedgerService {
    pub fn new(repository: Repository, catalog: CatalogService) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    /// Issue a book to a person, snapshotting the book's current rate.
    ///
    /// The ledger keeps one record per (book, person): issuing again replaces
    /// the previous record, even an open one.
    pub async fn issue(
        &self,
        book_name: &str,
        person_name: &str,
        issue_date: NaiveDate,
    ) -> AppResult<Transaction> {
        let book = self
            .catalog
            .get_by_name(book_name)
            .await?
            .ok_or_else(|| AppError::BookNotFound(book_name.to_string()))?;

        if let Some(previous) = self.repository.transactions.get(book_name, person_name).await? {
            if previous.is_open() {
                tracing::warn!(
                    "Issue overwrites open loan of '{}' to '{}' issued {}",
                    book_name,
                    person_name,
                    previous.issue_date
                );
            }
        }

        let transaction = Transaction::open(book_name, person_name, issue_date, book.rent_per_day);
        self.repository.transactions.put(&transaction).await?;

        tracing::info!(
            "Issued '{}' to '{}' on {} at {}/day",
            book_name,
            person_name,
            issue_date,
            book.rent_per_day
        );
        Ok(transaction)
    }

    /// Close an open loan and return the rent it accrued
    pub async fn return_book(
        &self,
        book_name: &str,
        person_name: &str,
        return_date: NaiveDate,
    ) -> AppResult<Decimal> {
        let mut transaction = self
            .repository
            .transactions
            .get(book_name, person_name)
            .await?
            .ok_or_else(|| AppError::TransactionNotFound {
                book_name: book_name.to_string(),
                person_name: person_name.to_string(),
            })?;

        if !transaction.is_open() {
            return Err(AppError::AlreadyReturned {
                book_name: book_name.to_string(),
                person_name: person_name.to_string(),
            });
        }

        let days = (return_date - transaction.issue_date).num_days();
        if days < 0 {
            return Err(AppError::InvalidDate(format!(
                "return date {} precedes issue date {}",
                return_date, transaction.issue_date
            )));
        }

        let accrued = transaction
            .rent_per_day
            .checked_mul(Decimal::from(days))
            .and_then(|amount| transaction.rent.checked_add(amount).map(|rent| (amount, rent)));
        let (rent_amount, rent) = accrued.ok_or_else(|| {
            AppError::InvalidRange(format!(
                "rent for {} day(s) at {} per day exceeds the representable amount",
                days, transaction.rent_per_day
            ))
        })?;
        transaction.rent = rent;
        transaction.return_date = Some(return_date);
        self.repository.transactions.put(&transaction).await?;

        tracing::info!(
            "Returned '{}' from '{}' after {} day(s), rent {}",
            book_name,
            person_name,
            days,
            rent_amount
        );
        Ok(rent_amount)
    }

    /// Point lookup of the (book, person) transaction
    pub async fn get_transaction(
        &self,
        book_name: &str,
        person_name: &str,
    ) -> AppResult<Option<Transaction>> {
        self.repository.transactions.get(book_name, person_name).await
    }

    /// People with a transaction on the book
    pub async fn holders_of(&self, book_name: &str, status: HoldingStatus) -> AppResult<Vec<String>> {
        Ok(self
            .repository
            .transactions
            .find_by_book(book_name)
            .await?
            .into_iter()
            .filter(|t| status.admits(t))
            .map(|t| t.person_name)
            .collect())
    }

    /// Sum of rent collected for the book; open loans count as zero
    pub async fn total_rent_for(&self, book_name: &str) -> AppResult<Decimal> {
        self.repository
            .transactions
            .find_by_book(book_name)
            .await?
            .iter()
            .try_fold(Decimal::ZERO, |total, t| {
                total.checked_add(t.rent).ok_or_else(|| {
                    AppError::InvalidRange(format!(
                        "total rent for '{}' exceeds the representable amount",
                        book_name
                    ))
                })
            })
    }

    /// Books the person has a transaction on
    pub async fn books_held_by(
        &self,
        person_name: &str,
        status: HoldingStatus,
    ) -> AppResult<Vec<String>> {
        Ok(self
            .repository
            .transactions
            .find_by_person(person_name)
            .await?
            .into_iter()
            .filter(|t| status.admits(t))
            .map(|t| t.book_name)
            .collect())
    }

    /// Transactions with `start <= issue_date <= end`
    pub async fn transactions_issued_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Transaction>> {
        if start > end {
            return Err(AppError::InvalidRange(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        Ok(self
            .repository
            .transactions
            .list_all()
            .await?
            .into_iter()
            .filter(|t| start <= t.issue_date && t.issue_date <= end)
            .collect())
    }
}

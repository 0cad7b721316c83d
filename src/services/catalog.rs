//! Catalog service: book lookups and maintenance

use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, RateRange},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Books whose name contains `substring`. An empty substring matches all.
    pub async fn find_by_name_contains(&self, substring: &str) -> AppResult<Vec<Book>> {
        tracing::debug!("Catalog search: name contains {:?}", substring);
        self.repository
            .books
            .search(&BookFilter {
                name_contains: Some(substring.to_string()),
                ..Default::default()
            })
            .await
    }

    /// Books with `min <= rent_per_day <= max`
    pub async fn find_by_rate_range(&self, min: Decimal, max: Decimal) -> AppResult<Vec<Book>> {
        let range = RateRange::new(min, max)?;
        tracing::debug!("Catalog search: rate in [{}, {}]", min, max);
        self.repository
            .books
            .search(&BookFilter {
                rate: Some(range),
                ..Default::default()
            })
            .await
    }

    /// Books matching the name substring, the category substring and the rate range
    pub async fn find_by_name_category_and_rate(
        &self,
        name_substring: &str,
        category_substring: &str,
        min: Decimal,
        max: Decimal,
    ) -> AppResult<Vec<Book>> {
        let filter = BookFilter {
            name_contains: Some(name_substring.to_string()),
            category_contains: Some(category_substring.to_string()),
            rate: Some(RateRange::new(min, max)?),
        };
        tracing::debug!("Catalog search: {:?}", filter);
        self.repository.books.search(&filter).await
    }

    /// Exact lookup; `None` when the catalog has no such book
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<Book>> {
        self.repository.books.get_by_name(name).await
    }

    /// Add a book or replace the one with the same name
    pub async fn put_book(&self, book: Book) -> AppResult<Book> {
        if book.name.is_empty() {
            return Err(AppError::Validation("Book name must not be empty".to_string()));
        }
        if book.rent_per_day < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "Rent per day must not be negative (got {})",
                book.rent_per_day
            )));
        }

        self.repository.books.put(&book).await?;
        tracing::info!("Catalog: stored book '{}' at {}/day", book.name, book.rent_per_day);
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use std::sync::Arc;

    async fn seeded() -> CatalogService {
        let catalog = CatalogService::new(Repository::new(Arc::new(MemoryStore::new())));
        for (name, category, rate) in [
            ("Dune", "sci-fi", Decimal::from(5)),
            ("Dune Messiah", "sci-fi", Decimal::from(10)),
            ("Emma", "classic", Decimal::new(499, 2)),
            ("Hyperion", "sci-fi", Decimal::new(1001, 2)),
        ] {
            catalog
                .put_book(Book {
                    name: name.to_string(),
                    category: category.to_string(),
                    rent_per_day: rate,
                })
                .await
                .unwrap();
        }
        catalog
    }

    fn names(mut books: Vec<Book>) -> Vec<String> {
        books.sort_by(|a, b| a.name.cmp(&b.name));
        books.into_iter().map(|b| b.name).collect()
    }

    #[tokio::test]
    async fn test_find_by_name_contains() {
        let catalog = seeded().await;
        assert_eq!(
            names(catalog.find_by_name_contains("Dune").await.unwrap()),
            vec!["Dune", "Dune Messiah"]
        );
        assert!(catalog.find_by_name_contains("dune").await.unwrap().is_empty());
        assert_eq!(catalog.find_by_name_contains("").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_rate_range_is_inclusive() {
        let catalog = seeded().await;
        let found = catalog
            .find_by_rate_range(Decimal::from(5), Decimal::from(10))
            .await
            .unwrap();
        assert_eq!(names(found), vec!["Dune", "Dune Messiah"]);
    }

    #[tokio::test]
    async fn test_rate_range_rejects_inverted_bounds() {
        let catalog = seeded().await;
        let err = catalog
            .find_by_rate_range(Decimal::from(10), Decimal::from(5))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRange(_)));
    }

    #[tokio::test]
    async fn test_combined_search() {
        let catalog = seeded().await;
        let found = catalog
            .find_by_name_category_and_rate("e", "sci", Decimal::ZERO, Decimal::from(20))
            .await
            .unwrap();
        assert_eq!(names(found), vec!["Dune", "Dune Messiah", "Hyperion"]);

        let found = catalog
            .find_by_name_category_and_rate("", "classic", Decimal::from(5), Decimal::from(20))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_name_absent_is_none() {
        let catalog = seeded().await;
        assert!(catalog.get_by_name("Dun").await.unwrap().is_none());
        assert_eq!(
            catalog.get_by_name("Emma").await.unwrap().unwrap().rent_per_day,
            Decimal::new(499, 2)
        );
    }

    #[tokio::test]
    async fn test_put_book_validates() {
        let catalog = seeded().await;
        let negative = Book {
            name: "Ulysses".to_string(),
            category: String::new(),
            rent_per_day: Decimal::from(-1),
        };
        assert!(matches!(
            catalog.put_book(negative).await,
            Err(AppError::Validation(_))
        ));

        let unnamed = Book {
            name: String::new(),
            category: String::new(),
            rent_per_day: Decimal::ONE,
        };
        assert!(matches!(
            catalog.put_book(unnamed).await,
            Err(AppError::Validation(_))
        ));
    }
}

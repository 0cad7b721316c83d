//! Book (catalog entry) model and lookup filters

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// A rentable book. `name` is the catalog key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Charge per calendar day on loan
    #[schema(value_type = String, example = "2.50")]
    pub rent_per_day: Decimal,
}

/// Inclusive daily rate bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRange {
    min: Decimal,
    max: Decimal,
}

impl RateRange {
    pub fn new(min: Decimal, max: Decimal) -> AppResult<Self> {
        if min > max {
            return Err(AppError::InvalidRange(format!(
                "minimum rate {} is greater than maximum rate {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn contains(&self, rate: Decimal) -> bool {
        self.min <= rate && rate <= self.max
    }
}

/// Conjunctive book filter; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub name_contains: Option<String>,
    pub category_contains: Option<String>,
    pub rate: Option<RateRange>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        self.name_contains
            .as_deref()
            .map_or(true, |s| book.name.contains(s))
            && self
                .category_contains
                .as_deref()
                .map_or(true, |s| book.category.contains(s))
            && self.rate.map_or(true, |r| r.contains(book.rent_per_day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(name: &str, category: &str, rate: Decimal) -> Book {
        Book {
            name: name.to_string(),
            category: category.to_string(),
            rent_per_day: rate,
        }
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(matches!(
            RateRange::new(Decimal::from(10), Decimal::from(5)),
            Err(AppError::InvalidRange(_))
        ));
        assert!(RateRange::new(Decimal::from(5), Decimal::from(5)).is_ok());
    }

    #[test]
    fn test_filter_is_conjunctive_and_case_sensitive() {
        let filter = BookFilter {
            name_contains: Some("Dune".into()),
            category_contains: Some("fi".into()),
            rate: Some(RateRange::new(Decimal::from(1), Decimal::from(3)).unwrap()),
        };

        assert!(filter.matches(&book("Dune Messiah", "sci-fi", Decimal::from(2))));
        assert!(!filter.matches(&book("dune", "sci-fi", Decimal::from(2))));
        assert!(!filter.matches(&book("Dune", "history", Decimal::from(2))));
        assert!(!filter.matches(&book("Dune", "sci-fi", Decimal::from(4))));
        assert!(BookFilter::default().matches(&book("", "", Decimal::ZERO)));
    }
}

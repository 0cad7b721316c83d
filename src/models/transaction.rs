//! Rental transaction model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One issue event, keyed by `(book_name, person_name)`.
///
/// Open while `return_date` is `None`; closed once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub book_name: String,
    pub person_name: String,
    pub issue_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    /// Book rate captured at issue time
    #[schema(value_type = String, example = "2.50")]
    pub rent_per_day: Decimal,
    /// Accrued rent, zero until returned
    #[schema(value_type = String, example = "10.00")]
    pub rent: Decimal,
}

impl Transaction {
    /// A freshly issued, open transaction
    pub fn open(
        book_name: impl Into<String>,
        person_name: impl Into<String>,
        issue_date: NaiveDate,
        rent_per_day: Decimal,
    ) -> Self {
        Self {
            book_name: book_name.into(),
            person_name: person_name.into(),
            issue_date,
            return_date: None,
            rent_per_day,
            rent: Decimal::ZERO,
        }
    }

    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Which transactions the holder queries consider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HoldingStatus {
    /// Everyone who ever borrowed, returned or not
    #[default]
    All,
    /// Only loans not yet returned
    Open,
    /// Only returned loans
    Closed,
}

impl HoldingStatus {
    pub fn admits(&self, transaction: &Transaction) -> bool {
        match self {
            HoldingStatus::All => true,
            HoldingStatus::Open => transaction.is_open(),
            HoldingStatus::Closed => !transaction.is_open(),
        }
    }
}

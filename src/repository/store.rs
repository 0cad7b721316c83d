//! Key/attribute store contract
//!
//! Records are flat maps of typed attribute values. A store supports point
//! writes, point lookups and filtered scans; nothing else is assumed.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Logical tables of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Books,
    Transactions,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Books => "Books",
            Table::Transactions => "Transactions",
        }
    }

    /// Attributes forming the primary key, in key order
    pub fn key_attributes(&self) -> &'static [&'static str] {
        match self {
            Table::Books => &["book_name"],
            Table::Transactions => &["book_name", "person_name"],
        }
    }

    /// Extract the primary key of an item destined for this table
    pub fn key_of(&self, item: &Item) -> AppResult<Key> {
        let parts = self
            .key_attributes()
            .iter()
            .map(|attribute| {
                item.get_str(attribute).map(str::to_owned).ok_or_else(|| {
                    AppError::Storage(format!(
                        "{} item is missing string key attribute '{}'",
                        self.name(),
                        attribute
                    ))
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Key(parts))
    }
}

/// Primary key values, in the order of `Table::key_attributes`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Vec<String>);

impl Key {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Single-string form used as a column value. Each part is written as
    /// `<byte length>:<part>`, so distinct keys never share an encoding.
    pub fn encoded(&self) -> String {
        self.0
            .iter()
            .map(|part| format!("{}:{}", part.len(), part))
            .collect()
    }
}

/// A typed attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(Decimal),
    #[serde(rename = "NULL")]
    Null,
}

/// A flat attribute map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(BTreeMap<String, AttributeValue>);

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attribute: &str, value: AttributeValue) -> Self {
        self.0.insert(attribute.to_string(), value);
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.0.get(attribute)
    }

    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        match self.0.get(attribute) {
            Some(AttributeValue::S(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_number(&self, attribute: &str) -> Option<Decimal> {
        match self.0.get(attribute) {
            Some(AttributeValue::N(n)) => Some(*n),
            _ => None,
        }
    }
}

/// Scan filter. Comparisons against a missing or differently typed
/// attribute never match.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    All,
    /// Literal, case-sensitive substring of a string attribute
    Contains { attribute: String, value: String },
    Equals { attribute: String, value: AttributeValue },
    AtLeast { attribute: String, value: Decimal },
    AtMost { attribute: String, value: Decimal },
    And(Vec<Condition>),
}

impl Condition {
    pub fn contains(attribute: &str, value: impl Into<String>) -> Self {
        Condition::Contains {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn equals(attribute: &str, value: impl Into<String>) -> Self {
        Condition::Equals {
            attribute: attribute.to_string(),
            value: AttributeValue::S(value.into()),
        }
    }

    /// `min <= attribute <= max`
    pub fn between(attribute: &str, min: Decimal, max: Decimal) -> Self {
        Condition::And(vec![
            Condition::AtLeast {
                attribute: attribute.to_string(),
                value: min,
            },
            Condition::AtMost {
                attribute: attribute.to_string(),
                value: max,
            },
        ])
    }

    pub fn and(self, other: Condition) -> Self {
        match (self, other) {
            (Condition::All, c) | (c, Condition::All) => c,
            (Condition::And(mut left), Condition::And(right)) => {
                left.extend(right);
                Condition::And(left)
            }
            (Condition::And(mut left), c) => {
                left.push(c);
                Condition::And(left)
            }
            (c, Condition::And(mut right)) => {
                right.insert(0, c);
                Condition::And(right)
            }
            (c, other) => Condition::And(vec![c, other]),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Condition::All => true,
            Condition::Contains { attribute, value } => item
                .get_str(attribute)
                .map_or(false, |s| s.contains(value.as_str())),
            Condition::Equals { attribute, value } => item.get(attribute) == Some(value),
            Condition::AtLeast { attribute, value } => {
                item.get_number(attribute).map_or(false, |n| n >= *value)
            }
            Condition::AtMost { attribute, value } => {
                item.get_number(attribute).map_or(false, |n| n <= *value)
            }
            Condition::And(conditions) => conditions.iter().all(|c| c.matches(item)),
        }
    }
}

/// Storage collaborator shared by every repository
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert or replace the item under its primary key
    async fn put_item(&self, table: Table, item: Item) -> AppResult<()>;

    async fn get_item(&self, table: Table, key: &Key) -> AppResult<Option<Item>>;

    /// All items of the table matching the condition, in no particular order
    async fn scan(&self, table: Table, condition: &Condition) -> AppResult<Vec<Item>>;

    /// Cheap reachability probe
    async fn ping(&self) -> AppResult<()>;
}

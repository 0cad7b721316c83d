//! PostgreSQL-backed store
//!
//! Every logical table lives in `store_items`, one row per item, with the
//! attribute map kept as JSONB. Scan conditions are compiled to SQL.

use async_trait::async_trait;
use sqlx::{types::Json, Pool, Postgres, QueryBuilder};

use super::store::{Condition, Item, Key, Store, Table};
use crate::error::AppResult;

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Append the SQL form of `condition` to `builder`
fn push_condition(builder: &mut QueryBuilder<'_, Postgres>, condition: &Condition) {
    match condition {
        Condition::All => {
            builder.push("TRUE");
        }
        Condition::Contains { attribute, value } => {
            // strpos is a literal match, unlike LIKE
            builder
                .push("strpos(attrs -> ")
                .push_bind(attribute.clone())
                .push(" ->> 'S', ")
                .push_bind(value.clone())
                .push(") > 0");
        }
        Condition::Equals { attribute, value } => {
            builder
                .push("attrs -> ")
                .push_bind(attribute.clone())
                .push(" = ")
                .push_bind(Json(value.clone()));
        }
        Condition::AtLeast { attribute, value } => {
            builder
                .push("(attrs -> ")
                .push_bind(attribute.clone())
                .push(" ->> 'N')::numeric >= ")
                .push_bind(*value);
        }
        Condition::AtMost { attribute, value } => {
            builder
                .push("(attrs -> ")
                .push_bind(attribute.clone())
                .push(" ->> 'N')::numeric <= ")
                .push_bind(*value);
        }
        Condition::And(conditions) if conditions.is_empty() => {
            builder.push("TRUE");
        }
        Condition::And(conditions) => {
            builder.push("(");
            for (idx, c) in conditions.iter().enumerate() {
                if idx > 0 {
                    builder.push(" AND ");
                }
                push_condition(builder, c);
            }
            builder.push(")");
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn put_item(&self, table: Table, item: Item) -> AppResult<()> {
        let key = table.key_of(&item)?;

        sqlx::query(
            r#"
            INSERT INTO store_items (table_name, item_key, attrs)
            VALUES ($1, $2, $3)
            ON CONFLICT (table_name, item_key) DO UPDATE SET attrs = EXCLUDED.attrs
            "#,
        )
        .bind(table.name())
        .bind(key.encoded())
        .bind(Json(&item))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_item(&self, table: Table, key: &Key) -> AppResult<Option<Item>> {
        let row = sqlx::query_scalar::<_, Json<Item>>(
            "SELECT attrs FROM store_items WHERE table_name = $1 AND item_key = $2",
        )
        .bind(table.name())
        .bind(key.encoded())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|Json(item)| item))
    }

    async fn scan(&self, table: Table, condition: &Condition) -> AppResult<Vec<Item>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT attrs FROM store_items WHERE table_name = ");
        builder.push_bind(table.name()).push(" AND ");
        push_condition(&mut builder, condition);

        tracing::debug!("Scan {}: {}", table.name(), builder.sql());

        let rows = builder
            .build_query_scalar::<Json<Item>>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|Json(item)| item).collect())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn compile(condition: &Condition) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("");
        push_condition(&mut builder, condition);
        builder.sql().to_string()
    }

    #[test]
    fn test_compile_contains() {
        assert_eq!(
            compile(&Condition::contains("book_name", "Dune")),
            "strpos(attrs -> $1 ->> 'S', $2) > 0"
        );
    }

    #[test]
    fn test_compile_conjunction() {
        let condition = Condition::contains("book_name", "Dune")
            .and(Condition::between("rent_per_day", Decimal::ONE, Decimal::TEN));
        assert_eq!(
            compile(&condition),
            "(strpos(attrs -> $1 ->> 'S', $2) > 0 AND \
             (attrs -> $3 ->> 'N')::numeric >= $4 AND \
             (attrs -> $5 ->> 'N')::numeric <= $6)"
        );
    }

    #[test]
    fn test_compile_match_all() {
        assert_eq!(compile(&Condition::All), "TRUE");
        assert_eq!(compile(&Condition::And(vec![])), "TRUE");
    }
}

/**
 * PostgreSQL Collection Backend
 *
 * Stores each document as a JSONB row. The table layout is shared by every
 * collection: `id` and `soft_delete` are mirrored into columns so primary
 * lookups and listing filters use plain indexes, while uniqueness
 * constraints live on expression indexes over the JSON document (see the
 * migrations directory).
 */

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::store::{Collection, Document, StoreError};

/// A [`Collection`] backed by one Postgres table of JSONB documents.
pub struct PgCollection<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PgCollection<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

/// Map a unique-violation back to the document field it guards, so callers
/// can tell a duplicate key apart from any other backend fault.
fn duplicate_field<T: Document>(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            let field = db
                .constraint()
                .and_then(|name| T::UNIQUE_FIELDS.iter().find(|f| name.contains(*(*f))))
                .copied()
                .unwrap_or("id")
                .to_string();
            return StoreError::Duplicate { field };
        }
    }
    StoreError::Backend(err)
}

fn decode_row<T: Document>(row: sqlx::postgres::PgRow) -> Result<T, StoreError> {
    let doc: serde_json::Value = row.try_get("doc")?;
    Ok(serde_json::from_value(doc)?)
}

#[async_trait]
impl<T: Document> Collection<T> for PgCollection<T> {
    async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, doc, soft_delete) VALUES ($1, $2, $3)",
            T::COLLECTION
        );
        sqlx::query(&sql)
            .bind(doc.id())
            .bind(serde_json::to_value(doc)?)
            .bind(doc.soft_deleted())
            .execute(&self.pool)
            .await
            .map_err(duplicate_field::<T>)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", T::COLLECTION);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.map(decode_row::<T>).transpose()
    }

    async fn find_one(&self, field: &str, value: &str) -> Result<Option<T>, StoreError> {
        let sql = format!(
            "SELECT doc FROM {} WHERE doc->>$1 = $2 LIMIT 1",
            T::COLLECTION
        );
        let row = sqlx::query(&sql)
            .bind(field)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        row.map(decode_row::<T>).transpose()
    }

    async fn list_active(&self) -> Result<Vec<T>, StoreError> {
        let sql = format!(
            "SELECT doc FROM {} WHERE soft_delete = FALSE",
            T::COLLECTION
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(decode_row::<T>).collect()
    }
}

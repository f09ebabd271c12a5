use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use autoshop_core::{AppError, QueryFilter};

use crate::repositories::DocumentStore;

/// Documents live in one `documents` table; filters become `jsonb`
/// containment (`data @> filter`), which is exact equality on each field.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, id: Uuid, document: Value) -> Result<(), AppError> {
        sqlx::query("INSERT INTO documents (id, collection, data) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(document)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &QueryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Value>, AppError> {
        let documents = sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents WHERE collection = $1 AND data @> $2 \
             ORDER BY created_at DESC, id LIMIT $3 OFFSET $4",
        )
        .bind(collection)
        .bind(filter.to_json())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &QueryFilter,
    ) -> Result<Option<Value>, AppError> {
        let document = sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents WHERE collection = $1 AND data @> $2 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(collection)
        .bind(filter.to_json())
        .fetch_optional(&self.pool)
        .await?;
        Ok(document)
    }

    async fn count(&self, collection: &str, filter: &QueryFilter) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE collection = $1 AND data @> $2",
        )
        .bind(collection)
        .bind(filter.to_json())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        filter: &QueryFilter,
        document: Value,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE documents SET data = $4, updated_at = NOW() \
             WHERE collection = $1 AND id = $2 AND data @> $3",
        )
        .bind(collection)
        .bind(id)
        .bind(filter.to_json())
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(
        &self,
        collection: &str,
        id: Uuid,
        filter: &QueryFilter,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2 AND data @> $3")
                .bind(collection)
                .bind(id)
                .bind(filter.to_json())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

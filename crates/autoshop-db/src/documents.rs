//! Typed access to the [`DocumentStore`].

use uuid::Uuid;

use autoshop_core::{AppError, QueryFilter};
use autoshop_models::Document;

use crate::repositories::DocumentStore;

pub async fn insert_document<D: Document>(
    store: &dyn DocumentStore,
    document: &D,
) -> Result<(), AppError> {
    let value = serde_json::to_value(document)?;
    store
        .insert(D::COLLECTION, document.document_id(), value)
        .await
}

pub async fn find_documents<D: Document>(
    store: &dyn DocumentStore,
    filter: &QueryFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<D>, AppError> {
    store
        .find(D::COLLECTION, filter, limit, offset)
        .await?
        .into_iter()
        .map(|value| serde_json::from_value(value).map_err(AppError::internal))
        .collect()
}

pub async fn find_document<D: Document>(
    store: &dyn DocumentStore,
    filter: &QueryFilter,
) -> Result<Option<D>, AppError> {
    match store.find_one(D::COLLECTION, filter).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn count_documents<D: Document>(
    store: &dyn DocumentStore,
    filter: &QueryFilter,
) -> Result<i64, AppError> {
    store.count(D::COLLECTION, filter).await
}

/// Writes `document` back if its id still matches `filter`.
pub async fn replace_document<D: Document>(
    store: &dyn DocumentStore,
    filter: &QueryFilter,
    document: &D,
) -> Result<bool, AppError> {
    let value = serde_json::to_value(document)?;
    store
        .replace(D::COLLECTION, document.document_id(), filter, value)
        .await
}

pub async fn delete_document<D: Document>(
    store: &dyn DocumentStore,
    id: Uuid,
    filter: &QueryFilter,
) -> Result<bool, AppError> {
    store.delete(D::COLLECTION, id, filter).await
}

use anyhow::anyhow;
use tracing::instrument;

use autoshop_auth::Principal;
use autoshop_core::{AppError, PaginationParams, QueryFilter};
use autoshop_db::documents::{count_documents, find_document, find_documents, replace_document};
use autoshop_models::{Notification, NotificationId};

use crate::state::AppState;

use super::model::{NotificationFilterParams, PaginatedNotificationsResponse};

pub struct NotificationService;

impl NotificationService {
    /// Notifications are private to their recipient, whatever the role.
    fn own(principal: &Principal) -> QueryFilter {
        QueryFilter::new().with("user_id", principal.user_id.to_string())
    }

    #[instrument(skip(state))]
    pub async fn list(
        state: &AppState,
        principal: &Principal,
        filters: NotificationFilterParams,
        pagination: PaginationParams,
    ) -> Result<PaginatedNotificationsResponse, AppError> {
        let mut filter = Self::own(principal);
        if let Some(read) = filters.read {
            filter.insert("read", read);
        }

        let documents = state.documents.as_ref();
        let total = count_documents::<Notification>(documents, &filter).await?;
        let data = find_documents::<Notification>(
            documents,
            &filter,
            pagination.limit(),
            pagination.offset(),
        )
        .await?;

        Ok(PaginatedNotificationsResponse {
            data,
            meta: pagination.meta(total),
        })
    }

    /// Idempotent.
    #[instrument(skip(state))]
    pub async fn mark_read(
        state: &AppState,
        principal: &Principal,
        id: NotificationId,
    ) -> Result<Notification, AppError> {
        let documents = state.documents.as_ref();
        let filter = Self::own(principal).with("id", id.to_string());

        let mut notification = find_document::<Notification>(documents, &filter)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Notification not found")))?;

        if !notification.read {
            notification.mark_read();
            if !replace_document(documents, &filter, &notification).await? {
                return Err(AppError::not_found(anyhow!("Notification not found")));
            }
        }

        Ok(notification)
    }
}

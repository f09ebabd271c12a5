use axum::Json;
use axum::extract::{Path, Query, State, rejection::QueryRejection};

use autoshop_core::{AppError, PaginationParams};
use autoshop_models::{Notification, NotificationId};

use crate::middleware::auth::RequireNotificationsRead;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::model::{NotificationFilterParams, PaginatedNotificationsResponse};
use super::service::NotificationService;

#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationFilterParams, PaginationParams),
    responses(
        (status = 200, description = "The caller's notifications, newest first", body = PaginatedNotificationsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    RequireNotificationsRead(principal): RequireNotificationsRead,
    filters: Result<Query<NotificationFilterParams>, QueryRejection>,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<PaginatedNotificationsResponse>, AppError> {
    let invalid = |e: QueryRejection| {
        AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e))
    };
    let Query(filters) = filters.map_err(invalid)?;
    let Query(pagination) = pagination.map_err(invalid)?;
    let notifications =
        NotificationService::list(&state, &principal, filters, pagination).await?;
    Ok(Json(notifications))
}

#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    params(("id" = NotificationId, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    RequireNotificationsRead(principal): RequireNotificationsRead,
    Path(id): Path<NotificationId>,
) -> Result<Json<Notification>, AppError> {
    Ok(Json(NotificationService::mark_read(&state, &principal, id).await?))
}

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use autoshop_core::PaginationMeta;
use autoshop_models::Notification;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationFilterParams {
    /// `false` lists only unread notifications.
    pub read: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedNotificationsResponse {
    pub data: Vec<Notification>,
    pub meta: PaginationMeta,
}

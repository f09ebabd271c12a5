//! In-app notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::documents::Document;
use crate::ids::{NotificationId, OrganizationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SecurityAlert,
    System,
    Appointment,
    WorkOrder,
    Invoice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub organization_id: Option<OrganizationId>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Document for Notification {
    const COLLECTION: &'static str = "notifications";

    fn document_id(&self) -> Uuid {
        self.id.into_inner()
    }
}

impl Notification {
    pub fn new(
        user_id: UserId,
        organization_id: Option<OrganizationId>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            organization_id,
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: Utc::now(),
            read_at: None,
        }
    }

    pub fn mark_read(&mut self) {
        if !self.read {
            self.read = true;
            self.read_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut n = Notification::new(
            UserId::new(),
            None,
            NotificationKind::System,
            "Hello",
            "World",
        );
        assert!(!n.read);

        n.mark_read();
        let first = n.read_at;
        n.mark_read();

        assert!(n.read);
        assert_eq!(n.read_at, first);
    }
}

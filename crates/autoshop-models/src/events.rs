//! Domain events emitted by the auth flows.

use serde::Serialize;

use autoshop_core::Role;

use crate::ids::{OrganizationId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    UserRegistered {
        user_id: UserId,
        organization_id: Option<OrganizationId>,
        role: Role,
    },
    UserLoggedIn {
        user_id: UserId,
    },
    UserLoggedOut {
        user_id: UserId,
        all_sessions: bool,
    },
    /// A rotated-out or revoked refresh token was presented. Every session of
    /// the user has already been revoked when this is emitted.
    RefreshTokenReuseDetected {
        user_id: UserId,
        organization_id: Option<OrganizationId>,
    },
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::UserRegistered { .. } => "user_registered",
            DomainEvent::UserLoggedIn { .. } => "user_logged_in",
            DomainEvent::UserLoggedOut { .. } => "user_logged_out",
            DomainEvent::RefreshTokenReuseDetected { .. } => "refresh_token_reuse_detected",
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            DomainEvent::UserRegistered { user_id, .. }
            | DomainEvent::UserLoggedIn { user_id }
            | DomainEvent::UserLoggedOut { user_id, .. }
            | DomainEvent::RefreshTokenReuseDetected { user_id, .. } => *user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_tag_matches_name() {
        let event = DomainEvent::RefreshTokenReuseDetected {
            user_id: UserId::new(),
            organization_id: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
    }
}

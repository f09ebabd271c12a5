//! In-process domain event bus.
//!
//! Services publish [`DomainEvent`]s after the state change they describe
//! has been persisted. Handlers are registered once when the state is built;
//! there is no global registry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use autoshop_core::AppError;
use autoshop_db::DocumentStore;
use autoshop_db::documents::insert_document;
use autoshop_models::{DomainEvent, Notification, NotificationKind};

#[async_trait]
pub trait EventHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &DomainEvent) -> Result<(), AppError>;
}

/// A handler failure reported by [`EventBus::dispatch`].
#[derive(Debug)]
pub struct HandlerFailure {
    pub handler: &'static str,
    pub error: AppError,
}

#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Audit logging plus in-app security notifications stored in `documents`.
    pub fn standard(documents: Arc<dyn DocumentStore>) -> Self {
        Self::new()
            .with_handler(Arc::new(AuditLogHandler))
            .with_handler(Arc::new(SecurityNotificationHandler::new(documents)))
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Runs every handler on a background task. Failures are logged only.
    pub fn publish(&self, event: DomainEvent) {
        if self.handlers.is_empty() {
            return;
        }

        let bus = self.clone();
        tokio::spawn(async move {
            for failure in bus.dispatch(&event).await {
                error!(
                    event = event.name(),
                    handler = failure.handler,
                    error = %failure.error,
                    "Event handler failed"
                );
            }
        });
    }

    /// Runs every handler in registration order and returns the failures.
    pub async fn dispatch(&self, event: &DomainEvent) -> Vec<HandlerFailure> {
        let mut failures = Vec::new();
        for handler in &self.handlers {
            if let Err(error) = handler.handle(event).await {
                failures.push(HandlerFailure {
                    handler: handler.name(),
                    error,
                });
            }
        }
        failures
    }
}

/// Writes every event to the `audit` log target.
pub struct AuditLogHandler;

#[async_trait]
impl EventHandler for AuditLogHandler {
    fn name(&self) -> &'static str {
        "audit_log"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), AppError> {
        let payload = serde_json::to_string(event)?;
        match event {
            DomainEvent::RefreshTokenReuseDetected { .. } => {
                warn!(target: "audit", event = event.name(), user_id = %event.user_id(), %payload, "Security event");
            }
            _ => {
                info!(target: "audit", event = event.name(), user_id = %event.user_id(), %payload, "Audit event");
            }
        }
        Ok(())
    }
}

/// Tells a user, in-app, that their sessions were revoked.
pub struct SecurityNotificationHandler {
    documents: Arc<dyn DocumentStore>,
}

impl SecurityNotificationHandler {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl EventHandler for SecurityNotificationHandler {
    fn name(&self) -> &'static str {
        "security_notification"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), AppError> {
        let DomainEvent::RefreshTokenReuseDetected {
            user_id,
            organization_id,
        } = event
        else {
            return Ok(());
        };

        let notification = Notification::new(
            *user_id,
            *organization_id,
            NotificationKind::SecurityAlert,
            "All sessions signed out",
            "A previously used refresh token was presented again. Every session on \
             your account has been signed out. Sign in again and consider changing \
             your password.",
        );
        insert_document(self.documents.as_ref(), &notification).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use autoshop_core::QueryFilter;
    use autoshop_db::MemoryStore;
    use autoshop_db::documents::find_documents;
    use autoshop_models::UserId;

    use super::*;

    struct Counting(AtomicUsize);

    #[async_trait]
    impl EventHandler for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn handle(&self, _event: &DomainEvent) -> Result<(), AppError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl EventHandler for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn handle(&self, _event: &DomainEvent) -> Result<(), AppError> {
            Err(AppError::internal_error("boom"))
        }
    }

    fn logged_in() -> DomainEvent {
        DomainEvent::UserLoggedIn {
            user_id: UserId::new(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_runs_all_handlers_and_collects_failures() {
        let counting = Arc::new(Counting(AtomicUsize::new(0)));
        let bus = EventBus::new()
            .with_handler(Arc::new(Failing))
            .with_handler(counting.clone());

        let failures = bus.dispatch(&logged_in()).await;

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].handler, "failing");
        assert_eq!(counting.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_security_notification_only_on_reuse() {
        let store = Arc::new(MemoryStore::new());
        let bus = EventBus::standard(store.clone());
        assert_eq!(bus.handler_count(), 2);

        assert!(bus.dispatch(&logged_in()).await.is_empty());
        let user_id = UserId::new();
        let reuse = DomainEvent::RefreshTokenReuseDetected {
            user_id,
            organization_id: None,
        };
        assert!(bus.dispatch(&reuse).await.is_empty());

        let notifications: Vec<Notification> =
            find_documents(store.as_ref(), &QueryFilter::new(), 10, 0)
                .await
                .unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, user_id);
        assert_eq!(notifications[0].kind, NotificationKind::SecurityAlert);
    }
}

use std::sync::Arc;

use autoshop_config::{CorsConfig, JwtConfig, RateLimitConfig};
use autoshop_core::PermissionTable;
use autoshop_db::postgres::{PgDocumentStore, PgOrganizationRepository, PgUserRepository};
use autoshop_db::{DocumentStore, MemoryStore, OrganizationRepository, PgPool, UserRepository};

use crate::events::EventBus;

/// The persistence collaborators behind the service.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub documents: Arc<dyn DocumentStore>,
}

impl Storage {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            organizations: Arc::new(PgOrganizationRepository::new(pool.clone())),
            documents: Arc::new(PgDocumentStore::new(pool)),
        }
    }

    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            organizations: store.clone(),
            documents: store,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub documents: Arc<dyn DocumentStore>,
    pub permissions: Arc<PermissionTable>,
    pub events: EventBus,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl AppState {
    /// Wires the standard event handlers over `storage.documents`.
    pub fn new(
        storage: Storage,
        permissions: PermissionTable,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
    ) -> Self {
        let events = EventBus::standard(storage.documents.clone());

        Self {
            users: storage.users,
            organizations: storage.organizations,
            documents: storage.documents,
            permissions: Arc::new(permissions),
            events,
            jwt_config,
            cors_config,
            rate_limit_config,
        }
    }
}

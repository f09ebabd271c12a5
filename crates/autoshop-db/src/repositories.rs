//! Persistence collaborators.
//!
//! Services depend on these traits only. [`crate::postgres`] backs them with
//! PostgreSQL, [`crate::memory::MemoryStore`] with process memory.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use autoshop_core::{AppError, QueryFilter};
use autoshop_models::organizations::UpdateOrganizationDto;
use autoshop_models::{
    Branch, BranchId, CreateBranchDto, CreateOrganizationDto, NewUser, Organization,
    OrganizationId, UserId, UserRecord,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `email` must already be normalized (trimmed, lower-case).
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, AppError>;

    /// Hashes `new_user.password` and stores the user. A taken email is a
    /// `Conflict`.
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, AppError>;

    async fn update_last_login(&self, id: UserId) -> Result<(), AppError>;

    async fn add_refresh_token(&self, id: UserId, digest: &str) -> Result<(), AppError>;

    /// Removing a digest that is not present is not an error.
    async fn remove_refresh_token(&self, id: UserId, digest: &str) -> Result<(), AppError>;

    async fn clear_refresh_tokens(&self, id: UserId) -> Result<(), AppError>;

    /// Atomically replaces `old` with `new` in the user's token set.
    ///
    /// Returns `false`, changing nothing, when `old` is not currently in the
    /// set. Of two concurrent rotations of the same token at most one
    /// returns `true`.
    async fn rotate_refresh_token(&self, id: UserId, old: &str, new: &str)
    -> Result<bool, AppError>;
}

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn create(&self, dto: CreateOrganizationDto) -> Result<Organization, AppError>;

    async fn find_by_id(&self, id: OrganizationId) -> Result<Option<Organization>, AppError>;

    async fn list(&self) -> Result<Vec<Organization>, AppError>;

    async fn update(
        &self,
        id: OrganizationId,
        dto: UpdateOrganizationDto,
    ) -> Result<Option<Organization>, AppError>;

    async fn create_branch(
        &self,
        organization_id: OrganizationId,
        dto: CreateBranchDto,
    ) -> Result<Branch, AppError>;

    async fn find_branch(&self, id: BranchId) -> Result<Option<Branch>, AppError>;

    async fn list_branches(&self, organization_id: OrganizationId)
    -> Result<Vec<Branch>, AppError>;
}

/// JSON documents grouped by collection, queried by equality filters.
///
/// Listing returns newest documents first.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: &str, id: Uuid, document: Value) -> Result<(), AppError>;

    async fn find(
        &self,
        collection: &str,
        filter: &QueryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Value>, AppError>;

    async fn find_one(&self, collection: &str, filter: &QueryFilter)
    -> Result<Option<Value>, AppError>;

    async fn count(&self, collection: &str, filter: &QueryFilter) -> Result<i64, AppError>;

    /// Replaces document `id` if it also matches `filter`.
    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        filter: &QueryFilter,
        document: Value,
    ) -> Result<bool, AppError>;

    /// Deletes document `id` if it also matches `filter`.
    async fn delete(&self, collection: &str, id: Uuid, filter: &QueryFilter)
    -> Result<bool, AppError>;
}

//! In-memory store implementing every repository trait.
//!
//! Backs `STORAGE_BACKEND=memory` and the test suites. Each operation takes
//! one lock, so refresh token rotation is as atomic here as in PostgreSQL.

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use autoshop_core::password::DEFAULT_COST;
use autoshop_core::{AppError, QueryFilter, hash_password_with_cost};
use autoshop_models::{
    Branch, BranchId, CreateBranchDto, CreateOrganizationDto, NewUser, Organization,
    OrganizationId, UpdateOrganizationDto, UserId, UserRecord,
};

use crate::repositories::{DocumentStore, OrganizationRepository, UserRepository};

pub struct MemoryStore {
    users: RwLock<HashMap<UserId, UserRecord>>,
    organizations: RwLock<HashMap<OrganizationId, Organization>>,
    branches: RwLock<HashMap<BranchId, Branch>>,
    /// Per collection, in insertion order.
    documents: RwLock<HashMap<String, Vec<(Uuid, Value)>>>,
    hash_cost: u32,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_hash_cost(DEFAULT_COST)
    }

    /// Lower bcrypt costs make test suites fast.
    pub fn with_hash_cost(hash_cost: u32) -> Self {
        Self {
            users: RwLock::default(),
            organizations: RwLock::default(),
            branches: RwLock::default(),
            documents: RwLock::default(),
            hash_cost,
        }
    }

    /// Returns `false` when the user does not exist.
    pub async fn set_user_active(&self, id: UserId, active: bool) -> bool {
        match self.users.write().await.get_mut(&id) {
            Some(user) => {
                user.is_active = active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, AppError> {
        let password_hash = hash_password_with_cost(&new_user.password, self.hash_cost)?;

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(anyhow!(
                "User with this email already exists"
            )));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: UserId::new(),
            email: new_user.email,
            password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            phone: new_user.phone,
            role: new_user.role,
            organization_id: new_user.organization_id,
            branch_id: new_user.branch_id,
            permissions: new_user.permissions,
            refresh_tokens: Vec::new(),
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_last_login(&self, id: UserId) -> Result<(), AppError> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn add_refresh_token(&self, id: UserId, digest: &str) -> Result<(), AppError> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.refresh_tokens.push(digest.to_string());
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn remove_refresh_token(&self, id: UserId, digest: &str) -> Result<(), AppError> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.refresh_tokens.retain(|t| t != digest);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn clear_refresh_tokens(&self, id: UserId) -> Result<(), AppError> {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.refresh_tokens.clear();
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: UserId,
        old: &str,
        new: &str,
    ) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&id) else {
            return Ok(false);
        };
        if !user.refresh_tokens.iter().any(|t| t == old) {
            return Ok(false);
        }

        user.refresh_tokens.retain(|t| t != old);
        user.refresh_tokens.push(new.to_string());
        user.updated_at = Utc::now();
        Ok(true)
    }
}

#[async_trait]
impl OrganizationRepository for MemoryStore {
    async fn create(&self, dto: CreateOrganizationDto) -> Result<Organization, AppError> {
        let now = Utc::now();
        let organization = Organization {
            id: OrganizationId::new(),
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            address: dto.address,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.organizations
            .write()
            .await
            .insert(organization.id, organization.clone());
        Ok(organization)
    }

    async fn find_by_id(&self, id: OrganizationId) -> Result<Option<Organization>, AppError> {
        Ok(self.organizations.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Organization>, AppError> {
        let mut organizations: Vec<_> = self.organizations.read().await.values().cloned().collect();
        organizations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(organizations)
    }

    async fn update(
        &self,
        id: OrganizationId,
        dto: UpdateOrganizationDto,
    ) -> Result<Option<Organization>, AppError> {
        let mut organizations = self.organizations.write().await;
        Ok(organizations.get_mut(&id).map(|organization| {
            organization.apply(dto);
            organization.clone()
        }))
    }

    async fn create_branch(
        &self,
        organization_id: OrganizationId,
        dto: CreateBranchDto,
    ) -> Result<Branch, AppError> {
        let now = Utc::now();
        let branch = Branch {
            id: BranchId::new(),
            organization_id,
            name: dto.name,
            address: dto.address,
            phone: dto.phone,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.branches.write().await.insert(branch.id, branch.clone());
        Ok(branch)
    }

    async fn find_branch(&self, id: BranchId) -> Result<Option<Branch>, AppError> {
        Ok(self.branches.read().await.get(&id).cloned())
    }

    async fn list_branches(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Branch>, AppError> {
        let mut branches: Vec<_> = self
            .branches
            .read()
            .await
            .values()
            .filter(|b| b.organization_id == organization_id)
            .cloned()
            .collect();
        branches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(branches)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, id: Uuid, document: Value) -> Result<(), AppError> {
        let mut documents = self.documents.write().await;
        let entries = documents.entry(collection.to_string()).or_default();
        if entries.iter().any(|(existing, _)| *existing == id) {
            return Err(AppError::conflict(anyhow!("Document {} already exists", id)));
        }
        entries.push((id, document));
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &QueryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Value>, AppError> {
        let documents = self.documents.read().await;
        let Some(entries) = documents.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(entries
            .iter()
            .rev()
            .filter(|(_, doc)| filter.matches(doc))
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &QueryFilter,
    ) -> Result<Option<Value>, AppError> {
        let documents = self.documents.read().await;
        Ok(documents.get(collection).and_then(|entries| {
            entries
                .iter()
                .rev()
                .find(|(_, doc)| filter.matches(doc))
                .map(|(_, doc)| doc.clone())
        }))
    }

    async fn count(&self, collection: &str, filter: &QueryFilter) -> Result<i64, AppError> {
        let documents = self.documents.read().await;
        let count = documents
            .get(collection)
            .map(|entries| entries.iter().filter(|(_, doc)| filter.matches(doc)).count())
            .unwrap_or(0);
        Ok(count as i64)
    }

    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        filter: &QueryFilter,
        document: Value,
    ) -> Result<bool, AppError> {
        let mut documents = self.documents.write().await;
        let slot = documents.get_mut(collection).and_then(|entries| {
            entries
                .iter_mut()
                .find(|(existing, doc)| *existing == id && filter.matches(doc))
        });

        match slot {
            Some((_, doc)) => {
                *doc = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(
        &self,
        collection: &str,
        id: Uuid,
        filter: &QueryFilter,
    ) -> Result<bool, AppError> {
        let mut documents = self.documents.write().await;
        let Some(entries) = documents.get_mut(collection) else {
            return Ok(false);
        };

        let before = entries.len();
        entries.retain(|(existing, doc)| !(*existing == id && filter.matches(doc)));
        Ok(entries.len() != before)
    }
}

//! User records and their public projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use autoshop_auth::Principal;
use autoshop_core::{AppError, PermissionTable, Role, verify_password};

use crate::ids::{BranchId, OrganizationId, UserId};

/// A user row as stored, secrets included. Never serialized to clients; use
/// [`User`] for that.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub organization_id: Option<OrganizationId>,
    pub branch_id: Option<BranchId>,
    /// Explicitly assigned permissions. Empty means "role defaults".
    pub permissions: Vec<String>,
    /// SHA-256 digests of the currently valid refresh tokens.
    pub refresh_tokens: Vec<String>,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn verify_password(&self, password: &str) -> Result<bool, AppError> {
        verify_password(password, &self.password_hash)
    }

    /// Persisted permissions that the role still holds in `table`, or the
    /// role's table entry when none are set.
    pub fn effective_permissions(&self, table: &PermissionTable) -> Vec<String> {
        if self.permissions.is_empty() {
            return table.permissions_for(self.role);
        }
        self.permissions
            .iter()
            .filter(|permission| table.allows(self.role, permission))
            .cloned()
            .collect()
    }

    pub fn principal(&self, table: &PermissionTable) -> Principal {
        Principal {
            user_id: self.id.into_inner(),
            email: self.email.clone(),
            role: self.role,
            organization_id: self.organization_id.map(OrganizationId::into_inner),
            branch_id: self.branch_id.map(BranchId::into_inner),
            permissions: self.effective_permissions(table),
        }
    }
}

/// Sanitized user profile: no password hash, no token list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub organization_id: Option<OrganizationId>,
    pub branch_id: Option<BranchId>,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            role: record.role,
            organization_id: record.organization_id,
            branch_id: record.branch_id,
            permissions: record.permissions,
            is_active: record.is_active,
            last_login_at: record.last_login_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating a user. The password is plain text; the repository
/// hashes it.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub organization_id: Option<OrganizationId>,
    pub branch_id: Option<BranchId>,
    pub permissions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use autoshop_core::{hash_password_with_cost, password::MIN_COST, permissions};

    use super::*;

    fn record(role: Role, permissions: Vec<String>) -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: UserId::new(),
            email: "mech@shop.test".to_string(),
            password_hash: hash_password_with_cost("hunter22", MIN_COST).unwrap(),
            first_name: "Max".to_string(),
            last_name: "Power".to_string(),
            phone: None,
            role,
            organization_id: Some(OrganizationId::new()),
            branch_id: Some(BranchId::new()),
            permissions,
            refresh_tokens: vec!["digest".to_string()],
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_effective_permissions_fall_back_to_role() {
        let table = PermissionTable::standard().unwrap();

        let defaults = record(Role::Mechanic, vec![]);
        assert_eq!(
            defaults.effective_permissions(&table),
            table.permissions_for(Role::Mechanic)
        );

        let custom = record(Role::Mechanic, vec![permissions::CARS_READ.to_string()]);
        assert_eq!(custom.effective_permissions(&table), vec![permissions::CARS_READ]);
    }

    #[test]
    fn test_effective_permissions_drop_grants_the_role_lost() {
        let table = PermissionTable::standard().unwrap();
        let stale = record(
            Role::Mechanic,
            vec![
                permissions::CARS_READ.to_string(),
                permissions::CLIENTS_DELETE.to_string(),
                "legacy:permission".to_string(),
            ],
        );

        assert_eq!(stale.effective_permissions(&table), vec![permissions::CARS_READ]);
        assert_eq!(stale.principal(&table).permissions, vec![permissions::CARS_READ]);
    }

    #[test]
    fn test_principal_mirrors_record() {
        let table = PermissionTable::standard().unwrap();
        let rec = record(Role::Manager, vec![]);
        let principal = rec.principal(&table);

        assert_eq!(principal.user_id, rec.id.into_inner());
        assert_eq!(principal.organization_id, rec.organization_id.map(|o| o.0));
        assert_eq!(principal.branch_id, rec.branch_id.map(|b| b.0));
        assert_eq!(principal.role, Role::Manager);
    }

    #[test]
    fn test_sanitized_user_hides_secrets() {
        let rec = record(Role::Client, vec![]);
        assert!(rec.verify_password("hunter22").unwrap());
        assert!(!rec.verify_password("hunter23").unwrap());

        let json = serde_json::to_value(User::from(rec)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_tokens").is_none());
        assert_eq!(json["role"], "client");
    }
}

//! Administrative operations behind the `autoshop-cli` binary.
//!
//! Super admins cannot register over HTTP, so this is the only way to create
//! the first account. The operations take repository trait objects and run
//! against PostgreSQL in production and the in-memory store in tests.

use anyhow::{Context, bail};

use autoshop_core::{PermissionTable, Role};
use autoshop_db::{OrganizationRepository, UserRepository};
use autoshop_models::{CreateOrganizationDto, NewUser, Organization, UserRecord};

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct AccountInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl AccountInput {
    fn into_new_user(
        self,
        role: Role,
        organization: Option<&Organization>,
        permissions: &PermissionTable,
    ) -> anyhow::Result<NewUser> {
        let email = self.email.trim().to_lowercase();
        if !email.contains('@') {
            bail!("`{}` is not a valid email address", self.email);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            bail!("Password must be at least {MIN_PASSWORD_LENGTH} characters");
        }

        Ok(NewUser {
            email,
            password: self.password,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: None,
            role,
            organization_id: organization.map(|o| o.id),
            branch_id: None,
            permissions: permissions.permissions_for(role),
        })
    }
}

pub async fn create_super_admin(
    users: &dyn UserRepository,
    permissions: &PermissionTable,
    account: AccountInput,
) -> anyhow::Result<UserRecord> {
    let new_user = account.into_new_user(Role::SuperAdmin, None, permissions)?;
    users
        .create(new_user)
        .await
        .map_err(|e| e.error)
        .context("Failed to create super admin")
}

/// Creates an organization and its owner account.
///
/// The owner's email is checked before anything is written, so a taken email
/// leaves no orphaned organization behind.
pub async fn create_organization(
    organizations: &dyn OrganizationRepository,
    users: &dyn UserRepository,
    permissions: &PermissionTable,
    organization: CreateOrganizationDto,
    owner: AccountInput,
) -> anyhow::Result<(Organization, UserRecord)> {
    let email = owner.email.trim().to_lowercase();
    let taken = users
        .find_by_email(&email)
        .await
        .map_err(|e| e.error)?;
    if taken.is_some() {
        bail!("A user with email {email} already exists");
    }

    let organization = organizations
        .create(organization)
        .await
        .map_err(|e| e.error)
        .context("Failed to create organization")?;

    let new_user = owner.into_new_user(Role::Owner, Some(&organization), permissions)?;
    let owner = users
        .create(new_user)
        .await
        .map_err(|e| e.error)
        .context("Failed to create owner account")?;

    Ok((organization, owner))
}

#[cfg(test)]
mod tests {
    use autoshop_core::password::MIN_COST;
    use autoshop_db::MemoryStore;

    use super::*;

    fn account(email: &str) -> AccountInput {
        AccountInput {
            first_name: "Root".to_string(),
            last_name: "Admin".to_string(),
            email: email.to_string(),
            password: "correct-horse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_super_admin() {
        let store = MemoryStore::with_hash_cost(MIN_COST);
        let table = PermissionTable::standard().unwrap();

        let admin = create_super_admin(&store, &table, account(" Root@Shop.TEST "))
            .await
            .unwrap();

        assert_eq!(admin.email, "root@shop.test");
        assert_eq!(admin.role, Role::SuperAdmin);
        assert!(admin.organization_id.is_none());
        assert_eq!(admin.permissions, table.permissions_for(Role::SuperAdmin));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let store = MemoryStore::with_hash_cost(MIN_COST);
        let table = PermissionTable::standard().unwrap();
        let input = AccountInput {
            password: "short".to_string(),
            ..account("root@shop.test")
        };

        assert!(create_super_admin(&store, &table, input).await.is_err());
    }

    #[tokio::test]
    async fn test_create_organization_with_owner() {
        let store = MemoryStore::with_hash_cost(MIN_COST);
        let table = PermissionTable::standard().unwrap();
        let dto = CreateOrganizationDto {
            name: "Precision Auto".to_string(),
            email: None,
            phone: None,
            address: None,
        };

        let (organization, owner) =
            create_organization(&store, &store, &table, dto.clone(), account("owner@shop.test"))
                .await
                .unwrap();
        assert_eq!(owner.role, Role::Owner);
        assert_eq!(owner.organization_id, Some(organization.id));

        let again =
            create_organization(&store, &store, &table, dto, account("owner@shop.test")).await;
        assert!(again.is_err());
        assert_eq!(OrganizationRepository::list(&store).await.unwrap().len(), 1);
    }
}

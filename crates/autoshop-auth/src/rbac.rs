//! Role and permission guards.
//!
//! Both guards take the principal as `Option` because a request may reach
//! them without one; that is a denial, not a crash.

use autoshop_core::{AppError, Role};

use crate::principal::Principal;

/// Passes when the principal's permission list contains `permission`.
pub fn can(principal: Option<&Principal>, permission: &str) -> Result<(), AppError> {
    let Some(principal) = principal else {
        return Err(AppError::forbidden("Authentication required"));
    };

    if principal.has_permission(permission) {
        Ok(())
    } else {
        tracing::debug!(
            user_id = %principal.user_id,
            role = %principal.role,
            permission,
            "Permission denied"
        );
        Err(AppError::forbidden(format!(
            "Missing required permission: {}",
            permission
        )))
    }
}

/// Passes when the principal holds one of `roles`.
pub fn is_role(principal: Option<&Principal>, roles: &[Role]) -> Result<(), AppError> {
    let Some(principal) = principal else {
        return Err(AppError::forbidden("Authentication required"));
    };

    if roles.contains(&principal.role) {
        Ok(())
    } else {
        tracing::debug!(user_id = %principal.user_id, role = %principal.role, "Role denied");
        Err(AppError::forbidden("Insufficient role"))
    }
}

#[cfg(test)]
mod tests {
    use autoshop_core::{PermissionTable, permissions};
    use uuid::Uuid;

    use super::*;

    fn principal_with_defaults(role: Role) -> Principal {
        let table = PermissionTable::standard().unwrap();
        Principal {
            user_id: Uuid::new_v4(),
            email: format!("{role}@shop.test"),
            role,
            organization_id: Some(Uuid::new_v4()),
            branch_id: None,
            permissions: table.permissions_for(role),
        }
    }

    #[test]
    fn test_client_cannot_delete_clients() {
        let client = principal_with_defaults(Role::Client);
        let err = can(Some(&client), permissions::CLIENTS_DELETE).unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_owner_can_delete_clients() {
        let owner = principal_with_defaults(Role::Owner);
        assert!(can(Some(&owner), permissions::CLIENTS_DELETE).is_ok());
    }

    #[test]
    fn test_missing_principal_is_forbidden() {
        assert!(can(None, permissions::CLIENTS_READ).unwrap_err().is_forbidden());
        assert!(is_role(None, &[Role::Owner]).unwrap_err().is_forbidden());
    }

    #[test]
    fn test_can_uses_principal_list_not_role() {
        let mut mechanic = principal_with_defaults(Role::Mechanic);
        mechanic.permissions.clear();
        assert!(can(Some(&mechanic), permissions::CARS_READ).is_err());

        mechanic.permissions.push(permissions::REPORTS_EXPORT.to_string());
        assert!(can(Some(&mechanic), permissions::REPORTS_EXPORT).is_ok());
    }

    #[test]
    fn test_is_role() {
        let manager = principal_with_defaults(Role::Manager);
        assert!(is_role(Some(&manager), &[Role::Owner, Role::Manager]).is_ok());
        assert!(is_role(Some(&manager), &[Role::SuperAdmin]).unwrap_err().is_forbidden());
        assert!(is_role(Some(&manager), &[]).is_err());
    }
}

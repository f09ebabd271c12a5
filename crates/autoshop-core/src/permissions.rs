//! Permission constants and the role → permission table.
//!
//! Permissions are `"<resource>:<action>"` strings shared as a contract
//! between the auth layer and every resource controller. Use the constants
//! instead of string literals.
//!
//! The [`PermissionTable`] is built once at startup and handed to whoever
//! needs it. Construction fails if any constant in [`ALL_PERMISSIONS`] lacks
//! an entry, so a missing mapping is caught at deploy time instead of turning
//! into a silent denial at request time.
//!
//! # Example
//!
//! ```ignore
//! use autoshop_core::{PermissionTable, Role, permissions};
//!
//! let table = PermissionTable::standard()?;
//! let defaults = table.permissions_for(Role::Mechanic);
//! assert!(defaults.iter().any(|p| p == permissions::CARS_UPDATE));
//! ```

use std::collections::BTreeMap;

use crate::roles::Role;

// =============================================================================
// Organizations and branches
// =============================================================================

pub const ORGANIZATIONS_READ: &str = "organizations:read";
pub const ORGANIZATIONS_CREATE: &str = "organizations:create";
pub const ORGANIZATIONS_UPDATE: &str = "organizations:update";
pub const ORGANIZATIONS_DELETE: &str = "organizations:delete";

pub const BRANCHES_READ: &str = "branches:read";
pub const BRANCHES_CREATE: &str = "branches:create";
pub const BRANCHES_UPDATE: &str = "branches:update";
pub const BRANCHES_DELETE: &str = "branches:delete";

// =============================================================================
// Staff
// =============================================================================

pub const USERS_READ: &str = "users:read";
pub const USERS_CREATE: &str = "users:create";
pub const USERS_UPDATE: &str = "users:update";
pub const USERS_DELETE: &str = "users:delete";

// =============================================================================
// Customers and their vehicles
// =============================================================================

pub const CLIENTS_READ: &str = "clients:read";
pub const CLIENTS_CREATE: &str = "clients:create";
pub const CLIENTS_UPDATE: &str = "clients:update";
pub const CLIENTS_DELETE: &str = "clients:delete";

pub const CARS_READ: &str = "cars:read";
pub const CARS_CREATE: &str = "cars:create";
pub const CARS_UPDATE: &str = "cars:update";
pub const CARS_DELETE: &str = "cars:delete";

// =============================================================================
// Shop floor
// =============================================================================

pub const APPOINTMENTS_READ: &str = "appointments:read";
pub const APPOINTMENTS_CREATE: &str = "appointments:create";
pub const APPOINTMENTS_UPDATE: &str = "appointments:update";
pub const APPOINTMENTS_DELETE: &str = "appointments:delete";

pub const WORK_ORDERS_READ: &str = "work_orders:read";
pub const WORK_ORDERS_CREATE: &str = "work_orders:create";
pub const WORK_ORDERS_UPDATE: &str = "work_orders:update";
pub const WORK_ORDERS_DELETE: &str = "work_orders:delete";

// =============================================================================
// Billing
// =============================================================================

pub const INVOICES_READ: &str = "invoices:read";
pub const INVOICES_CREATE: &str = "invoices:create";
pub const INVOICES_UPDATE: &str = "invoices:update";
pub const INVOICES_DELETE: &str = "invoices:delete";

// =============================================================================
// Inventory and purchasing
// =============================================================================

pub const PARTS_READ: &str = "parts:read";
pub const PARTS_CREATE: &str = "parts:create";
pub const PARTS_UPDATE: &str = "parts:update";
pub const PARTS_DELETE: &str = "parts:delete";

pub const SUPPLIERS_READ: &str = "suppliers:read";
pub const SUPPLIERS_CREATE: &str = "suppliers:create";
pub const SUPPLIERS_UPDATE: &str = "suppliers:update";
pub const SUPPLIERS_DELETE: &str = "suppliers:delete";

pub const PURCHASE_ORDERS_READ: &str = "purchase_orders:read";
pub const PURCHASE_ORDERS_CREATE: &str = "purchase_orders:create";
pub const PURCHASE_ORDERS_UPDATE: &str = "purchase_orders:update";
pub const PURCHASE_ORDERS_DELETE: &str = "purchase_orders:delete";

// =============================================================================
// Notifications, reports, settings
// =============================================================================

pub const NOTIFICATIONS_READ: &str = "notifications:read";
pub const NOTIFICATIONS_CREATE: &str = "notifications:create";
pub const NOTIFICATIONS_UPDATE: &str = "notifications:update";
pub const NOTIFICATIONS_DELETE: &str = "notifications:delete";

pub const REPORTS_VIEW: &str = "reports:view";
pub const REPORTS_EXPORT: &str = "reports:export";

pub const SETTINGS_READ: &str = "settings:read";
pub const SETTINGS_UPDATE: &str = "settings:update";

/// Every permission the system checks anywhere.
pub const ALL_PERMISSIONS: &[&str] = &[
    ORGANIZATIONS_READ,
    ORGANIZATIONS_CREATE,
    ORGANIZATIONS_UPDATE,
    ORGANIZATIONS_DELETE,
    BRANCHES_READ,
    BRANCHES_CREATE,
    BRANCHES_UPDATE,
    BRANCHES_DELETE,
    USERS_READ,
    USERS_CREATE,
    USERS_UPDATE,
    USERS_DELETE,
    CLIENTS_READ,
    CLIENTS_CREATE,
    CLIENTS_UPDATE,
    CLIENTS_DELETE,
    CARS_READ,
    CARS_CREATE,
    CARS_UPDATE,
    CARS_DELETE,
    APPOINTMENTS_READ,
    APPOINTMENTS_CREATE,
    APPOINTMENTS_UPDATE,
    APPOINTMENTS_DELETE,
    WORK_ORDERS_READ,
    WORK_ORDERS_CREATE,
    WORK_ORDERS_UPDATE,
    WORK_ORDERS_DELETE,
    INVOICES_READ,
    INVOICES_CREATE,
    INVOICES_UPDATE,
    INVOICES_DELETE,
    PARTS_READ,
    PARTS_CREATE,
    PARTS_UPDATE,
    PARTS_DELETE,
    SUPPLIERS_READ,
    SUPPLIERS_CREATE,
    SUPPLIERS_UPDATE,
    SUPPLIERS_DELETE,
    PURCHASE_ORDERS_READ,
    PURCHASE_ORDERS_CREATE,
    PURCHASE_ORDERS_UPDATE,
    PURCHASE_ORDERS_DELETE,
    NOTIFICATIONS_READ,
    NOTIFICATIONS_CREATE,
    NOTIFICATIONS_UPDATE,
    NOTIFICATIONS_DELETE,
    REPORTS_VIEW,
    REPORTS_EXPORT,
    SETTINGS_READ,
    SETTINGS_UPDATE,
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionTableError {
    #[error("permission `{0}` has no entry in the permission table")]
    MissingEntry(&'static str),
    #[error("permission table entry `{0}` is not a known permission")]
    UnknownPermission(String),
}

/// Static mapping from permission to the roles allowed to exercise it.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    entries: BTreeMap<&'static str, Vec<Role>>,
}

impl PermissionTable {
    /// Builds a table and checks it covers exactly [`ALL_PERMISSIONS`].
    pub fn new<I>(entries: I) -> Result<Self, PermissionTableError>
    where
        I: IntoIterator<Item = (&'static str, Vec<Role>)>,
    {
        let entries: BTreeMap<&'static str, Vec<Role>> = entries.into_iter().collect();

        if let Some(unknown) = entries.keys().find(|key| !ALL_PERMISSIONS.contains(key)) {
            return Err(PermissionTableError::UnknownPermission(unknown.to_string()));
        }

        if let Some(missing) = ALL_PERMISSIONS.iter().find(|p| !entries.contains_key(*p)) {
            return Err(PermissionTableError::MissingEntry(missing));
        }

        Ok(Self { entries })
    }

    /// The shop's default role → permission mapping.
    pub fn standard() -> Result<Self, PermissionTableError> {
        use Role::*;

        let all_roles = Role::ALL.to_vec();
        let staff = vec![SuperAdmin, Owner, Admin, Manager, Mechanic, Accountant];
        let management = vec![SuperAdmin, Owner, Admin, Manager];
        let org_admin = vec![SuperAdmin, Owner, Admin];
        let finance = vec![SuperAdmin, Owner, Admin, Manager, Accountant];
        let with = |base: &Vec<Role>, extra: &[Role]| {
            let mut roles = base.clone();
            roles.extend_from_slice(extra);
            roles
        };

        Self::new([
            (ORGANIZATIONS_READ, org_admin.clone()),
            (ORGANIZATIONS_CREATE, vec![SuperAdmin]),
            (ORGANIZATIONS_UPDATE, vec![SuperAdmin, Owner]),
            (ORGANIZATIONS_DELETE, vec![SuperAdmin]),
            (BRANCHES_READ, staff.clone()),
            (BRANCHES_CREATE, org_admin.clone()),
            (BRANCHES_UPDATE, org_admin.clone()),
            (BRANCHES_DELETE, org_admin.clone()),
            (USERS_READ, management.clone()),
            (USERS_CREATE, management.clone()),
            (USERS_UPDATE, org_admin.clone()),
            (USERS_DELETE, org_admin.clone()),
            (CLIENTS_READ, staff.clone()),
            (CLIENTS_CREATE, management.clone()),
            (CLIENTS_UPDATE, management.clone()),
            (CLIENTS_DELETE, org_admin.clone()),
            (CARS_READ, with(&staff, &[Client])),
            (CARS_CREATE, with(&management, &[Mechanic])),
            (CARS_UPDATE, with(&management, &[Mechanic])),
            (CARS_DELETE, management.clone()),
            (APPOINTMENTS_READ, with(&staff, &[Client])),
            (APPOINTMENTS_CREATE, with(&management, &[Client])),
            (APPOINTMENTS_UPDATE, with(&management, &[Mechanic])),
            (APPOINTMENTS_DELETE, management.clone()),
            (WORK_ORDERS_READ, staff.clone()),
            (WORK_ORDERS_CREATE, with(&management, &[Mechanic])),
            (WORK_ORDERS_UPDATE, with(&management, &[Mechanic])),
            (WORK_ORDERS_DELETE, management.clone()),
            (INVOICES_READ, with(&finance, &[Client])),
            (INVOICES_CREATE, finance.clone()),
            (INVOICES_UPDATE, finance.clone()),
            (INVOICES_DELETE, org_admin.clone()),
            (PARTS_READ, staff.clone()),
            (PARTS_CREATE, management.clone()),
            (PARTS_UPDATE, management.clone()),
            (PARTS_DELETE, org_admin.clone()),
            (SUPPLIERS_READ, finance.clone()),
            (SUPPLIERS_CREATE, management.clone()),
            (SUPPLIERS_UPDATE, management.clone()),
            (SUPPLIERS_DELETE, org_admin.clone()),
            (PURCHASE_ORDERS_READ, finance.clone()),
            (PURCHASE_ORDERS_CREATE, management.clone()),
            (PURCHASE_ORDERS_UPDATE, management.clone()),
            (PURCHASE_ORDERS_DELETE, org_admin.clone()),
            (NOTIFICATIONS_READ, all_roles.clone()),
            (NOTIFICATIONS_CREATE, management.clone()),
            (NOTIFICATIONS_UPDATE, all_roles),
            (NOTIFICATIONS_DELETE, org_admin.clone()),
            (REPORTS_VIEW, finance),
            (REPORTS_EXPORT, with(&org_admin, &[Accountant])),
            (SETTINGS_READ, management),
            (SETTINGS_UPDATE, org_admin),
        ])
    }

    /// Roles allowed to exercise `permission`, `None` if it is not in the table.
    pub fn roles_for(&self, permission: &str) -> Option<&[Role]> {
        self.entries.get(permission).map(Vec::as_slice)
    }

    pub fn allows(&self, role: Role, permission: &str) -> bool {
        self.roles_for(permission)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Default permission set for a role, in table order.
    pub fn permissions_for(&self, role: Role) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, roles)| roles.contains(&role))
            .map(|(permission, _)| permission.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_total() {
        let table = PermissionTable::standard().unwrap();
        for permission in ALL_PERMISSIONS {
            assert!(
                table.roles_for(permission).is_some(),
                "missing entry for {permission}"
            );
        }
    }

    #[test]
    fn test_permission_strings_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for permission in ALL_PERMISSIONS {
            assert!(seen.insert(*permission), "duplicate {permission}");
        }
    }

    #[test]
    fn test_missing_entry_rejected() {
        let err = PermissionTable::new([(CLIENTS_READ, vec![Role::Owner])]).unwrap_err();
        assert!(matches!(err, PermissionTableError::MissingEntry(_)));
    }

    #[test]
    fn test_unknown_entry_rejected() {
        let mut entries: Vec<(&'static str, Vec<Role>)> = ALL_PERMISSIONS
            .iter()
            .map(|p| (*p, vec![Role::SuperAdmin]))
            .collect();
        entries.push(("rockets:launch", vec![Role::Owner]));

        let err = PermissionTable::new(entries).unwrap_err();
        assert_eq!(
            err,
            PermissionTableError::UnknownPermission("rockets:launch".to_string())
        );
    }

    #[test]
    fn test_super_admin_has_everything() {
        let table = PermissionTable::standard().unwrap();
        assert_eq!(
            table.permissions_for(Role::SuperAdmin).len(),
            ALL_PERMISSIONS.len()
        );
    }

    #[test]
    fn test_client_cannot_delete_clients() {
        let table = PermissionTable::standard().unwrap();
        assert!(!table.allows(Role::Client, CLIENTS_DELETE));
        assert!(table.allows(Role::Client, CARS_READ));
        assert!(table.allows(Role::Client, APPOINTMENTS_CREATE));
    }

    #[test]
    fn test_unknown_permission_is_never_allowed() {
        let table = PermissionTable::standard().unwrap();
        assert!(table.roles_for("rockets:launch").is_none());
        assert!(!table.allows(Role::SuperAdmin, "rockets:launch"));
    }

    #[test]
    fn test_permissions_for_matches_allows() {
        let table = PermissionTable::standard().unwrap();
        for role in Role::ALL {
            let granted = table.permissions_for(role);
            for permission in ALL_PERMISSIONS {
                assert_eq!(
                    granted.iter().any(|p| p == permission),
                    table.allows(role, permission),
                    "{role} / {permission}"
                );
            }
        }
    }
}

//! User roles.
//!
//! A user holds exactly one role. The role decides the default permission set
//! (see [`crate::permissions::PermissionTable`]) and how tenant and branch
//! scoping applies to the user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator. Not bound to any organization.
    SuperAdmin,
    /// Owns an organization and sees every branch of it.
    Owner,
    /// Organization administrator.
    Admin,
    /// Runs one branch.
    Manager,
    /// Works in one branch.
    Mechanic,
    Accountant,
    /// A customer of the shop.
    #[default]
    Client,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl Role {
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::Owner,
        Role::Admin,
        Role::Manager,
        Role::Mechanic,
        Role::Accountant,
        Role::Client,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Mechanic => "mechanic",
            Role::Accountant => "accountant",
            Role::Client => "client",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Roles that see every branch of their organization.
    pub fn spans_all_branches(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Owner)
    }

    /// Roles whose data access is confined to their own branch.
    pub fn is_branch_bound(&self) -> bool {
        matches!(self, Role::Manager | Role::Mechanic)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRoleError(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("mechanic ".parse::<Role>().is_err());
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            r#""super_admin""#
        );
        let role: Role = serde_json::from_str(r#""accountant""#).unwrap();
        assert_eq!(role, Role::Accountant);
    }

    #[test]
    fn test_default_is_client() {
        assert_eq!(Role::default(), Role::Client);
    }

    #[test]
    fn test_scope_classification() {
        assert!(Role::SuperAdmin.spans_all_branches());
        assert!(Role::Owner.spans_all_branches());
        assert!(!Role::Manager.spans_all_branches());

        assert!(Role::Manager.is_branch_bound());
        assert!(Role::Mechanic.is_branch_bound());
        assert!(!Role::Accountant.is_branch_bound());
        assert!(!Role::Client.is_branch_bound());
    }
}

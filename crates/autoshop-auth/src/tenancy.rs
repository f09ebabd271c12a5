//! Tenant and branch scoping.
//!
//! The guards reject principals that cannot be scoped. The filter functions
//! are pure: they merge the principal's own organization and branch into a
//! caller-supplied [`QueryFilter`], overriding whatever the caller put there
//! for those two fields.

use autoshop_core::filter::{BRANCH_ID, ORGANIZATION_ID};
use autoshop_core::{AppError, QueryFilter, Role};

use crate::principal::Principal;

pub fn require_tenant(principal: Option<&Principal>) -> Result<(), AppError> {
    let Some(principal) = principal else {
        return Err(AppError::forbidden("Authentication required"));
    };

    if principal.role.is_super_admin() || principal.organization_id.is_some() {
        Ok(())
    } else {
        Err(AppError::forbidden("User is not assigned to an organization"))
    }
}

pub fn require_branch(principal: Option<&Principal>) -> Result<(), AppError> {
    let Some(principal) = principal else {
        return Err(AppError::forbidden("Authentication required"));
    };

    if principal.role.is_branch_bound() && principal.branch_id.is_none() {
        Err(AppError::forbidden("User is not assigned to a branch"))
    } else {
        Ok(())
    }
}

/// Confines `base` to the principal's organization. Super admins see all.
pub fn tenant_filter(principal: &Principal, base: QueryFilter) -> QueryFilter {
    if principal.role == Role::SuperAdmin {
        return base;
    }

    match principal.organization_id {
        Some(org) => base.with(ORGANIZATION_ID, org.to_string()),
        // Unscoped non-admins must never see tenant rows. A null constraint
        // matches only documents whose organization_id is an explicit null.
        None => base.with(ORGANIZATION_ID, serde_json::Value::Null),
    }
}

/// Confines `base` to the principal's branch for branch-bound roles.
pub fn branch_filter(principal: &Principal, base: QueryFilter) -> QueryFilter {
    if !principal.role.is_branch_bound() {
        return base;
    }

    match principal.branch_id {
        Some(branch) => base.with(BRANCH_ID, branch.to_string()),
        None => base,
    }
}

pub fn combined_filter(principal: &Principal, base: QueryFilter) -> QueryFilter {
    branch_filter(principal, tenant_filter(principal, base))
}

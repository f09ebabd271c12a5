use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use autoshop_auth::Principal;
use autoshop_core::AppError;
use autoshop_models::{Branch, CreateBranchDto, OrganizationId};

use crate::state::AppState;

pub struct BranchService;

impl BranchService {
    /// Super admins name the organization; everyone else works in their own.
    fn target_organization(
        principal: &Principal,
        requested: Option<Uuid>,
    ) -> Result<OrganizationId, AppError> {
        let id = if principal.is_super_admin() {
            requested
        } else {
            principal.organization_id
        };

        id.map(OrganizationId::from_uuid)
            .ok_or_else(|| AppError::bad_request(anyhow!("organization_id is required")))
    }

    #[instrument(skip(state))]
    pub async fn create(
        state: &AppState,
        principal: &Principal,
        dto: CreateBranchDto,
    ) -> Result<Branch, AppError> {
        let organization_id =
            Self::target_organization(principal, dto.organization_id.map(OrganizationId::into_inner))?;

        if state.organizations.find_by_id(organization_id).await?.is_none() {
            return Err(AppError::not_found(anyhow!("Organization not found")));
        }

        let branch = state
            .organizations
            .create_branch(organization_id, dto)
            .await?;
        info!(branch_id = %branch.id, organization_id = %organization_id, "Branch created");
        Ok(branch)
    }

    #[instrument(skip(state))]
    pub async fn list(
        state: &AppState,
        principal: &Principal,
        organization_id: Option<Uuid>,
    ) -> Result<Vec<Branch>, AppError> {
        let organization_id = Self::target_organization(principal, organization_id)?;
        state.organizations.list_branches(organization_id).await
    }
}

#[cfg(test)]
mod tests {
    use autoshop_core::Role;

    use super::*;

    fn principal(role: Role, org: Option<Uuid>) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            email: "p@shop.test".to_string(),
            role,
            organization_id: org,
            branch_id: None,
            permissions: vec![],
        }
    }

    #[test]
    fn test_staff_always_target_own_organization() {
        let own = Uuid::new_v4();
        let other = Uuid::new_v4();
        let target =
            BranchService::target_organization(&principal(Role::Owner, Some(own)), Some(other))
                .unwrap();
        assert_eq!(target.into_inner(), own);
    }

    #[test]
    fn test_super_admin_must_name_organization() {
        let admin = principal(Role::SuperAdmin, None);
        let err = BranchService::target_organization(&admin, None).unwrap_err();
        assert_eq!(err.status.as_u16(), 400);

        let org = Uuid::new_v4();
        let target = BranchService::target_organization(&admin, Some(org)).unwrap();
        assert_eq!(target.into_inner(), org);
    }
}

use anyhow::anyhow;
use tracing::{info, instrument};

use autoshop_auth::Principal;
use autoshop_core::AppError;
use autoshop_models::{
    CreateOrganizationDto, Organization, OrganizationId, OrganizationWithBranches,
    UpdateOrganizationDto,
};

use crate::state::AppState;

pub struct OrganizationService;

impl OrganizationService {
    #[instrument(skip(state))]
    pub async fn create(
        state: &AppState,
        dto: CreateOrganizationDto,
    ) -> Result<Organization, AppError> {
        let organization = state.organizations.create(dto).await?;
        info!(organization_id = %organization.id, "Organization created");
        Ok(organization)
    }

    #[instrument(skip(state))]
    pub async fn list(state: &AppState) -> Result<Vec<Organization>, AppError> {
        state.organizations.list().await
    }

    /// The caller's own organization with its branches.
    #[instrument(skip(state))]
    pub async fn current(
        state: &AppState,
        principal: &Principal,
    ) -> Result<OrganizationWithBranches, AppError> {
        let id = principal
            .organization_id
            .map(OrganizationId::from_uuid)
            .ok_or_else(|| AppError::not_found(anyhow!("No organization assigned")))?;

        let organization = state
            .organizations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Organization not found")))?;
        let branches = state.organizations.list_branches(id).await?;

        Ok(OrganizationWithBranches {
            organization,
            branches,
        })
    }

    /// Owners may edit their own organization; only super admins may touch
    /// other organizations or the active flag.
    #[instrument(skip(state))]
    pub async fn update(
        state: &AppState,
        principal: &Principal,
        id: OrganizationId,
        dto: UpdateOrganizationDto,
    ) -> Result<Organization, AppError> {
        if !principal.is_super_admin() {
            if principal.organization_id != Some(id.into_inner()) {
                return Err(AppError::not_found(anyhow!("Organization not found")));
            }
            if dto.is_active.is_some() {
                return Err(AppError::forbidden(
                    "Only super admins can change organization status",
                ));
            }
        }

        let organization = state
            .organizations
            .update(id, dto)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Organization not found")))?;

        info!(organization_id = %organization.id, "Organization updated");
        Ok(organization)
    }
}

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use autoshop_core::AppError;
use autoshop_models::{
    CreateOrganizationDto, Organization, OrganizationId, OrganizationWithBranches,
    UpdateOrganizationDto,
};

use crate::middleware::auth::{AuthUser, RequireOrganizationsUpdate};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::OrganizationService;

#[utoipa::path(
    post,
    path = "/api/organizations",
    request_body = CreateOrganizationDto,
    responses(
        (status = 201, description = "Organization created", body = Organization),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Super admin only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Organizations",
    security(("bearer_auth" = []))
)]
pub async fn create_organization(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateOrganizationDto>,
) -> Result<(StatusCode, Json<Organization>), AppError> {
    let organization = OrganizationService::create(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(organization)))
}

#[utoipa::path(
    get,
    path = "/api/organizations",
    responses(
        (status = 200, description = "All organizations", body = Vec<Organization>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Super admin only", body = ErrorResponse)
    ),
    tag = "Organizations",
    security(("bearer_auth" = []))
)]
pub async fn list_organizations(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Organization>>, AppError> {
    Ok(Json(OrganizationService::list(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/organizations/current",
    responses(
        (status = 200, description = "Caller's organization and branches", body = OrganizationWithBranches),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not assigned to an organization", body = ErrorResponse),
        (status = 404, description = "Organization not found", body = ErrorResponse)
    ),
    tag = "Organizations",
    security(("bearer_auth" = []))
)]
pub async fn get_current_organization(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<OrganizationWithBranches>, AppError> {
    Ok(Json(OrganizationService::current(&state, &principal).await?))
}

#[utoipa::path(
    patch,
    path = "/api/organizations/{id}",
    params(("id" = OrganizationId, Path, description = "Organization ID")),
    request_body = UpdateOrganizationDto,
    responses(
        (status = 200, description = "Organization updated", body = Organization),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Organization not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Organizations",
    security(("bearer_auth" = []))
)]
pub async fn update_organization(
    State(state): State<AppState>,
    RequireOrganizationsUpdate(principal): RequireOrganizationsUpdate,
    Path(id): Path<OrganizationId>,
    ValidatedJson(dto): ValidatedJson<UpdateOrganizationDto>,
) -> Result<Json<Organization>, AppError> {
    let organization = OrganizationService::update(&state, &principal, id, dto).await?;
    Ok(Json(organization))
}

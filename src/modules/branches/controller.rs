use axum::Json;
use axum::extract::{Query, State, rejection::QueryRejection};
use axum::http::StatusCode;

use autoshop_core::AppError;
use autoshop_models::{Branch, CreateBranchDto};

use crate::middleware::auth::{RequireBranchesCreate, RequireBranchesRead};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::BranchQueryParams;
use super::service::BranchService;

#[utoipa::path(
    post,
    path = "/api/branches",
    request_body = CreateBranchDto,
    responses(
        (status = 201, description = "Branch created", body = Branch),
        (status = 400, description = "organization_id missing for super admin", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Organization not found", body = ErrorResponse)
    ),
    tag = "Branches",
    security(("bearer_auth" = []))
)]
pub async fn create_branch(
    State(state): State<AppState>,
    RequireBranchesCreate(principal): RequireBranchesCreate,
    ValidatedJson(dto): ValidatedJson<CreateBranchDto>,
) -> Result<(StatusCode, Json<Branch>), AppError> {
    let branch = BranchService::create(&state, &principal, dto).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

#[utoipa::path(
    get,
    path = "/api/branches",
    params(BranchQueryParams),
    responses(
        (status = 200, description = "Branches of the organization", body = Vec<Branch>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Branches",
    security(("bearer_auth" = []))
)]
pub async fn list_branches(
    State(state): State<AppState>,
    RequireBranchesRead(principal): RequireBranchesRead,
    query: Result<Query<BranchQueryParams>, QueryRejection>,
) -> Result<Json<Vec<Branch>>, AppError> {
    let Query(query) = query
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    let branches = BranchService::list(&state, &principal, query.organization_id).await?;
    Ok(Json(branches))
}

use axum::Json;
use axum::extract::{Path, Query, State, rejection::QueryRejection};
use axum::http::StatusCode;

use autoshop_core::{AppError, PaginationParams};
use autoshop_models::{
    Client, ClientFilterParams, ClientId, CreateClientDto, PaginatedClientsResponse,
    UpdateClientDto,
};

use crate::middleware::auth::{
    RequireClientsCreate, RequireClientsDelete, RequireClientsRead, RequireClientsUpdate,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ClientService;

fn invalid_query(e: QueryRejection) -> AppError {
    AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientDto,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "organization_id missing for super admin", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Organization or branch not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn create_client(
    State(state): State<AppState>,
    RequireClientsCreate(principal): RequireClientsCreate,
    ValidatedJson(dto): ValidatedJson<CreateClientDto>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    let client = ClientService::create(&state, &principal, dto).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    get,
    path = "/api/clients",
    params(ClientFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Clients visible to the caller", body = PaginatedClientsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn list_clients(
    State(state): State<AppState>,
    RequireClientsRead(principal): RequireClientsRead,
    filters: Result<Query<ClientFilterParams>, QueryRejection>,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<PaginatedClientsResponse>, AppError> {
    let Query(filters) = filters.map_err(invalid_query)?;
    let Query(pagination) = pagination.map_err(invalid_query)?;
    let clients = ClientService::list(&state, &principal, filters, pagination).await?;
    Ok(Json(clients))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(("id" = ClientId, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client", body = Client),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Client not found", body = ErrorResponse)
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn get_client(
    State(state): State<AppState>,
    RequireClientsRead(principal): RequireClientsRead,
    Path(id): Path<ClientId>,
) -> Result<Json<Client>, AppError> {
    Ok(Json(ClientService::get(&state, &principal, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/clients/{id}",
    params(("id" = ClientId, Path, description = "Client ID")),
    request_body = UpdateClientDto,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn update_client(
    State(state): State<AppState>,
    RequireClientsUpdate(principal): RequireClientsUpdate,
    Path(id): Path<ClientId>,
    ValidatedJson(dto): ValidatedJson<UpdateClientDto>,
) -> Result<Json<Client>, AppError> {
    Ok(Json(ClientService::update(&state, &principal, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(("id" = ClientId, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 409, description = "Client still has cars", body = ErrorResponse)
    ),
    tag = "Clients",
    security(("bearer_auth" = []))
)]
pub async fn delete_client(
    State(state): State<AppState>,
    RequireClientsDelete(principal): RequireClientsDelete,
    Path(id): Path<ClientId>,
) -> Result<StatusCode, AppError> {
    ClientService::delete(&state, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

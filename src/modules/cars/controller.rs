use axum::Json;
use axum::extract::{Path, Query, State, rejection::QueryRejection};
use axum::http::StatusCode;

use autoshop_core::{AppError, PaginationParams};
use autoshop_models::{Car, CarFilterParams, CarId, CreateCarDto, PaginatedCarsResponse};

use crate::middleware::auth::{RequireCarsCreate, RequireCarsDelete, RequireCarsRead};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::CarService;

#[utoipa::path(
    post,
    path = "/api/cars",
    request_body = CreateCarDto,
    responses(
        (status = 201, description = "Car created", body = Car),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Client not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
pub async fn create_car(
    State(state): State<AppState>,
    RequireCarsCreate(principal): RequireCarsCreate,
    ValidatedJson(dto): ValidatedJson<CreateCarDto>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let car = CarService::create(&state, &principal, dto).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

#[utoipa::path(
    get,
    path = "/api/cars",
    params(CarFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Cars visible to the caller", body = PaginatedCarsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
pub async fn list_cars(
    State(state): State<AppState>,
    RequireCarsRead(principal): RequireCarsRead,
    filters: Result<Query<CarFilterParams>, QueryRejection>,
    pagination: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<PaginatedCarsResponse>, AppError> {
    let invalid = |e: QueryRejection| {
        AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e))
    };
    let Query(filters) = filters.map_err(invalid)?;
    let Query(pagination) = pagination.map_err(invalid)?;
    Ok(Json(CarService::list(&state, &principal, filters, pagination).await?))
}

#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    params(("id" = CarId, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Car", body = Car),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Car not found", body = ErrorResponse)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
pub async fn get_car(
    State(state): State<AppState>,
    RequireCarsRead(principal): RequireCarsRead,
    Path(id): Path<CarId>,
) -> Result<Json<Car>, AppError> {
    Ok(Json(CarService::get(&state, &principal, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    params(("id" = CarId, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Car not found", body = ErrorResponse)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
pub async fn delete_car(
    State(state): State<AppState>,
    RequireCarsDelete(principal): RequireCarsDelete,
    Path(id): Path<CarId>,
) -> Result<StatusCode, AppError> {
    CarService::delete(&state, &principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use anyhow::anyhow;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use autoshop_auth::{Principal, combined_filter};
use autoshop_core::{AppError, PaginationParams, QueryFilter, Role};
use autoshop_db::documents::{
    count_documents, delete_document, find_document, find_documents, insert_document,
};
use autoshop_models::{
    Car, CarFilterParams, CarId, Client, CreateCarDto, PaginatedCarsResponse,
};

use crate::modules::auth::service::normalize_email;
use crate::modules::clients::service::ClientService;
use crate::state::AppState;

pub struct CarService;

impl CarService {
    /// Scoped filter for car queries, or `None` when the caller can see no
    /// cars at all.
    ///
    /// Client accounts only see cars of the client record carrying their own
    /// email address.
    async fn visible(
        state: &AppState,
        principal: &Principal,
        base: QueryFilter,
    ) -> Result<Option<QueryFilter>, AppError> {
        let filter = combined_filter(principal, base);
        if principal.role != Role::Client {
            return Ok(Some(filter));
        }

        let own = combined_filter(
            principal,
            QueryFilter::new().with("email", normalize_email(&principal.email)),
        );
        let Some(client) = find_document::<Client>(state.documents.as_ref(), &own).await? else {
            return Ok(None);
        };

        let client_id = client.id.to_string();
        if filter.get("client_id").is_some_and(|v| v.as_str() != Some(client_id.as_str())) {
            return Ok(None);
        }
        Ok(Some(filter.with("client_id", client_id)))
    }

    #[instrument(skip(state))]
    pub async fn create(
        state: &AppState,
        principal: &Principal,
        dto: CreateCarDto,
    ) -> Result<Car, AppError> {
        // The owning client must be visible to the caller; the car inherits
        // its scope.
        let client = ClientService::get(state, principal, dto.client_id).await?;

        let now = Utc::now();
        let car = Car {
            id: CarId::new(),
            organization_id: client.organization_id,
            branch_id: client.branch_id,
            client_id: client.id,
            make: dto.make,
            model: dto.model,
            year: dto.year,
            vin: dto.vin.map(|vin| vin.to_uppercase()),
            license_plate: dto.license_plate,
            color: dto.color,
            mileage: dto.mileage,
            created_at: now,
            updated_at: now,
        };

        insert_document(state.documents.as_ref(), &car).await?;
        info!(car_id = %car.id, client_id = %car.client_id, "Car created");
        Ok(car)
    }

    #[instrument(skip(state))]
    pub async fn list(
        state: &AppState,
        principal: &Principal,
        filters: CarFilterParams,
        pagination: PaginationParams,
    ) -> Result<PaginatedCarsResponse, AppError> {
        let mut base = QueryFilter::new();
        if let Some(client_id) = filters.client_id {
            base.insert("client_id", client_id.to_string());
        }

        let Some(filter) = Self::visible(state, principal, base).await? else {
            return Ok(PaginatedCarsResponse {
                data: Vec::new(),
                meta: pagination.meta(0),
            });
        };

        let documents = state.documents.as_ref();
        let total = count_documents::<Car>(documents, &filter).await?;
        let data =
            find_documents::<Car>(documents, &filter, pagination.limit(), pagination.offset())
                .await?;

        Ok(PaginatedCarsResponse {
            data,
            meta: pagination.meta(total),
        })
    }

    #[instrument(skip(state))]
    pub async fn get(state: &AppState, principal: &Principal, id: CarId) -> Result<Car, AppError> {
        let base = QueryFilter::new().with("id", id.to_string());
        let car = match Self::visible(state, principal, base).await? {
            Some(filter) => find_document::<Car>(state.documents.as_ref(), &filter).await?,
            None => None,
        };
        car.ok_or_else(|| AppError::not_found(anyhow!("Car not found")))
    }

    #[instrument(skip(state))]
    pub async fn delete(state: &AppState, principal: &Principal, id: CarId) -> Result<(), AppError> {
        let filter = combined_filter(principal, QueryFilter::new());
        if !delete_document::<Car>(state.documents.as_ref(), Uuid::from(id), &filter).await? {
            return Err(AppError::not_found(anyhow!("Car not found")));
        }

        info!(car_id = %id, "Car deleted");
        Ok(())
    }
}

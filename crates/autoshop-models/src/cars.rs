//! Customer vehicles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use autoshop_core::PaginationMeta;

use crate::documents::Document;
use crate::ids::{BranchId, CarId, ClientId, OrganizationId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Car {
    pub id: CarId,
    pub organization_id: OrganizationId,
    pub branch_id: Option<BranchId>,
    pub client_id: ClientId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub color: Option<String>,
    pub mileage: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Car {
    const COLLECTION: &'static str = "cars";

    fn document_id(&self) -> Uuid {
        self.id.into_inner()
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCarDto {
    /// Must be a client visible to the caller.
    pub client_id: ClientId,
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "Toyota")]
    pub make: String,
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "Corolla")]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(length(equal = 17))]
    pub vin: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub license_plate: Option<String>,
    #[validate(length(max = 30))]
    pub color: Option<String>,
    #[validate(range(min = 0))]
    pub mileage: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarFilterParams {
    #[serde(default, deserialize_with = "autoshop_core::serde::deserialize_optional_uuid")]
    pub client_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCarsResponse {
    pub data: Vec<Car>,
    pub meta: PaginationMeta,
}

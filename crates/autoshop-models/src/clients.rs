//! Shop customers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use autoshop_core::PaginationMeta;

use crate::documents::Document;
use crate::ids::{BranchId, ClientId, OrganizationId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Client {
    pub id: ClientId,
    pub organization_id: OrganizationId,
    pub branch_id: Option<BranchId>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Client {
    const COLLECTION: &'static str = "clients";

    fn document_id(&self) -> Uuid {
        self.id.into_inner()
    }
}

impl Client {
    pub fn apply(&mut self, update: UpdateClientDto) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if update.email.is_some() {
            self.email = update.email;
        }
        if update.phone.is_some() {
            self.phone = update.phone;
        }
        if update.address.is_some() {
            self.address = update.address;
        }
        if update.notes.is_some() {
            self.notes = update.notes;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClientDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    /// Only honoured for super admins, who have no organization of their own.
    pub organization_id: Option<OrganizationId>,
    /// Ignored for branch-bound staff, who always write to their own branch.
    pub branch_id: Option<BranchId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClientDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientFilterParams {
    pub email: Option<String>,
    #[serde(default, deserialize_with = "autoshop_core::serde::deserialize_optional_uuid")]
    pub branch_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedClientsResponse {
    pub data: Vec<Client>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_update_keeps_untouched_fields() {
        let now = Utc::now();
        let mut client = Client {
            id: ClientId::new(),
            organization_id: OrganizationId::new(),
            branch_id: None,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Some("ada@example.test".to_string()),
            phone: None,
            address: None,
            notes: None,
            created_by: UserId::new(),
            created_at: now,
            updated_at: now,
        };

        client.apply(UpdateClientDto {
            phone: Some("+1 555 0100".to_string()),
            ..Default::default()
        });

        assert_eq!(client.first_name, "Ada");
        assert_eq!(client.email.as_deref(), Some("ada@example.test"));
        assert_eq!(client.phone.as_deref(), Some("+1 555 0100"));
    }

    #[test]
    fn test_serialized_document_exposes_scope_fields() {
        let now = Utc::now();
        let org = OrganizationId::new();
        let client = Client {
            id: ClientId::new(),
            organization_id: org,
            branch_id: None,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: None,
            phone: None,
            address: None,
            notes: None,
            created_by: UserId::new(),
            created_at: now,
            updated_at: now,
        };

        let doc = serde_json::to_value(&client).unwrap();
        assert_eq!(doc["organization_id"], org.to_string());
        assert!(doc["branch_id"].is_null());
    }
}

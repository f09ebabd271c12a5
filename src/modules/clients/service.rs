use anyhow::anyhow;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use autoshop_auth::{Principal, combined_filter};
use autoshop_core::filter::BRANCH_ID;
use autoshop_core::{AppError, PaginationParams, QueryFilter};
use autoshop_db::documents::{
    count_documents, delete_document, find_document, find_documents, insert_document,
    replace_document,
};
use autoshop_models::{
    BranchId, Car, Client, ClientFilterParams, ClientId, CreateClientDto, OrganizationId,
    PaginatedClientsResponse, UpdateClientDto, UserId,
};

use crate::modules::auth::service::normalize_email;
use crate::state::AppState;

pub struct ClientService;

impl ClientService {
    /// Organization and branch a new client is stamped with.
    ///
    /// Branch-bound staff always write to their own branch. Others may name a
    /// branch, which must belong to the target organization.
    #[instrument(skip(state))]
    async fn write_scope(
        state: &AppState,
        principal: &Principal,
        organization_id: Option<OrganizationId>,
        branch_id: Option<BranchId>,
    ) -> Result<(OrganizationId, Option<BranchId>), AppError> {
        let organization_id = if principal.is_super_admin() {
            let id = organization_id
                .ok_or_else(|| AppError::bad_request(anyhow!("organization_id is required")))?;
            if state.organizations.find_by_id(id).await?.is_none() {
                return Err(AppError::not_found(anyhow!("Organization not found")));
            }
            id
        } else {
            principal
                .organization_id
                .map(OrganizationId::from_uuid)
                .ok_or_else(|| AppError::forbidden("User is not assigned to an organization"))?
        };

        if principal.role.is_branch_bound() {
            return Ok((organization_id, principal.branch_id.map(BranchId::from_uuid)));
        }

        if let Some(branch_id) = branch_id {
            match state.organizations.find_branch(branch_id).await? {
                Some(branch) if branch.organization_id == organization_id => {}
                _ => return Err(AppError::not_found(anyhow!("Branch not found"))),
            }
        }

        Ok((organization_id, branch_id))
    }

    fn by_id(principal: &Principal, id: ClientId) -> QueryFilter {
        combined_filter(principal, QueryFilter::new().with("id", id.to_string()))
    }

    #[instrument(skip(state))]
    pub async fn create(
        state: &AppState,
        principal: &Principal,
        dto: CreateClientDto,
    ) -> Result<Client, AppError> {
        let (organization_id, branch_id) =
            Self::write_scope(state, principal, dto.organization_id, dto.branch_id).await?;

        let now = Utc::now();
        let client = Client {
            id: ClientId::new(),
            organization_id,
            branch_id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email.as_deref().map(normalize_email),
            phone: dto.phone,
            address: dto.address,
            notes: dto.notes,
            created_by: UserId::from_uuid(principal.user_id),
            created_at: now,
            updated_at: now,
        };

        insert_document(state.documents.as_ref(), &client).await?;
        info!(client_id = %client.id, organization_id = %organization_id, "Client created");
        Ok(client)
    }

    #[instrument(skip(state))]
    pub async fn list(
        state: &AppState,
        principal: &Principal,
        filters: ClientFilterParams,
        pagination: PaginationParams,
    ) -> Result<PaginatedClientsResponse, AppError> {
        let mut base = QueryFilter::new();
        if let Some(email) = filters.email.as_deref() {
            base.insert("email", normalize_email(email));
        }
        if let Some(branch_id) = filters.branch_id {
            base.insert(BRANCH_ID, branch_id.to_string());
        }
        let filter = combined_filter(principal, base);

        let documents = state.documents.as_ref();
        let total = count_documents::<Client>(documents, &filter).await?;
        let data = find_documents::<Client>(
            documents,
            &filter,
            pagination.limit(),
            pagination.offset(),
        )
        .await?;

        Ok(PaginatedClientsResponse {
            data,
            meta: pagination.meta(total),
        })
    }

    #[instrument(skip(state))]
    pub async fn get(
        state: &AppState,
        principal: &Principal,
        id: ClientId,
    ) -> Result<Client, AppError> {
        find_document::<Client>(state.documents.as_ref(), &Self::by_id(principal, id))
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Client not found")))
    }

    #[instrument(skip(state))]
    pub async fn update(
        state: &AppState,
        principal: &Principal,
        id: ClientId,
        dto: UpdateClientDto,
    ) -> Result<Client, AppError> {
        let mut client = Self::get(state, principal, id).await?;

        let dto = UpdateClientDto {
            email: dto.email.as_deref().map(normalize_email),
            ..dto
        };
        client.apply(dto);

        let replaced =
            replace_document(state.documents.as_ref(), &Self::by_id(principal, id), &client)
                .await?;
        if !replaced {
            return Err(AppError::not_found(anyhow!("Client not found")));
        }

        Ok(client)
    }

    /// Clients that still own cars cannot be deleted.
    #[instrument(skip(state))]
    pub async fn delete(
        state: &AppState,
        principal: &Principal,
        id: ClientId,
    ) -> Result<(), AppError> {
        let documents = state.documents.as_ref();
        let filter = Self::by_id(principal, id);

        if find_document::<Client>(documents, &filter).await?.is_none() {
            return Err(AppError::not_found(anyhow!("Client not found")));
        }

        let cars = count_documents::<Car>(
            documents,
            &QueryFilter::new().with("client_id", id.to_string()),
        )
        .await?;
        if cars > 0 {
            return Err(AppError::conflict(anyhow!(
                "Client still has {} car(s) on file",
                cars
            )));
        }

        if !delete_document::<Client>(documents, Uuid::from(id), &filter).await? {
            return Err(AppError::not_found(anyhow!("Client not found")));
        }

        info!(client_id = %id, "Client deleted");
        Ok(())
    }
}

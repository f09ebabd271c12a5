use async_trait::async_trait;
use sqlx::PgPool;

use autoshop_core::AppError;
use autoshop_models::{
    Branch, BranchId, CreateBranchDto, CreateOrganizationDto, Organization, OrganizationId,
    UpdateOrganizationDto,
};

use crate::repositories::OrganizationRepository;

const ORGANIZATION_COLUMNS: &str =
    "id, name, email, phone, address, is_active, created_at, updated_at";
const BRANCH_COLUMNS: &str =
    "id, organization_id, name, address, phone, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for PgOrganizationRepository {
    async fn create(&self, dto: CreateOrganizationDto) -> Result<Organization, AppError> {
        let sql = format!(
            "INSERT INTO organizations (id, name, email, phone, address) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {ORGANIZATION_COLUMNS}"
        );
        let organization = sqlx::query_as::<_, Organization>(&sql)
            .bind(OrganizationId::new())
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.address)
            .fetch_one(&self.pool)
            .await?;
        Ok(organization)
    }

    async fn find_by_id(&self, id: OrganizationId) -> Result<Option<Organization>, AppError> {
        let sql = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations WHERE id = $1");
        let organization = sqlx::query_as::<_, Organization>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(organization)
    }

    async fn list(&self) -> Result<Vec<Organization>, AppError> {
        let sql = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations ORDER BY name");
        let organizations = sqlx::query_as::<_, Organization>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(organizations)
    }

    async fn update(
        &self,
        id: OrganizationId,
        dto: UpdateOrganizationDto,
    ) -> Result<Option<Organization>, AppError> {
        let sql = format!(
            "UPDATE organizations SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                phone = COALESCE($4, phone), \
                address = COALESCE($5, address), \
                is_active = COALESCE($6, is_active), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {ORGANIZATION_COLUMNS}"
        );
        let organization = sqlx::query_as::<_, Organization>(&sql)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.address)
            .bind(dto.is_active)
            .fetch_optional(&self.pool)
            .await?;
        Ok(organization)
    }

    async fn create_branch(
        &self,
        organization_id: OrganizationId,
        dto: CreateBranchDto,
    ) -> Result<Branch, AppError> {
        let sql = format!(
            "INSERT INTO branches (id, organization_id, name, address, phone) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {BRANCH_COLUMNS}"
        );
        let branch = sqlx::query_as::<_, Branch>(&sql)
            .bind(BranchId::new())
            .bind(organization_id)
            .bind(&dto.name)
            .bind(&dto.address)
            .bind(&dto.phone)
            .fetch_one(&self.pool)
            .await?;
        Ok(branch)
    }

    async fn find_branch(&self, id: BranchId) -> Result<Option<Branch>, AppError> {
        let sql = format!("SELECT {BRANCH_COLUMNS} FROM branches WHERE id = $1");
        let branch = sqlx::query_as::<_, Branch>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(branch)
    }

    async fn list_branches(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Branch>, AppError> {
        let sql = format!(
            "SELECT {BRANCH_COLUMNS} FROM branches WHERE organization_id = $1 ORDER BY name"
        );
        let branches = sqlx::query_as::<_, Branch>(&sql)
            .bind(organization_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(branches)
    }
}

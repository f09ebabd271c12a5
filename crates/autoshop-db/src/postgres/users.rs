use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;

use autoshop_core::password::DEFAULT_COST;
use autoshop_core::{AppError, hash_password_with_cost};
use autoshop_models::{NewUser, UserId, UserRecord};

use crate::repositories::UserRepository;

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone, role, \
     organization_id, branch_id, permissions, refresh_tokens, is_active, last_login_at, \
     created_at, updated_at";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    hash_cost: u32,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            hash_cost: DEFAULT_COST,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, AppError> {
        let password_hash = hash_password_with_cost(&new_user.password, self.hash_cost)?;
        let sql = format!(
            "INSERT INTO users (id, email, password_hash, first_name, last_name, phone, role, \
             organization_id, branch_id, permissions) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(UserId::new())
            .bind(&new_user.email)
            .bind(&password_hash)
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(&new_user.phone)
            .bind(new_user.role.as_str())
            .bind(new_user.organization_id)
            .bind(new_user.branch_id)
            .bind(&new_user.permissions)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::conflict(anyhow!("User with this email already exists"))
                }
                other => AppError::database(other),
            })
    }

    async fn update_last_login(&self, id: UserId) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_refresh_token(&self, id: UserId, digest: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET refresh_tokens = array_append(refresh_tokens, $2), \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(digest)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_refresh_token(&self, id: UserId, digest: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users SET refresh_tokens = array_remove(refresh_tokens, $2), \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(digest)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear_refresh_tokens(&self, id: UserId) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET refresh_tokens = '{}', updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: UserId,
        old: &str,
        new: &str,
    ) -> Result<bool, AppError> {
        // Row lock plus the membership predicate make this a compare-and-swap.
        let result = sqlx::query(
            "UPDATE users \
             SET refresh_tokens = array_append(array_remove(refresh_tokens, $2), $3), \
                 updated_at = NOW() \
             WHERE id = $1 AND $2 = ANY(refresh_tokens)",
        )
        .bind(id)
        .bind(old)
        .bind(new)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

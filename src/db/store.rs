use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::db::models::{User, UserUpdate, ACTIVE};
use crate::error::AppError;

const USER_COLUMNS: &str = "user_id, user_name, first_name, last_name, email_address, \
     mobile_number, password_hash, gender, is_active, created_on, updated_on";

/// Narrow interface over the user record store. The auth core only reads;
/// the user-management handlers also write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Lookup for credential verification; filters on active records.
    async fn find_active_by_username(&self, user_name: &str) -> Result<Option<User>, AppError>;

    /// Lookup for the refresh path; deliberately unfiltered so token renewal
    /// follows the record wherever it currently stands.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, AppError>;

    async fn find_active_by_user_id(&self, user_id: &str) -> Result<Option<User>, AppError>;

    async fn username_exists(&self, user_name: &str) -> Result<bool, AppError>;

    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    async fn list_active(&self) -> Result<Vec<User>, AppError>;

    /// Returns the number of matched rows; zero means no such user.
    async fn update_user(&self, user_id: &str, changes: &UserUpdate) -> Result<u64, AppError>;

    /// Returns true when a record was actually removed.
    async fn delete_user(&self, user_id: &str) -> Result<bool, AppError>;
}

pub struct PgUserStore {
    pool: Arc<PgPool>,
}

impl PgUserStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Creates the users table and the active-username uniqueness index if
    /// they are not present yet.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id       TEXT PRIMARY KEY,
                user_name     TEXT NOT NULL,
                first_name    TEXT NOT NULL,
                last_name     TEXT NOT NULL,
                email_address TEXT NOT NULL,
                mobile_number TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                gender        TEXT NOT NULL,
                is_active     INTEGER NOT NULL DEFAULT 1,
                created_on    TIMESTAMPTZ NOT NULL,
                updated_on    TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS users_active_user_name \
             ON users (user_name) WHERE is_active = 1",
        )
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_active_by_username(&self, user_name: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_name = $1 AND is_active = $2"
        ))
        .bind(user_name)
        .bind(ACTIVE)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn find_active_by_user_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1 AND is_active = $2"
        ))
        .bind(user_id)
        .bind(ACTIVE)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn username_exists(&self, user_name: &str) -> Result<bool, AppError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT user_id FROM users WHERE user_name = $1")
                .bind(user_name)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.is_some())
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, user_name, first_name, last_name, email_address,
                               mobile_number, password_hash, gender, is_active, created_on, updated_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.user_name)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email_address)
        .bind(&user.mobile_number)
        .bind(&user.password_hash)
        .bind(&user.gender)
        .bind(user.is_active)
        .bind(user.created_on)
        .bind(user.updated_on)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_active = $1 ORDER BY created_on"
        ))
        .bind(ACTIVE)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(users)
    }

    async fn update_user(&self, user_id: &str, changes: &UserUpdate) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                user_name     = COALESCE($2, user_name),
                first_name    = COALESCE($3, first_name),
                last_name     = COALESCE($4, last_name),
                email_address = COALESCE($5, email_address),
                mobile_number = COALESCE($6, mobile_number),
                gender        = COALESCE($7, gender),
                updated_on    = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(&changes.user_name)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email_address)
        .bind(&changes.mobile_number)
        .bind(&changes.gender)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::super::map_database_error;
use super::super::user_delete::UserDeleter;
use super::super::user_insert::UserInserter;
use super::super::user_read::UserReader;
use super::super::user_update::UserUpdater;
use crate::error::{AppError, AppResult};
use crate::models::{User, UserUpdate};

const USER_COLUMNS: &str = "id, username, email, password, profile_photo, created_at, updated_at";

fn row_to_user(row: &PgRow) -> AppResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        profile_photo: row.try_get("profile_photo")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// PostgreSQL-specific implementation of UserInserter
pub struct PostgresUserInserter {
    pool: PgPool,
}

impl PostgresUserInserter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserInserter for PostgresUserInserter {
    async fn execute_user_insert(&self, user: &User) -> AppResult<()> {
        let sql = format!(
            "INSERT INTO users ({}) VALUES ($1, $2, $3, $4, $5, $6, $7)",
            USER_COLUMNS
        );

        sqlx::query(&sql)
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.profile_photo)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "User"))?;

        Ok(())
    }
}

/// PostgreSQL-specific implementation of UserReader
pub struct PostgresUserReader {
    pool: PgPool,
}

impl PostgresUserReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl UserReader for PostgresUserReader {
    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.find_one("id", id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_one("email", email).await
    }
}

/// PostgreSQL-specific implementation of UserUpdater
pub struct PostgresUserUpdater {
    pool: PgPool,
}

impl PostgresUserUpdater {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserUpdater for PostgresUserUpdater {
    async fn execute_user_update(
        &self,
        id: &str,
        update: &UserUpdate,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET username = COALESCE($1, username), email = COALESCE($2, email), \
             profile_photo = COALESCE($3, profile_photo), password = COALESCE($4, password), \
             updated_at = $5 WHERE id = $6 RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(update.username.as_deref())
            .bind(update.email.as_deref())
            .bind(update.profile_photo.as_deref())
            .bind(update.password.as_deref())
            .bind(updated_at)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "User"))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

/// PostgreSQL-specific implementation of UserDeleter
pub struct PostgresUserDeleter {
    pool: PgPool,
}

impl PostgresUserDeleter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDeleter for PostgresUserDeleter {
    async fn execute_user_delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

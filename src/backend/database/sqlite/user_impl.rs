use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::super::map_database_error;
use super::super::user_delete::UserDeleter;
use super::super::user_insert::UserInserter;
use super::super::user_read::UserReader;
use super::super::user_update::UserUpdater;
use crate::error::{AppError, AppResult};
use crate::models::{User, UserUpdate};
use crate::utils::{format_timestamp, parse_timestamp};

const USER_COLUMNS: &str = "id, username, email, password, profile_photo, created_at, updated_at";

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        profile_photo: row.try_get("profile_photo")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// SQLite-specific implementation of UserInserter
pub struct SqliteUserInserter {
    pool: SqlitePool,
}

impl SqliteUserInserter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserInserter for SqliteUserInserter {
    async fn execute_user_insert(&self, user: &User) -> AppResult<()> {
        let sql = format!(
            "INSERT INTO users ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            USER_COLUMNS
        );

        sqlx::query(&sql)
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.profile_photo)
            .bind(format_timestamp(user.created_at))
            .bind(format_timestamp(user.updated_at))
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "User"))?;

        Ok(())
    }
}

/// SQLite-specific implementation of UserReader
pub struct SqliteUserReader {
    pool: SqlitePool,
}

impl SqliteUserReader {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = ?1", USER_COLUMNS, column);
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl UserReader for SqliteUserReader {
    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.find_one("id", id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find_one("email", email).await
    }
}

/// SQLite-specific implementation of UserUpdater
pub struct SqliteUserUpdater {
    pool: SqlitePool,
}

impl SqliteUserUpdater {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserUpdater for SqliteUserUpdater {
    async fn execute_user_update(
        &self,
        id: &str,
        update: &UserUpdate,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<User>> {
        // NULL parameters keep the stored column
        let sql = format!(
            "UPDATE users SET username = COALESCE(?1, username), email = COALESCE(?2, email), \
             profile_photo = COALESCE(?3, profile_photo), password = COALESCE(?4, password), \
             updated_at = ?5 WHERE id = ?6 RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(update.username.as_deref())
            .bind(update.email.as_deref())
            .bind(update.profile_photo.as_deref())
            .bind(update.password.as_deref())
            .bind(format_timestamp(updated_at))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "User"))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

/// SQLite-specific implementation of UserDeleter
pub struct SqliteUserDeleter {
    pool: SqlitePool,
}

impl SqliteUserDeleter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDeleter for SqliteUserDeleter {
    async fn execute_user_delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

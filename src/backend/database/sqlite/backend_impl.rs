use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use super::super::config::DatabaseBackendConfig;
use super::listing_impl::{
    SqliteListingDeleter, SqliteListingInserter, SqliteListingReader, SqliteListingUpdater,
};
use super::user_impl::{SqliteUserDeleter, SqliteUserInserter, SqliteUserReader, SqliteUserUpdater};
use crate::backend::database::{
    UnifiedListingDeleteOps, UnifiedListingInsertOps, UnifiedListingReadOps,
    UnifiedListingUpdateOps, UnifiedUserDeleteOps, UnifiedUserInsertOps, UnifiedUserReadOps,
    UnifiedUserUpdateOps,
};
use crate::backend::{Backend, ListingBackend, UserBackend};
use crate::error::{AppError, AppResult};
use crate::models::{Listing, ListingUpdate, NewListing, User, UserUpdate};
use crate::parser::ListingFilter;

/// SQLite database backend implementation
///
/// Used for local development and tests; `:memory:` databases live on a
/// single pooled connection that is never recycled.
pub struct SqliteBackend {
    pool: SqlitePool,
    listing_insert_ops: UnifiedListingInsertOps<SqliteListingInserter>,
    listing_read_ops: UnifiedListingReadOps<SqliteListingReader>,
    listing_update_ops: UnifiedListingUpdateOps<SqliteListingUpdater>,
    listing_delete_ops: UnifiedListingDeleteOps<SqliteListingDeleter>,
    user_insert_ops: UnifiedUserInsertOps<SqliteUserInserter>,
    user_read_ops: UnifiedUserReadOps<SqliteUserReader>,
    user_update_ops: UnifiedUserUpdateOps<SqliteUserUpdater>,
    user_delete_ops: UnifiedUserDeleteOps<SqliteUserDeleter>,
}

impl SqliteBackend {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            listing_insert_ops: UnifiedListingInsertOps::new(SqliteListingInserter::new(
                pool.clone(),
            )),
            listing_read_ops: UnifiedListingReadOps::new(SqliteListingReader::new(pool.clone())),
            listing_update_ops: UnifiedListingUpdateOps::new(SqliteListingUpdater::new(
                pool.clone(),
            )),
            listing_delete_ops: UnifiedListingDeleteOps::new(SqliteListingDeleter::new(
                pool.clone(),
            )),
            user_insert_ops: UnifiedUserInsertOps::new(SqliteUserInserter::new(pool.clone())),
            user_read_ops: UnifiedUserReadOps::new(SqliteUserReader::new(pool.clone())),
            user_update_ops: UnifiedUserUpdateOps::new(SqliteUserUpdater::new(pool.clone())),
            user_delete_ops: UnifiedUserDeleteOps::new(SqliteUserDeleter::new(pool.clone())),
            pool,
        }
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config.validate()?;

        let timeout = config.acquire_timeout;

        let pool = if config.is_memory_database() {
            // Every connection to :memory: opens a fresh database
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(timeout)
                .connect("sqlite::memory:")
                .await
        } else {
            let options = SqliteConnectOptions::from_str(&config.connection_url)
                .map_err(|e| AppError::Configuration(format!("Invalid SQLite URL: {}", e)))?
                .create_if_missing(true);

            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(timeout)
                .connect_with(options)
                .await
        }
        .map_err(|e| AppError::Database(format!("Failed to connect to SQLite: {}", e)))?;

        Ok(Self::new(pool))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Health check failed: {}", e)))?;

        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        super::schema::init_schema(&self.pool).await
    }
}

#[async_trait]
impl ListingBackend for SqliteBackend {
    async fn create_listing(&self, owner_id: &str, listing: &NewListing) -> AppResult<Listing> {
        self.listing_insert_ops.create_listing(owner_id, listing).await
    }

    async fn find_listing_by_id(&self, id: &str) -> AppResult<Option<Listing>> {
        self.listing_read_ops.find_listing_by_id(id).await
    }

    async fn find_listings(&self, filter: &ListingFilter) -> AppResult<Vec<Listing>> {
        self.listing_read_ops.find_listings(filter).await
    }

    async fn find_listings_by_user(&self, user_id: &str) -> AppResult<Vec<Listing>> {
        self.listing_read_ops.find_listings_by_user(user_id).await
    }

    async fn update_listing(
        &self,
        id: &str,
        update: &ListingUpdate,
    ) -> AppResult<Option<Listing>> {
        self.listing_update_ops.update_listing(id, update).await
    }

    async fn delete_listing(&self, id: &str) -> AppResult<bool> {
        self.listing_delete_ops.delete_listing(id).await
    }
}

#[async_trait]
impl UserBackend for SqliteBackend {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        self.user_insert_ops
            .create_user(username, email, password_hash)
            .await
    }

    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.user_read_ops.find_user_by_id(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.user_read_ops.find_user_by_email(email).await
    }

    async fn update_user(&self, id: &str, update: &UserUpdate) -> AppResult<Option<User>> {
        self.user_update_ops.update_user(id, update).await
    }

    async fn delete_user(&self, id: &str) -> AppResult<bool> {
        self.user_delete_ops.delete_user(id).await
    }
}

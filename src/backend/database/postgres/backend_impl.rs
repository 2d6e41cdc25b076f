use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::super::config::DatabaseBackendConfig;
use super::listing_impl::{
    PostgresListingDeleter, PostgresListingInserter, PostgresListingReader,
    PostgresListingUpdater,
};
use super::user_impl::{
    PostgresUserDeleter, PostgresUserInserter, PostgresUserReader, PostgresUserUpdater,
};
use crate::backend::database::{
    UnifiedListingDeleteOps, UnifiedListingInsertOps, UnifiedListingReadOps,
    UnifiedListingUpdateOps, UnifiedUserDeleteOps, UnifiedUserInsertOps, UnifiedUserReadOps,
    UnifiedUserUpdateOps,
};
use crate::backend::{Backend, ListingBackend, UserBackend};
use crate::error::{AppError, AppResult};
use crate::models::{Listing, ListingUpdate, NewListing, User, UserUpdate};
use crate::parser::ListingFilter;

/// PostgreSQL database backend implementation
///
/// Listings keep their image URLs in a native `TEXT[]` column and
/// timestamps in `TIMESTAMPTZ`.
pub struct PostgresBackend {
    pool: PgPool,
    listing_insert_ops: UnifiedListingInsertOps<PostgresListingInserter>,
    listing_read_ops: UnifiedListingReadOps<PostgresListingReader>,
    listing_update_ops: UnifiedListingUpdateOps<PostgresListingUpdater>,
    listing_delete_ops: UnifiedListingDeleteOps<PostgresListingDeleter>,
    user_insert_ops: UnifiedUserInsertOps<PostgresUserInserter>,
    user_read_ops: UnifiedUserReadOps<PostgresUserReader>,
    user_update_ops: UnifiedUserUpdateOps<PostgresUserUpdater>,
    user_delete_ops: UnifiedUserDeleteOps<PostgresUserDeleter>,
}

impl PostgresBackend {
    /// Create a new PostgreSQL backend instance
    pub fn new(pool: PgPool) -> Self {
        // Create database-specific adapters
        let listing_inserter = PostgresListingInserter::new(pool.clone());
        let listing_reader = PostgresListingReader::new(pool.clone());
        let listing_updater = PostgresListingUpdater::new(pool.clone());
        let listing_deleter = PostgresListingDeleter::new(pool.clone());
        let user_inserter = PostgresUserInserter::new(pool.clone());
        let user_reader = PostgresUserReader::new(pool.clone());
        let user_updater = PostgresUserUpdater::new(pool.clone());
        let user_deleter = PostgresUserDeleter::new(pool.clone());

        Self {
            pool,
            listing_insert_ops: UnifiedListingInsertOps::new(listing_inserter),
            listing_read_ops: UnifiedListingReadOps::new(listing_reader),
            listing_update_ops: UnifiedListingUpdateOps::new(listing_updater),
            listing_delete_ops: UnifiedListingDeleteOps::new(listing_deleter),
            user_insert_ops: UnifiedUserInsertOps::new(user_inserter),
            user_read_ops: UnifiedUserReadOps::new(user_reader),
            user_update_ops: UnifiedUserUpdateOps::new(user_updater),
            user_delete_ops: UnifiedUserDeleteOps::new(user_deleter),
        }
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.connection_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to PostgreSQL: {}", e)))?;

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
impl ListingBackend for PostgresBackend {
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
impl UserBackend for PostgresBackend {
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

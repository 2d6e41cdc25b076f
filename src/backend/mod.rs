use crate::error::AppResult;
use crate::models::{Listing, ListingUpdate, NewListing, User, UserUpdate};
use crate::parser::ListingFilter;
use async_trait::async_trait;
use std::sync::Arc;

pub mod database;

/// Supported database backend types
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseType {
    PostgreSQL,
    SQLite,
}

/// Core backend abstraction
///
/// Connection management shared by every storage implementation.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Connect to the storage backend
    async fn connect(config: &crate::backend::database::DatabaseBackendConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Check if the storage backend is healthy and accessible
    async fn health_check(&self) -> AppResult<()>;

    /// Create tables and indexes if they do not exist yet
    async fn init_schema(&self) -> AppResult<()>;
}

/// Listing storage operations
#[async_trait]
pub trait ListingBackend: Backend {
    /// Store a new listing owned by `owner_id`
    async fn create_listing(&self, owner_id: &str, listing: &NewListing) -> AppResult<Listing>;

    /// Find a listing by ID
    async fn find_listing_by_id(&self, id: &str) -> AppResult<Option<Listing>>;

    /// Search listings with a filter document, sorted and paged
    async fn find_listings(&self, filter: &ListingFilter) -> AppResult<Vec<Listing>>;

    /// All listings of one owner, newest first
    async fn find_listings_by_user(&self, user_id: &str) -> AppResult<Vec<Listing>>;

    /// Apply a partial update; `None` when the listing does not exist
    async fn update_listing(&self, id: &str, update: &ListingUpdate)
        -> AppResult<Option<Listing>>;

    /// Delete a listing, returning whether it existed
    async fn delete_listing(&self, id: &str) -> AppResult<bool>;
}

/// User account storage operations
#[async_trait]
pub trait UserBackend: Backend {
    /// Store a new account; `password_hash` must already be hashed
    async fn create_user(&self, username: &str, email: &str, password_hash: &str)
        -> AppResult<User>;

    /// Find a user by ID
    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive)
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Apply a partial update; a present password must already be hashed
    async fn update_user(&self, id: &str, update: &UserUpdate) -> AppResult<Option<User>>;

    /// Delete a user, returning whether it existed
    async fn delete_user(&self, id: &str) -> AppResult<bool>;
}

/// Combined backend interface for listings and users
pub trait EstateBackend: ListingBackend + UserBackend {}

/// Automatic implementation for any type that implements both traits
impl<T> EstateBackend for T where T: ListingBackend + UserBackend {}

/// Factory for creating backend instances
pub struct BackendFactory;

impl BackendFactory {
    /// Connect the configured backend and make sure its schema exists
    pub async fn create(
        config: &crate::backend::database::DatabaseBackendConfig,
    ) -> AppResult<Arc<dyn EstateBackend>> {
        let backend = Self::create_backend(config).await?;
        backend.init_schema().await?;
        Ok(Arc::from(backend))
    }

    /// Create a backend based on configuration (returns Box)
    pub async fn create_backend(
        config: &crate::backend::database::DatabaseBackendConfig,
    ) -> AppResult<Box<dyn EstateBackend>> {
        match config.database_type {
            DatabaseType::PostgreSQL => {
                let backend =
                    crate::backend::database::postgres::PostgresBackend::connect(config).await?;
                Ok(Box::new(backend))
            }
            DatabaseType::SQLite => {
                let backend =
                    crate::backend::database::sqlite::SqliteBackend::connect(config).await?;
                Ok(Box::new(backend))
            }
        }
    }
}

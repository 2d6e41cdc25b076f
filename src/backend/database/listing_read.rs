//! Listing read operations
//!
//! Common interfaces for listing lookups and searches that work across
//! different database backends.

use crate::error::{AppError, AppResult};
use crate::models::Listing;
use crate::parser::ListingFilter;
use async_trait::async_trait;

/// Trait for listing read operations
#[async_trait]
pub trait ListingReader: Send + Sync {
    /// Find a listing by ID
    async fn find_listing_by_id(&self, id: &str) -> AppResult<Option<Listing>>;

    /// Find listings matching a filter document
    async fn find_listings(&self, filter: &ListingFilter) -> AppResult<Vec<Listing>>;

    /// Find every listing owned by a user
    async fn find_listings_by_user(&self, user_id: &str) -> AppResult<Vec<Listing>>;
}

/// Unified listing read operations
pub struct UnifiedListingReadOps<T: ListingReader> {
    reader: T,
}

impl<T: ListingReader> UnifiedListingReadOps<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    pub async fn find_listing_by_id(&self, id: &str) -> AppResult<Option<Listing>> {
        if id.trim().is_empty() {
            return Ok(None);
        }
        self.reader.find_listing_by_id(id).await
    }

    pub async fn find_listings(&self, filter: &ListingFilter) -> AppResult<Vec<Listing>> {
        if filter.limit <= 0 || filter.start_index < 0 {
            return Err(AppError::Internal(format!(
                "Invalid page window: limit {} offset {}",
                filter.limit, filter.start_index
            )));
        }
        self.reader.find_listings(filter).await
    }

    pub async fn find_listings_by_user(&self, user_id: &str) -> AppResult<Vec<Listing>> {
        self.reader.find_listings_by_user(user_id).await
    }
}

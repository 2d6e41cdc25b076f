use async_trait::async_trait;

use crate::error::AppResult;

/// Database-specific adapter for listing DELETE operations
#[async_trait]
pub trait ListingDeleter: Send + Sync {
    /// Execute listing delete and return whether the listing was found and deleted
    async fn execute_listing_delete(&self, id: &str) -> AppResult<bool>;
}

/// Unified listing DELETE operations using the adapter pattern
pub struct UnifiedListingDeleteOps<T: ListingDeleter> {
    deleter: T,
}

impl<T: ListingDeleter> UnifiedListingDeleteOps<T> {
    pub fn new(deleter: T) -> Self {
        Self { deleter }
    }

    pub async fn delete_listing(&self, id: &str) -> AppResult<bool> {
        if id.trim().is_empty() {
            return Ok(false);
        }
        self.deleter.execute_listing_delete(id).await
    }
}

use async_trait::async_trait;

use crate::error::AppResult;

/// Database-specific adapter for user DELETE operations
#[async_trait]
pub trait UserDeleter: Send + Sync {
    /// Execute user delete and return whether the user was found and deleted
    async fn execute_user_delete(&self, id: &str) -> AppResult<bool>;
}

/// Shared business logic for user DELETE operations
pub struct UserDeleteProcessor;

impl UserDeleteProcessor {
    /// Blank IDs can never match a stored account
    pub fn is_valid_user_id(id: &str) -> bool {
        !id.trim().is_empty()
    }
}

/// Unified user DELETE operations using the adapter pattern
pub struct UnifiedUserDeleteOps<T: UserDeleter> {
    deleter: T,
}

impl<T: UserDeleter> UnifiedUserDeleteOps<T> {
    pub fn new(deleter: T) -> Self {
        Self { deleter }
    }

    pub async fn delete_user(&self, id: &str) -> AppResult<bool> {
        if !UserDeleteProcessor::is_valid_user_id(id) {
            return Ok(false);
        }
        self.deleter.execute_user_delete(id).await
    }
}

//! User read operations

use crate::error::AppResult;
use crate::models::User;
use async_trait::async_trait;

/// Trait for user read operations
#[async_trait]
pub trait UserReader: Send + Sync {
    /// Find a user by ID
    async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Find a user by normalized email
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Unified user read operations
pub struct UnifiedUserReadOps<T: UserReader> {
    reader: T,
}

impl<T: UserReader> UnifiedUserReadOps<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }

    pub async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.reader.find_user_by_id(id).await
    }

    /// Emails are stored lowercased, so the lookup key is normalized the same way
    pub async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Ok(None);
        }
        self.reader.find_user_by_email(&email).await
    }
}

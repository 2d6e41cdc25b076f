use async_trait::async_trait;
use email_address::EmailAddress;

use crate::error::{AppError, AppResult};
use crate::models::{User, DEFAULT_PROFILE_PHOTO};
use crate::utils::current_timestamp;

/// Database-specific adapter for user INSERT operations
#[async_trait]
pub trait UserInserter: Send + Sync {
    /// Persist a new account; duplicates surface as [`AppError::Conflict`]
    async fn execute_user_insert(&self, user: &User) -> AppResult<()>;
}

/// Shared business logic for user INSERT operations
pub struct UserInsertProcessor;

impl UserInsertProcessor {
    pub fn validate_username(username: &str) -> AppResult<()> {
        if username.trim().is_empty() {
            return Err(AppError::BadRequest("Username is required".to_string()));
        }
        Ok(())
    }

    /// Check the address syntax and return it trimmed and lowercased
    pub fn normalize_email(email: &str) -> AppResult<String> {
        let email = email.trim().to_lowercase();
        if !EmailAddress::is_valid(&email) {
            return Err(AppError::BadRequest(format!(
                "Invalid email address: {}",
                email
            )));
        }
        Ok(email)
    }

    pub fn prepare_user(username: &str, email: &str, password_hash: &str) -> AppResult<User> {
        Self::validate_username(username)?;
        let email = Self::normalize_email(email)?;
        if password_hash.is_empty() {
            return Err(AppError::Internal(
                "Refusing to store an account without a password hash".to_string(),
            ));
        }

        let now = current_timestamp();
        Ok(User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.trim().to_string(),
            email,
            password: password_hash.to_string(),
            profile_photo: DEFAULT_PROFILE_PHOTO.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Unified user INSERT operations using the adapter pattern
pub struct UnifiedUserInsertOps<T: UserInserter> {
    inserter: T,
}

impl<T: UserInserter> UnifiedUserInsertOps<T> {
    pub fn new(inserter: T) -> Self {
        Self { inserter }
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        let user = UserInsertProcessor::prepare_user(username, email, password_hash)?;
        self.inserter.execute_user_insert(&user).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            UserInsertProcessor::normalize_email("  Alice@Example.COM ").unwrap(),
            "alice@example.com"
        );
        assert!(UserInsertProcessor::normalize_email("not-an-email").is_err());
        assert!(UserInsertProcessor::normalize_email("").is_err());
    }

    #[test]
    fn test_prepare_user() {
        let user = UserInsertProcessor::prepare_user("alice", "alice@example.com", "$2b$hash")
            .unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.profile_photo, DEFAULT_PROFILE_PHOTO);
        assert_eq!(user.password, "$2b$hash");

        assert!(UserInsertProcessor::prepare_user(" ", "alice@example.com", "h").is_err());
        assert!(UserInsertProcessor::prepare_user("alice", "alice@example.com", "").is_err());
    }
}

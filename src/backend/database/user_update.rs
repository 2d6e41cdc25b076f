use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::user_insert::UserInsertProcessor;
use crate::error::AppResult;
use crate::models::{User, UserUpdate};
use crate::utils::current_timestamp;

/// Database-specific adapter for user UPDATE operations
#[async_trait]
pub trait UserUpdater: Send + Sync {
    /// Overwrite the present fields and return the stored result
    async fn execute_user_update(
        &self,
        id: &str,
        update: &UserUpdate,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<User>>;
}

/// Shared business logic for user UPDATE operations
pub struct UserUpdateProcessor;

impl UserUpdateProcessor {
    /// Validate present fields and normalize the email
    pub fn normalize(update: &UserUpdate) -> AppResult<UserUpdate> {
        let mut normalized = update.clone();

        if let Some(ref username) = update.username {
            UserInsertProcessor::validate_username(username)?;
            normalized.username = Some(username.trim().to_string());
        }
        if let Some(ref email) = update.email {
            normalized.email = Some(UserInsertProcessor::normalize_email(email)?);
        }

        Ok(normalized)
    }
}

/// Unified user UPDATE operations using the adapter pattern
pub struct UnifiedUserUpdateOps<T: UserUpdater> {
    updater: T,
}

impl<T: UserUpdater> UnifiedUserUpdateOps<T> {
    pub fn new(updater: T) -> Self {
        Self { updater }
    }

    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> AppResult<Option<User>> {
        let normalized = UserUpdateProcessor::normalize(update)?;
        self.updater
            .execute_user_update(id, &normalized, current_timestamp())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_absent_fields_absent() {
        let update = UserUpdate {
            email: Some(" Bob@Example.com".to_string()),
            ..Default::default()
        };
        let normalized = UserUpdateProcessor::normalize(&update).unwrap();

        assert_eq!(normalized.email.as_deref(), Some("bob@example.com"));
        assert!(normalized.username.is_none());
        assert!(normalized.password.is_none());
        assert!(normalized.profile_photo.is_none());
    }

    #[test]
    fn test_normalize_rejects_invalid_values() {
        let update = UserUpdate {
            username: Some("".to_string()),
            ..Default::default()
        };
        assert!(UserUpdateProcessor::normalize(&update).is_err());

        let update = UserUpdate {
            email: Some("bob".to_string()),
            ..Default::default()
        };
        assert!(UserUpdateProcessor::normalize(&update).is_err());
    }
}

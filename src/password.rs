//! Account password storage.
//!
//! Passwords are hashed with bcrypt. The work factor comes from
//! configuration so development and tests can run at the minimum cost.

use crate::config::PasswordConfig;
use crate::error::{AppError, AppResult};

/// bcrypt only reads this many bytes of its input
const BCRYPT_MAX_INPUT: usize = 72;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Hashes new passwords and checks sign-in attempts
#[derive(Debug, Clone, Copy)]
pub struct PasswordManager {
    cost: u32,
}

impl PasswordManager {
    pub fn new(cost: u32) -> AppResult<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AppError::Configuration(format!(
                "password.bcrypt_cost must be between {} and {}, got {}",
                MIN_COST, MAX_COST, cost
            )));
        }

        Ok(Self { cost })
    }

    pub fn from_config(config: &PasswordConfig) -> AppResult<Self> {
        Self::new(config.bcrypt_cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password for storage
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        validate_password(password)?;

        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Compare a sign-in attempt with the stored hash
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> AppResult<bool> {
        bcrypt::verify(password, stored_hash)
            .map_err(|e| AppError::Internal(format!("Stored password hash is unreadable: {}", e)))
    }
}

/// Longer input would be silently truncated by bcrypt
fn validate_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::BadRequest("Password cannot be empty".to_string()));
    }

    if password.len() > BCRYPT_MAX_INPUT {
        return Err(AppError::BadRequest(format!(
            "Password must be no more than {} bytes long",
            BCRYPT_MAX_INPUT
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> PasswordManager {
        PasswordManager::new(MIN_COST).unwrap()
    }

    #[test]
    fn test_from_default_config() {
        let pm = PasswordManager::from_config(&PasswordConfig::default()).unwrap();
        assert_eq!(pm.cost(), 10);
    }

    #[test]
    fn test_hash_is_never_plaintext() {
        let pm = fast();
        let hash = pm.hash_password("hunter2").unwrap();

        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$2b$04$"));
        assert!(pm.verify_password("hunter2", &hash).unwrap());
        assert!(!pm.verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_hashes_from_other_costs_still_verify() {
        let legacy = PasswordManager::new(5).unwrap();
        let hash = legacy.hash_password("secret").unwrap();

        assert!(fast().verify_password("secret", &hash).unwrap());
    }

    #[test]
    fn test_rejected_passwords() {
        let pm = fast();
        assert!(matches!(pm.hash_password(""), Err(AppError::BadRequest(_))));
        assert!(matches!(
            pm.hash_password(&"a".repeat(73)),
            Err(AppError::BadRequest(_))
        ));
        assert!(pm.hash_password(&"a".repeat(72)).is_ok());
    }

    #[test]
    fn test_cost_out_of_range() {
        assert!(matches!(PasswordManager::new(3), Err(AppError::Configuration(_))));
        assert!(matches!(PasswordManager::new(32), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_unreadable_stored_hash() {
        assert!(matches!(
            fast().verify_password("secret", "plaintext"),
            Err(AppError::Internal(_))
        ));
    }
}

//! Database abstraction layer for the listing service
//!
//! Operations are split per concern. Each one has a database-agnostic part
//! (validation, preparation) and a small adapter trait that every dialect
//! implements.
//!
//! # Architecture
//!
//! ```text
//! Common logic (listing_insert.rs, user_read.rs, filter.rs, ...)
//!     ↓
//! Database-specific implementations
//!     ├── postgres/ (PostgreSQL-specific code)
//!     └── sqlite/   (SQLite-specific code)
//! ```

pub mod config;
pub mod filter;
pub mod listing_delete;
pub mod listing_insert;
pub mod listing_read;
pub mod listing_update;
pub mod postgres;
pub mod sqlite;
pub mod user_delete;
pub mod user_insert;
pub mod user_read;
pub mod user_update;

use crate::error::AppError;

// Re-export key types for convenience
pub use config::DatabaseBackendConfig;
pub use filter::{FilterConverter, FilterValue, ListingSearchSql};

pub use listing_delete::UnifiedListingDeleteOps;
pub use listing_insert::UnifiedListingInsertOps;
pub use listing_read::UnifiedListingReadOps;
pub use listing_update::UnifiedListingUpdateOps;

pub use user_delete::UnifiedUserDeleteOps;
pub use user_insert::UnifiedUserInsertOps;
pub use user_read::UnifiedUserReadOps;
pub use user_update::UnifiedUserUpdateOps;

pub use postgres::PostgresBackend;
pub use sqlite::SqliteBackend;

/// Map a write failure to an application error
///
/// Unique violations become [`AppError::Conflict`]; anything else is an
/// internal storage failure.
pub fn map_database_error(error: sqlx::Error, resource_type: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = error {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            return if message.contains("username") {
                AppError::Conflict("Username already in use".to_string())
            } else if message.contains("email") {
                AppError::Conflict("Email already in use".to_string())
            } else {
                AppError::Conflict(format!("{} already exists", resource_type))
            };
        }
    }
    AppError::Database(format!("Failed to write {}: {}", resource_type, error))
}

//! SQLite dialect: TEXT timestamps, JSON text arrays and `?N` placeholders

pub mod backend_impl;
pub mod filter_impl;
pub mod listing_impl;
pub mod schema;
pub mod user_impl;

pub use backend_impl::SqliteBackend;
pub use filter_impl::SqliteFilterConverter;
pub use listing_impl::{
    SqliteListingDeleter, SqliteListingInserter, SqliteListingReader, SqliteListingUpdater,
};
pub use user_impl::{SqliteUserDeleter, SqliteUserInserter, SqliteUserReader, SqliteUserUpdater};

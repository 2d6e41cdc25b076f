//! PostgreSQL dialect: TIMESTAMPTZ, native arrays and `$N` placeholders

pub mod backend_impl;
pub mod filter_impl;
pub mod listing_impl;
pub mod schema;
pub mod user_impl;

pub use backend_impl::PostgresBackend;
pub use filter_impl::PostgresFilterConverter;
pub use listing_impl::{
    PostgresListingDeleter, PostgresListingInserter, PostgresListingReader,
    PostgresListingUpdater,
};
pub use user_impl::{
    PostgresUserDeleter, PostgresUserInserter, PostgresUserReader, PostgresUserUpdater,
};

pub mod auth;
pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod models;
pub mod parser;
pub mod password;
pub mod resource;
pub mod startup;
pub mod utils;

// Re-export commonly used types for easier access
pub use models::{Listing, User};

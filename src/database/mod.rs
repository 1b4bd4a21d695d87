//! # Database
//!
//! PostgreSQL connection management. The schema itself lives in `migrations/`.

pub mod connection;

pub use connection::DatabaseConnection;

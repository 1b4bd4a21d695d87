#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Metecho Core
//!
//! Data layer and maintenance tooling for Metecho, which tracks GitHub
//! repositories, their epics and tasks, and the Salesforce scratch orgs created
//! to work on those tasks.
//!
//! ## Module Organization
//!
//! - [`models`] - Row types and the entity catalogue with its foreign keys
//! - [`purge`] - Ordered removal of all application data, preserving users
//! - [`database`] - Connection management
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Purging Data
//!
//! ```rust,no_run
//! use metecho_core::config::MetechoConfig;
//! use metecho_core::database::DatabaseConnection;
//! use metecho_core::purge::{truncate_data, PgPurgeStore};
//!
//! # async fn example() -> metecho_core::Result<()> {
//! let config = MetechoConfig::load()?;
//! let db = DatabaseConnection::new(&config).await?;
//! let store = PgPurgeStore::new(db.pool().clone());
//!
//! let report = truncate_data(&store).await?;
//! for outcome in &report.outcomes {
//!     println!("{}: {} rows", outcome.entity, outcome.rows_removed);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test                          # unit and in-memory tests
//! cargo test -- --ignored             # PostgreSQL tests, needs DATABASE_URL
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod purge;

pub use config::MetechoConfig;
pub use error::{MetechoError, Result};
pub use models::entity::EntityKind;
pub use purge::{
    truncate_data, DataPurger, DeletionStrategy, PurgePlan, PurgeReport, PurgeStore,
};

//! # Data Purge
//!
//! Deletes all repository, epic, task and scratch org data while leaving users
//! and their social-login accounts in place.
//!
//! ## Components
//!
//! - [`graph`] - foreign-key dependency graph and its topological deletion order
//! - [`plan`] - the versioned, validated purge order
//! - [`store`] - the storage trait the purge runs against
//! - [`postgres`] / [`memory`] - store implementations
//! - [`purger`] - sequential execution with per-kind strategy selection
//!
//! ## Example
//!
//! ```rust,no_run
//! use metecho_core::purge::{truncate_data, PgPurgeStore};
//!
//! # async fn example(pool: sqlx::PgPool) -> metecho_core::Result<()> {
//! let store = PgPurgeStore::new(pool);
//! let report = truncate_data(&store).await?;
//! println!("removed {} rows", report.total_rows_removed());
//! # Ok(())
//! # }
//! ```

pub mod graph;
pub mod memory;
pub mod plan;
pub mod postgres;
pub mod purger;
pub mod store;

pub use graph::DependencyGraph;
pub use memory::{InMemoryStore, MemoryRow};
pub use plan::{PurgePlan, PURGE_PLAN_VERSION, STANDARD_PURGE_ORDER};
pub use postgres::PgPurgeStore;
pub use purger::{
    purge_entity, truncate_data, DataPurger, DeletionStrategy, EntityPurgeOutcome, PurgeReport,
};
pub use store::PurgeStore;

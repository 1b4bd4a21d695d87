//! # Data Model
//!
//! Row types for the Metecho schema in `migrations/`, plus the entity catalogue
//! that describes how the tables reference each other.

pub mod entity;
pub mod epic;
pub mod github_repository;
pub mod repository;
pub mod scratch_org;
pub mod slug;
pub mod task;
pub mod user;

pub use entity::{EntityKind, Relation, SoftDeletable, RELATIONS, TOMBSTONE_COLUMN};
pub use epic::{Epic, NewEpic};
pub use github_repository::{GitHubRepository, NewGitHubRepository};
pub use repository::{NewRepository, Repository};
pub use scratch_org::{NewScratchOrg, ScratchOrg};
pub use slug::{NewSlug, Slug};
pub use task::{NewTask, Task};
pub use user::{NewSocialAccount, NewUser, SocialAccount, User};

use sqlx::PgPool;

/// Physical row count of a table, tombstoned rows included.
pub(crate) async fn count_rows(pool: &PgPool, kind: EntityKind) -> Result<u64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", kind.table_name()))
        .fetch_one(pool)
        .await?;
    Ok(count.max(0) as u64)
}

/// Row count excluding tombstoned rows.
pub(crate) async fn count_live_rows<T: SoftDeletable>(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {} WHERE {} IS NULL",
        T::KIND.table_name(),
        T::TOMBSTONE_COLUMN
    ))
    .fetch_one(pool)
    .await?;
    Ok(count.max(0) as u64)
}

pub(crate) async fn soft_delete_row<T: SoftDeletable>(
    pool: &PgPool,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let table = T::KIND.table_name();
    let column = T::TOMBSTONE_COLUMN;
    let result = sqlx::query(&format!(
        "UPDATE {table} SET {column} = NOW() WHERE id = $1 AND {column} IS NULL"
    ))
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

//! # Epic Model
//!
//! A body of work inside a repository, developed on its own branch.
//! Maps to `api_epic`, soft-deletable through `deleted_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::models::entity::{EntityKind, SoftDeletable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Epic {
    pub id: i64,
    pub repository_id: i64,
    pub name: String,
    pub description: String,
    pub branch_name: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEpic {
    pub repository_id: i64,
    pub name: String,
    pub description: String,
    pub branch_name: String,
}

impl SoftDeletable for Epic {
    const KIND: EntityKind = EntityKind::Epic;
}

const COLUMNS: &str =
    "id, repository_id, name, description, branch_name, created_at, edited_at, deleted_at";

impl Epic {
    pub async fn create(pool: &PgPool, new_epic: NewEpic) -> Result<Epic, sqlx::Error> {
        sqlx::query_as::<_, Epic>(&format!(
            r#"
            INSERT INTO api_epic (repository_id, name, description, branch_name, created_at, edited_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new_epic.repository_id)
        .bind(new_epic.name)
        .bind(new_epic.description)
        .bind(new_epic.branch_name)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Epic>, sqlx::Error> {
        sqlx::query_as::<_, Epic>(&format!("SELECT {COLUMNS} FROM api_epic WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Live epics of a repository, oldest first
    pub async fn for_repository(
        pool: &PgPool,
        repository_id: i64,
    ) -> Result<Vec<Epic>, sqlx::Error> {
        let tombstone = <Self as SoftDeletable>::TOMBSTONE_COLUMN;
        sqlx::query_as::<_, Epic>(&format!(
            r#"
            SELECT {COLUMNS} FROM api_epic
            WHERE repository_id = $1 AND {tombstone} IS NULL
            ORDER BY created_at, id
            "#
        ))
        .bind(repository_id)
        .fetch_all(pool)
        .await
    }

    pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        super::soft_delete_row::<Self>(pool, id).await
    }

    pub async fn count(pool: &PgPool) -> Result<u64, sqlx::Error> {
        super::count_rows(pool, Self::KIND).await
    }

    pub async fn count_live(pool: &PgPool) -> Result<u64, sqlx::Error> {
        super::count_live_rows::<Self>(pool).await
    }
}

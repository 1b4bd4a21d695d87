//! # Scratch Org Model
//!
//! An ephemeral Salesforce org attached to a task and owned by a user.
//! Maps to `api_scratchorg`, soft-deletable through `deleted_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::models::entity::{EntityKind, SoftDeletable};

/// Org type codes stored in `org_type`.
pub mod org_type {
    pub const DEV: &str = "Dev";
    pub const QA: &str = "QA";

    pub const ALL: [&str; 2] = [DEV, QA];

    /// Width of `api_scratchorg.org_type`
    pub const MAX_LEN: usize = 7;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ScratchOrg {
    pub id: i64,
    pub task_id: i64,
    pub owner_id: i64,
    pub org_type: String,
    pub url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScratchOrg {
    pub task_id: i64,
    pub owner_id: i64,
    pub org_type: String,
    pub url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SoftDeletable for ScratchOrg {
    const KIND: EntityKind = EntityKind::ScratchOrg;
}

const COLUMNS: &str =
    "id, task_id, owner_id, org_type, url, expires_at, created_at, edited_at, deleted_at";

impl ScratchOrg {
    pub async fn create(pool: &PgPool, new_org: NewScratchOrg) -> Result<ScratchOrg, sqlx::Error> {
        sqlx::query_as::<_, ScratchOrg>(&format!(
            r#"
            INSERT INTO api_scratchorg (task_id, owner_id, org_type, url, expires_at, created_at, edited_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new_org.task_id)
        .bind(new_org.owner_id)
        .bind(new_org.org_type)
        .bind(new_org.url)
        .bind(new_org.expires_at)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ScratchOrg>, sqlx::Error> {
        sqlx::query_as::<_, ScratchOrg>(&format!(
            "SELECT {COLUMNS} FROM api_scratchorg WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
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

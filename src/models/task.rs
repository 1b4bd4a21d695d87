//! # Task Model
//!
//! A unit of work inside an epic. Maps to `api_task`, soft-deletable through
//! `deleted_at`. Scratch orgs are attached to tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::models::entity::{EntityKind, SoftDeletable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub epic_id: i64,
    pub name: String,
    pub description: String,
    pub branch_name: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub epic_id: i64,
    pub name: String,
    pub description: String,
    pub branch_name: String,
}

impl SoftDeletable for Task {
    const KIND: EntityKind = EntityKind::Task;
}

const COLUMNS: &str =
    "id, epic_id, name, description, branch_name, created_at, edited_at, deleted_at";

impl Task {
    pub async fn create(pool: &PgPool, new_task: NewTask) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO api_task (epic_id, name, description, branch_name, created_at, edited_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new_task.epic_id)
        .bind(new_task.name)
        .bind(new_task.description)
        .bind(new_task.branch_name)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(&format!("SELECT {COLUMNS} FROM api_task WHERE id = $1"))
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

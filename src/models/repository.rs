//! # Repository Model
//!
//! A GitHub repository registered with Metecho. Repositories own epics, their
//! historical slugs and the per-user GitHub repository links.
//!
//! ## Database Schema
//!
//! Maps to `api_repository`:
//! - `id`: Primary key (BIGSERIAL)
//! - `name`, `repo_url`: unique identifiers
//! - `repo_id`: GitHub's numeric id, unique when present
//! - `deleted_at`: soft-delete tombstone

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::models::entity::{EntityKind, SoftDeletable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub repo_url: String,
    pub repo_id: Option<i64>,
    pub description: String,
    pub is_managed: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// New Repository for creation (without generated fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRepository {
    pub name: String,
    pub repo_url: String,
    pub repo_id: Option<i64>,
    pub description: String,
    pub is_managed: bool,
}

impl SoftDeletable for Repository {
    const KIND: EntityKind = EntityKind::Repository;
}

const COLUMNS: &str =
    "id, name, repo_url, repo_id, description, is_managed, created_at, edited_at, deleted_at";

impl Repository {
    pub async fn create(pool: &PgPool, new_repo: NewRepository) -> Result<Repository, sqlx::Error> {
        sqlx::query_as::<_, Repository>(&format!(
            r#"
            INSERT INTO api_repository (name, repo_url, repo_id, description, is_managed, created_at, edited_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new_repo.name)
        .bind(new_repo.repo_url)
        .bind(new_repo.repo_id)
        .bind(new_repo.description)
        .bind(new_repo.is_managed)
        .fetch_one(pool)
        .await
    }

    /// Find a repository by ID, tombstoned or not
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Repository>, sqlx::Error> {
        sqlx::query_as::<_, Repository>(&format!(
            "SELECT {COLUMNS} FROM api_repository WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Set the tombstone; the row stays in place.
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

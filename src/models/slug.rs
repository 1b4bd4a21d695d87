//! # Slug Model
//!
//! Historical, human-readable names for repositories, epics and tasks. Each
//! rename adds a slug row; old slugs keep resolving to their parent while the
//! `is_active` flag marks the current name.
//!
//! The three slug tables share one shape, so a single [`Slug`] type serves all of
//! them and every operation takes the slug [`EntityKind`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{MetechoError, Result};
use crate::models::entity::EntityKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Slug {
    pub id: i64,
    pub parent_id: i64,
    pub slug: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSlug {
    pub parent_id: i64,
    pub slug: String,
    pub is_active: bool,
}

fn slug_table(kind: EntityKind) -> Result<&'static str> {
    slug_and_parent_tables(kind).map(|(table, _)| table)
}

fn slug_and_parent_tables(kind: EntityKind) -> Result<(&'static str, &'static str)> {
    match kind.slug_parent() {
        Some(parent) => Ok((kind.table_name(), parent.table_name())),
        None => Err(MetechoError::ValidationError(format!(
            "{kind} is not a slug entity"
        ))),
    }
}

impl Slug {
    /// Insert a slug. An active slug deactivates every other slug of the same
    /// parent in the same transaction, so at most one stays active.
    ///
    /// The parent row is locked first so concurrent creates for one parent run
    /// one after the other. The partial unique index on `(parent_id) WHERE
    /// is_active` backs this up for writers that bypass `create`.
    pub async fn create(pool: &PgPool, kind: EntityKind, new_slug: NewSlug) -> Result<Slug> {
        let (table, parent_table) = slug_and_parent_tables(kind)?;
        let mut tx = pool.begin().await?;

        if new_slug.is_active {
            sqlx::query(&format!(
                "SELECT id FROM {parent_table} WHERE id = $1 FOR UPDATE"
            ))
            .bind(new_slug.parent_id)
            .fetch_optional(&mut *tx)
            .await?;

            sqlx::query(&format!(
                "UPDATE {table} SET is_active = FALSE WHERE parent_id = $1 AND is_active"
            ))
            .bind(new_slug.parent_id)
            .execute(&mut *tx)
            .await?;
        }

        let slug = sqlx::query_as::<_, Slug>(&format!(
            r#"
            INSERT INTO {table} (parent_id, slug, is_active, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, parent_id, slug, is_active, created_at
            "#
        ))
        .bind(new_slug.parent_id)
        .bind(new_slug.slug)
        .bind(new_slug.is_active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(slug)
    }

    /// The slug a parent currently resolves to: the active one, or the most
    /// recent if none is flagged.
    pub async fn active_for_parent(
        pool: &PgPool,
        kind: EntityKind,
        parent_id: i64,
    ) -> Result<Option<Slug>> {
        let table = slug_table(kind)?;
        let slug = sqlx::query_as::<_, Slug>(&format!(
            r#"
            SELECT id, parent_id, slug, is_active, created_at
            FROM {table}
            WHERE parent_id = $1
            ORDER BY is_active DESC, created_at DESC, id DESC
            LIMIT 1
            "#
        ))
        .bind(parent_id)
        .fetch_optional(pool)
        .await?;

        Ok(slug)
    }

    /// All slugs of a parent, newest first
    pub async fn list_for_parent(
        pool: &PgPool,
        kind: EntityKind,
        parent_id: i64,
    ) -> Result<Vec<Slug>> {
        let table = slug_table(kind)?;
        let slugs = sqlx::query_as::<_, Slug>(&format!(
            r#"
            SELECT id, parent_id, slug, is_active, created_at
            FROM {table}
            WHERE parent_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(parent_id)
        .fetch_all(pool)
        .await?;

        Ok(slugs)
    }

    /// Resolve a slug string to its parent id
    pub async fn resolve(pool: &PgPool, kind: EntityKind, slug: &str) -> Result<Option<i64>> {
        let table = slug_table(kind)?;
        let parent_id = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT parent_id FROM {table} WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(parent_id)
    }

    pub async fn count(pool: &PgPool, kind: EntityKind) -> Result<u64> {
        slug_table(kind)?;
        Ok(super::count_rows(pool, kind).await?)
    }
}

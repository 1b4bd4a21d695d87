//! PostgreSQL implementation of [`PurgeStore`].

use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Instant;
use tracing::debug;

use crate::error::{MetechoError, Result};
use crate::models::entity::{EntityKind, TOMBSTONE_COLUMN};
use crate::purge::store::PurgeStore;

#[derive(Debug, Clone)]
pub struct PgPurgeStore {
    pool: PgPool,
}

impl PgPurgeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn execute(&self, kind: EntityKind, sql: &str) -> Result<u64> {
        let started = Instant::now();
        // Postgres names the referencing table in the violation; report the one
        // being deleted from instead.
        let result = sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|err| match MetechoError::from(err) {
                MetechoError::ConstraintViolation { constraint, .. } => {
                    MetechoError::ConstraintViolation {
                        table: kind.table_name().to_string(),
                        constraint,
                    }
                }
                other => other,
            })?;
        debug!(
            table = kind.table_name(),
            rows = result.rows_affected(),
            duration_ms = started.elapsed().as_millis() as u64,
            "executed bulk statement"
        );
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl PurgeStore for PgPurgeStore {
    async fn count(&self, kind: EntityKind) -> Result<u64> {
        Ok(crate::models::count_rows(&self.pool, kind).await?)
    }

    async fn delete_all(&self, kind: EntityKind) -> Result<u64> {
        let table = kind.table_name();
        let sql = if kind.supports_hard_delete() {
            format!(
                "UPDATE {table} SET {TOMBSTONE_COLUMN} = NOW() WHERE {TOMBSTONE_COLUMN} IS NULL"
            )
        } else {
            format!("DELETE FROM {table}")
        };
        self.execute(kind, &sql).await
    }

    async fn hard_delete_all(&self, kind: EntityKind) -> Result<u64> {
        if !kind.supports_hard_delete() {
            return Err(MetechoError::UnsupportedOperation {
                operation: "hard delete",
                entity: kind,
            });
        }
        self.execute(kind, &format!("DELETE FROM {}", kind.table_name()))
            .await
    }

    fn store_name(&self) -> &'static str {
        "postgres"
    }
}

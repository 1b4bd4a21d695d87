//! # In-Memory Purge Store
//!
//! A [`PurgeStore`] holding rows in process memory. It enforces the catalogue's
//! foreign keys on insert and on delete, without cascade, and keeps tombstones
//! for soft-deletable kinds, which makes it a faithful stand-in for the schema
//! when checking deletion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeMap;

use crate::error::{MetechoError, Result};
use crate::models::entity::{EntityKind, RELATIONS};
use crate::purge::store::PurgeStore;

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRow {
    pub id: i64,
    /// Outgoing foreign keys as `(referenced kind, referenced id)`
    pub references: Vec<(EntityKind, i64)>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    rows: BTreeMap<EntityKind, BTreeMap<i64, MemoryRow>>,
}

impl Tables {
    fn exists(&self, kind: EntityKind, id: i64) -> bool {
        self.rows
            .get(&kind)
            .is_some_and(|table| table.contains_key(&id))
    }

    /// First row of another kind that still references a row of `kind`.
    fn blocking_reference(&self, kind: EntityKind) -> Option<(EntityKind, &'static str)> {
        let targets = self.rows.get(&kind)?;
        for (&other, rows) in &self.rows {
            if other == kind {
                continue;
            }
            let blocked = rows.values().any(|row| {
                row.references
                    .iter()
                    .any(|&(to, id)| to == kind && targets.contains_key(&id))
            });
            if blocked {
                let column = RELATIONS
                    .iter()
                    .find(|r| r.from == other && r.to == kind)
                    .map(|r| r.column)
                    .unwrap_or("id");
                return Some((other, column));
            }
        }
        None
    }

    fn check_removable(&self, kind: EntityKind) -> Result<()> {
        match self.blocking_reference(kind) {
            Some((child, column)) => Err(MetechoError::ConstraintViolation {
                table: kind.table_name().to_string(),
                constraint: format!("{}_{column}_fkey", child.table_name()),
            }),
            None => Ok(()),
        }
    }

    fn remove_all(&mut self, kind: EntityKind) -> Result<u64> {
        self.check_removable(kind)?;
        let removed = self.rows.remove(&kind).map(|t| t.len()).unwrap_or(0);
        Ok(removed as u64)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row of `kind` referencing existing rows. Every reference must
    /// follow a declared relation and point at a row that exists.
    pub fn insert(&self, kind: EntityKind, references: &[(EntityKind, i64)]) -> Result<i64> {
        let mut tables = self.tables.lock();

        for &(to, id) in references {
            if !RELATIONS.iter().any(|r| r.from == kind && r.to == to) {
                return Err(MetechoError::ValidationError(format!(
                    "{kind} has no relation to {to}"
                )));
            }
            if !tables.exists(to, id) {
                return Err(MetechoError::ValidationError(format!(
                    "{kind} references missing {to} {id}"
                )));
            }
        }

        tables.next_id += 1;
        let id = tables.next_id;
        tables.rows.entry(kind).or_default().insert(
            id,
            MemoryRow {
                id,
                references: references.to_vec(),
                deleted_at: None,
            },
        );
        Ok(id)
    }

    /// Tombstone a single row. Returns false if it is missing or already tombstoned.
    pub fn soft_delete(&self, kind: EntityKind, id: i64) -> Result<bool> {
        if !kind.supports_hard_delete() {
            return Err(MetechoError::UnsupportedOperation {
                operation: "soft delete",
                entity: kind,
            });
        }
        let mut tables = self.tables.lock();
        let row = tables.rows.get_mut(&kind).and_then(|t| t.get_mut(&id));
        Ok(match row {
            Some(row) if row.deleted_at.is_none() => {
                row.deleted_at = Some(Utc::now());
                true
            }
            _ => false,
        })
    }

    /// Rows of `kind` without a tombstone
    pub fn count_live(&self, kind: EntityKind) -> u64 {
        let tables = self.tables.lock();
        tables
            .rows
            .get(&kind)
            .map(|t| t.values().filter(|row| row.deleted_at.is_none()).count())
            .unwrap_or(0) as u64
    }

    pub fn rows(&self, kind: EntityKind) -> Vec<MemoryRow> {
        let tables = self.tables.lock();
        tables
            .rows
            .get(&kind)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PurgeStore for InMemoryStore {
    async fn count(&self, kind: EntityKind) -> Result<u64> {
        let tables = self.tables.lock();
        Ok(tables.rows.get(&kind).map(|t| t.len()).unwrap_or(0) as u64)
    }

    async fn delete_all(&self, kind: EntityKind) -> Result<u64> {
        let mut tables = self.tables.lock();
        if !kind.supports_hard_delete() {
            return tables.remove_all(kind);
        }

        let now = Utc::now();
        let mut tombstoned = 0;
        if let Some(rows) = tables.rows.get_mut(&kind) {
            for row in rows.values_mut().filter(|row| row.deleted_at.is_none()) {
                row.deleted_at = Some(now);
                tombstoned += 1;
            }
        }
        Ok(tombstoned)
    }

    async fn hard_delete_all(&self, kind: EntityKind) -> Result<u64> {
        if !kind.supports_hard_delete() {
            return Err(MetechoError::UnsupportedOperation {
                operation: "hard delete",
                entity: kind,
            });
        }
        self.tables.lock().remove_all(kind)
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

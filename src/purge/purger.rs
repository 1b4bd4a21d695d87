//! # Data Purger
//!
//! Empties every table in a [`PurgePlan`], one entity kind at a time, in plan
//! order. Kinds that carry tombstones are removed permanently; the rest go
//! through their standard removal. The strategy is picked up front from
//! [`EntityKind::supports_hard_delete`], so an unsupported operation is never
//! attempted.
//!
//! The first failing step aborts the run. Kinds purged before it stay purged.

use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::logging::log_purge_operation;
use crate::models::entity::EntityKind;
use crate::purge::plan::PurgePlan;
use crate::purge::store::PurgeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStrategy {
    /// Permanent removal, bypassing tombstones
    Hard,
    /// The kind's ordinary removal
    Standard,
}

impl DeletionStrategy {
    pub fn for_kind(kind: EntityKind) -> Self {
        if kind.supports_hard_delete() {
            DeletionStrategy::Hard
        } else {
            DeletionStrategy::Standard
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeletionStrategy::Hard => "hard",
            DeletionStrategy::Standard => "standard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityPurgeOutcome {
    pub entity: EntityKind,
    pub strategy: DeletionStrategy,
    pub rows_removed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    pub plan_version: u32,
    pub outcomes: Vec<EntityPurgeOutcome>,
}

impl PurgeReport {
    pub fn total_rows_removed(&self) -> u64 {
        self.outcomes.iter().map(|o| o.rows_removed).sum()
    }

    pub fn rows_removed(&self, entity: EntityKind) -> Option<u64> {
        self.outcomes
            .iter()
            .find(|o| o.entity == entity)
            .map(|o| o.rows_removed)
    }
}

/// Remove every row of one entity kind using the strongest removal it supports.
pub async fn purge_entity<S>(store: &S, entity: EntityKind) -> Result<EntityPurgeOutcome>
where
    S: PurgeStore + ?Sized,
{
    let strategy = DeletionStrategy::for_kind(entity);
    let started = Instant::now();

    let result = match strategy {
        DeletionStrategy::Hard => store.hard_delete_all(entity).await,
        DeletionStrategy::Standard => store.delete_all(entity).await,
    };

    let duration_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(rows_removed) => {
            log_purge_operation(
                entity,
                strategy.as_str(),
                "completed",
                Some(rows_removed),
                duration_ms,
            );
            Ok(EntityPurgeOutcome {
                entity,
                strategy,
                rows_removed,
            })
        }
        Err(e) => {
            log_purge_operation(entity, strategy.as_str(), "failed", None, duration_ms);
            Err(e)
        }
    }
}

pub struct DataPurger<'a, S: PurgeStore + ?Sized> {
    store: &'a S,
    plan: PurgePlan,
}

impl<'a, S: PurgeStore + ?Sized> DataPurger<'a, S> {
    /// Purger running the standard plan
    pub fn new(store: &'a S) -> Result<Self> {
        Ok(Self::with_plan(store, PurgePlan::standard()?))
    }

    pub fn with_plan(store: &'a S, plan: PurgePlan) -> Self {
        Self { store, plan }
    }

    pub fn plan(&self) -> &PurgePlan {
        &self.plan
    }

    pub async fn run(&self) -> Result<PurgeReport> {
        warn!(
            store = self.store.store_name(),
            plan_version = self.plan.version(),
            entities = self.plan.len(),
            "Purging all application data; users and social accounts are kept"
        );

        let mut outcomes = Vec::with_capacity(self.plan.len());
        for &entity in self.plan.entities() {
            match purge_entity(self.store, entity).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    error!(
                        entity = %entity,
                        purged = outcomes.len(),
                        error = %e,
                        "Data purge aborted"
                    );
                    return Err(e);
                }
            }
        }

        let report = PurgeReport {
            plan_version: self.plan.version(),
            outcomes,
        };
        info!(
            total_rows_removed = report.total_rows_removed(),
            "Data purge completed"
        );
        Ok(report)
    }
}

/// Run the standard purge plan against `store`.
pub async fn truncate_data<S>(store: &S) -> Result<PurgeReport>
where
    S: PurgeStore + ?Sized,
{
    DataPurger::new(store)?.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purge::memory::InMemoryStore;
    use crate::purge::plan::STANDARD_PURGE_ORDER;

    fn seed(store: &InMemoryStore) -> i64 {
        let user = store.insert(EntityKind::User, &[]).unwrap();
        let repo = store.insert(EntityKind::Repository, &[]).unwrap();
        store
            .insert(EntityKind::RepositorySlug, &[(EntityKind::Repository, repo)])
            .unwrap();
        let epic = store
            .insert(EntityKind::Epic, &[(EntityKind::Repository, repo)])
            .unwrap();
        let task = store
            .insert(EntityKind::Task, &[(EntityKind::Epic, epic)])
            .unwrap();
        store
            .insert(
                EntityKind::ScratchOrg,
                &[(EntityKind::Task, task), (EntityKind::User, user)],
            )
            .unwrap();
        user
    }

    #[tokio::test]
    async fn test_report_serializes_in_snake_case() {
        let store = InMemoryStore::new();
        seed(&store);

        let report = truncate_data(&store).await.unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["plan_version"], serde_json::json!(1));
        let outcomes = json["outcomes"].as_array().unwrap();
        assert_eq!(outcomes.len(), STANDARD_PURGE_ORDER.len());
        assert_eq!(
            outcomes[0],
            serde_json::json!({
                "entity": "scratch_org",
                "strategy": "hard",
                "rows_removed": 1
            })
        );
        assert_eq!(outcomes[5]["entity"], "github_repository");
        assert_eq!(outcomes[5]["strategy"], "standard");
    }

    #[test]
    fn test_strategy_follows_capability() {
        assert_eq!(
            DeletionStrategy::for_kind(EntityKind::Task),
            DeletionStrategy::Hard
        );
        assert_eq!(
            DeletionStrategy::for_kind(EntityKind::TaskSlug),
            DeletionStrategy::Standard
        );
    }

    #[tokio::test]
    async fn test_run_reports_every_entity_in_plan_order() {
        let store = InMemoryStore::new();
        seed(&store);

        let report = truncate_data(&store).await.unwrap();
        let entities: Vec<_> = report.outcomes.iter().map(|o| o.entity).collect();
        assert_eq!(entities, STANDARD_PURGE_ORDER.to_vec());
        assert_eq!(report.total_rows_removed(), 5);
        assert_eq!(report.rows_removed(EntityKind::EpicSlug), Some(0));
        assert_eq!(report.rows_removed(EntityKind::User), None);
        assert_eq!(store.count(EntityKind::User).await.unwrap(), 1);
    }

    struct FailingStore {
        inner: InMemoryStore,
        fail_on: EntityKind,
    }

    #[async_trait::async_trait]
    impl PurgeStore for FailingStore {
        async fn count(&self, kind: EntityKind) -> Result<u64> {
            self.inner.count(kind).await
        }

        async fn delete_all(&self, kind: EntityKind) -> Result<u64> {
            if kind == self.fail_on {
                return Err(crate::error::MetechoError::DatabaseError(
                    "connection reset".to_string(),
                ));
            }
            self.inner.delete_all(kind).await
        }

        async fn hard_delete_all(&self, kind: EntityKind) -> Result<u64> {
            if kind == self.fail_on {
                return Err(crate::error::MetechoError::DatabaseError(
                    "connection reset".to_string(),
                ));
            }
            self.inner.hard_delete_all(kind).await
        }

        fn store_name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_failure_stops_the_run() {
        let store = FailingStore {
            inner: InMemoryStore::new(),
            fail_on: EntityKind::Epic,
        };
        seed(&store.inner);

        let err = truncate_data(&store).await.unwrap_err();
        assert_eq!(err.to_string(), "Database error: connection reset");

        // Kinds before the failure stay purged, later ones are untouched.
        assert_eq!(store.count(EntityKind::ScratchOrg).await.unwrap(), 0);
        assert_eq!(store.count(EntityKind::Task).await.unwrap(), 0);
        assert_eq!(store.count(EntityKind::Epic).await.unwrap(), 1);
        assert_eq!(store.count(EntityKind::RepositorySlug).await.unwrap(), 1);
        assert_eq!(store.count(EntityKind::Repository).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_purge_entity_surfaces_constraint_violation() {
        let store = InMemoryStore::new();
        seed(&store);

        let err = purge_entity(&store, EntityKind::Epic).await.unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(store.count(EntityKind::Epic).await.unwrap(), 1);
    }
}

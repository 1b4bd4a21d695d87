//! # Purge Plan
//!
//! The ordered list of entity kinds the data purge empties. The standard plan is
//! derived from the dependency graph; [`STANDARD_PURGE_ORDER`] records the order
//! that derivation is expected to produce and is bumped together with
//! [`PURGE_PLAN_VERSION`] whenever a relation changes it.

use serde::Serialize;

use crate::error::{MetechoError, Result};
use crate::models::entity::EntityKind;
use crate::purge::graph::DependencyGraph;

pub const PURGE_PLAN_VERSION: u32 = 1;

pub const STANDARD_PURGE_ORDER: [EntityKind; 8] = [
    EntityKind::ScratchOrg,
    EntityKind::TaskSlug,
    EntityKind::Task,
    EntityKind::EpicSlug,
    EntityKind::Epic,
    EntityKind::GitHubRepository,
    EntityKind::RepositorySlug,
    EntityKind::Repository,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurgePlan {
    version: u32,
    entities: Vec<EntityKind>,
}

impl PurgePlan {
    /// Every purgeable kind, ordered from the catalogue's relations.
    pub fn standard() -> Result<Self> {
        let graph = DependencyGraph::from_catalogue();
        let purgeable: Vec<EntityKind> = EntityKind::ALL
            .into_iter()
            .filter(|kind| kind.is_purgeable())
            .collect();
        let entities = graph.deletion_order(&purgeable)?;

        Ok(Self {
            version: PURGE_PLAN_VERSION,
            entities,
        })
    }

    /// Build a plan from an explicit order, validated against `graph`.
    pub fn from_order(order: &[EntityKind], graph: &DependencyGraph) -> Result<Self> {
        let mut seen = Vec::with_capacity(order.len());
        for &kind in order {
            if !kind.is_purgeable() {
                return Err(MetechoError::ValidationError(format!(
                    "{kind} records are never purged"
                )));
            }
            if seen.contains(&kind) {
                return Err(MetechoError::ValidationError(format!(
                    "{kind} appears more than once in the purge order"
                )));
            }
            seen.push(kind);
        }

        graph.check_order(order).map_err(|(parent, child)| {
            MetechoError::ValidationError(format!(
                "{parent} is deleted before {child}, which references it"
            ))
        })?;

        Ok(Self {
            version: PURGE_PLAN_VERSION,
            entities: seen,
        })
    }

    pub fn entities(&self) -> &[EntityKind] {
        &self.entities
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_plan_matches_recorded_order() {
        let plan = PurgePlan::standard().unwrap();
        assert_eq!(plan.entities(), &STANDARD_PURGE_ORDER);
        assert_eq!(plan.version(), PURGE_PLAN_VERSION);
    }

    #[test]
    fn test_recorded_order_is_valid() {
        let graph = DependencyGraph::from_catalogue();
        let plan = PurgePlan::from_order(&STANDARD_PURGE_ORDER, &graph).unwrap();
        assert_eq!(plan.len(), 8);
    }

    #[test]
    fn test_plan_never_includes_users() {
        let plan = PurgePlan::standard().unwrap();
        assert!(!plan.entities().contains(&EntityKind::User));
        assert!(!plan.entities().contains(&EntityKind::SocialAccount));

        let graph = DependencyGraph::from_catalogue();
        let err = PurgePlan::from_order(&[EntityKind::SocialAccount, EntityKind::User], &graph)
            .unwrap_err();
        assert!(matches!(err, MetechoError::ValidationError(_)));
    }

    #[test]
    fn test_reversed_order_is_rejected() {
        let graph = DependencyGraph::from_catalogue();
        let mut reversed = STANDARD_PURGE_ORDER;
        reversed.reverse();

        let err = PurgePlan::from_order(&reversed, &graph).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Repository is deleted before Epic, which references it"
        );
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let graph = DependencyGraph::from_catalogue();
        let err = PurgePlan::from_order(&[EntityKind::TaskSlug, EntityKind::TaskSlug], &graph)
            .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}

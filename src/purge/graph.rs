//! # Entity Dependency Graph
//!
//! Directed graph of foreign-key relations between entity kinds. An edge
//! `child -> parent` means rows of `child` reference rows of `parent`, so `child`
//! must be emptied first when deleting.
//!
//! [`DependencyGraph::deletion_order`] runs Kahn's algorithm over those edges,
//! always taking the ready kind that comes first in [`EntityKind`] declaration
//! order, which makes the resulting order deterministic.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{MetechoError, Result};
use crate::models::entity::{EntityKind, Relation, RELATIONS};

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// child -> parents it references
    parents: BTreeMap<EntityKind, BTreeSet<EntityKind>>,
    /// parent -> children referencing it
    children: BTreeMap<EntityKind, BTreeSet<EntityKind>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph of every relation declared in the entity catalogue.
    pub fn from_catalogue() -> Self {
        Self::from_relations(RELATIONS)
    }

    pub fn from_relations(relations: &[Relation]) -> Self {
        let mut graph = Self::new();
        for relation in relations {
            graph.add_relation(relation.from, relation.to);
        }
        graph
    }

    /// Record that rows of `child` reference rows of `parent`. Self references
    /// never constrain a bulk delete and are ignored.
    pub fn add_relation(&mut self, child: EntityKind, parent: EntityKind) {
        if child == parent {
            return;
        }
        self.parents.entry(child).or_default().insert(parent);
        self.children.entry(parent).or_default().insert(child);
    }

    /// Kinds whose rows reference `kind`.
    pub fn dependents_of(&self, kind: EntityKind) -> impl Iterator<Item = EntityKind> + '_ {
        self.children.get(&kind).into_iter().flatten().copied()
    }

    /// Kinds that `kind` references.
    pub fn dependencies_of(&self, kind: EntityKind) -> impl Iterator<Item = EntityKind> + '_ {
        self.parents.get(&kind).into_iter().flatten().copied()
    }

    /// Order `kinds` so that every kind comes after all of its dependents in the
    /// set. Relations to kinds outside the set are ignored.
    pub fn deletion_order(&self, kinds: &[EntityKind]) -> Result<Vec<EntityKind>> {
        let selected: BTreeSet<EntityKind> = kinds.iter().copied().collect();

        // remaining dependents per kind, restricted to the selection
        let mut pending: BTreeMap<EntityKind, usize> = selected
            .iter()
            .map(|&kind| {
                let count = self
                    .dependents_of(kind)
                    .filter(|child| selected.contains(child))
                    .count();
                (kind, count)
            })
            .collect();

        let mut ready: BTreeSet<EntityKind> = pending
            .iter()
            .filter(|&(_, &count)| count == 0)
            .map(|(&kind, _)| kind)
            .collect();

        let mut order = Vec::with_capacity(selected.len());
        while let Some(kind) = ready.pop_first() {
            order.push(kind);
            pending.remove(&kind);
            for parent in self.dependencies_of(kind) {
                if let Some(count) = pending.get_mut(&parent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(parent);
                    }
                }
            }
        }

        if !pending.is_empty() {
            return Err(MetechoError::DependencyCycle(pending.into_keys().collect()));
        }

        Ok(order)
    }

    /// Check that `order` deletes every child before the parents it references.
    /// Returns the first offending `(parent, child)` pair.
    pub fn check_order(&self, order: &[EntityKind]) -> std::result::Result<(), (EntityKind, EntityKind)> {
        for (position, &kind) in order.iter().enumerate() {
            let later = &order[position + 1..];
            if let Some(child) = self.dependents_of(kind).find(|child| later.contains(child)) {
                return Err((kind, child));
            }
        }
        Ok(())
    }
}

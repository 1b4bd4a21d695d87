//! Proptest strategies describing the shape of a seeded data set.

#![allow(dead_code)]

use proptest::prelude::*;

#[derive(Debug, Clone)]
pub struct TaskShape {
    pub slugs: usize,
    pub scratch_orgs: usize,
    pub tombstoned: bool,
}

#[derive(Debug, Clone)]
pub struct EpicShape {
    pub slugs: usize,
    pub tasks: Vec<TaskShape>,
    pub tombstoned: bool,
}

#[derive(Debug, Clone)]
pub struct RepositoryShape {
    pub slugs: usize,
    pub github_links: usize,
    pub epics: Vec<EpicShape>,
    pub tombstoned: bool,
}

#[derive(Debug, Clone)]
pub struct DatasetShape {
    pub users: usize,
    pub social_accounts: usize,
    pub repositories: Vec<RepositoryShape>,
}

pub fn task_shape_strategy() -> impl Strategy<Value = TaskShape> {
    (0usize..3, 0usize..3, any::<bool>()).prop_map(|(slugs, scratch_orgs, tombstoned)| {
        TaskShape {
            slugs,
            scratch_orgs,
            tombstoned,
        }
    })
}

pub fn epic_shape_strategy() -> impl Strategy<Value = EpicShape> {
    (
        0usize..3,
        prop::collection::vec(task_shape_strategy(), 0..4),
        any::<bool>(),
    )
        .prop_map(|(slugs, tasks, tombstoned)| EpicShape {
            slugs,
            tasks,
            tombstoned,
        })
}

pub fn repository_shape_strategy() -> impl Strategy<Value = RepositoryShape> {
    (
        0usize..3,
        0usize..3,
        prop::collection::vec(epic_shape_strategy(), 0..3),
        any::<bool>(),
    )
        .prop_map(|(slugs, github_links, epics, tombstoned)| RepositoryShape {
            slugs,
            github_links,
            epics,
            tombstoned,
        })
}

/// At least one user, so scratch orgs and GitHub links always have an owner
pub fn dataset_shape_strategy() -> impl Strategy<Value = DatasetShape> {
    (
        1usize..4,
        0usize..3,
        prop::collection::vec(repository_shape_strategy(), 0..4),
    )
        .prop_map(|(users, social_accounts, repositories)| DatasetShape {
            users,
            social_accounts,
            repositories,
        })
}

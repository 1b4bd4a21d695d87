//! Seeding helpers for the in-memory store and for PostgreSQL.

#![allow(dead_code)]

use super::strategies::DatasetShape;
use super::unique_name;
use metecho_core::models::{
    EntityKind, Epic, GitHubRepository, NewEpic, NewGitHubRepository, NewRepository,
    NewScratchOrg, NewSlug, NewSocialAccount, NewTask, NewUser, Repository, ScratchOrg, Slug,
    SocialAccount, Task, User,
};
use metecho_core::purge::InMemoryStore;
use sqlx::PgPool;
use std::collections::BTreeMap;

/// Rows inserted per entity kind, tombstoned rows included
pub type SeedCounts = BTreeMap<EntityKind, u64>;

fn bump(counts: &mut SeedCounts, kind: EntityKind) {
    *counts.entry(kind).or_default() += 1;
}

/// Populate `store` following `shape`. Returns the number of rows per kind.
pub fn seed_memory(store: &InMemoryStore, shape: &DatasetShape) -> SeedCounts {
    let mut counts = SeedCounts::new();
    let insert = |counts: &mut SeedCounts, kind: EntityKind, refs: &[(EntityKind, i64)]| {
        let id = store.insert(kind, refs).expect("Failed to seed row");
        bump(counts, kind);
        id
    };

    let users: Vec<i64> = (0..shape.users)
        .map(|_| insert(&mut counts, EntityKind::User, &[]))
        .collect();
    for n in 0..shape.social_accounts {
        let user = users[n % users.len()];
        insert(&mut counts, EntityKind::SocialAccount, &[(EntityKind::User, user)]);
    }

    for (r, repo_shape) in shape.repositories.iter().enumerate() {
        let repo = insert(&mut counts, EntityKind::Repository, &[]);
        for _ in 0..repo_shape.slugs {
            insert(&mut counts, EntityKind::RepositorySlug, &[(EntityKind::Repository, repo)]);
        }
        for g in 0..repo_shape.github_links {
            let user = users[(r + g) % users.len()];
            insert(
                &mut counts,
                EntityKind::GitHubRepository,
                &[(EntityKind::Repository, repo), (EntityKind::User, user)],
            );
        }

        for epic_shape in &repo_shape.epics {
            let epic = insert(&mut counts, EntityKind::Epic, &[(EntityKind::Repository, repo)]);
            for _ in 0..epic_shape.slugs {
                insert(&mut counts, EntityKind::EpicSlug, &[(EntityKind::Epic, epic)]);
            }

            for task_shape in &epic_shape.tasks {
                let task = insert(&mut counts, EntityKind::Task, &[(EntityKind::Epic, epic)]);
                for _ in 0..task_shape.slugs {
                    insert(&mut counts, EntityKind::TaskSlug, &[(EntityKind::Task, task)]);
                }
                for o in 0..task_shape.scratch_orgs {
                    let owner = users[o % users.len()];
                    let org = insert(
                        &mut counts,
                        EntityKind::ScratchOrg,
                        &[(EntityKind::Task, task), (EntityKind::User, owner)],
                    );
                    if task_shape.tombstoned {
                        store.soft_delete(EntityKind::ScratchOrg, org).unwrap();
                    }
                }
                if task_shape.tombstoned {
                    store.soft_delete(EntityKind::Task, task).unwrap();
                }
            }
            if epic_shape.tombstoned {
                store.soft_delete(EntityKind::Epic, epic).unwrap();
            }
        }
        if repo_shape.tombstoned {
            store.soft_delete(EntityKind::Repository, repo).unwrap();
        }
    }

    counts
}

/// Every row created by [`seed_repository_graph`]
#[derive(Debug, Clone)]
pub struct RepositoryGraph {
    pub user: User,
    pub social_account: SocialAccount,
    pub repository: Repository,
    pub repository_slug: Slug,
    pub github_repository: GitHubRepository,
    pub epic: Epic,
    pub epic_slug: Slug,
    pub task: Task,
    pub task_slug: Slug,
    pub scratch_org: ScratchOrg,
}

/// A repository with one of everything hanging off it, owned by a fresh user.
pub async fn seed_repository_graph(pool: &PgPool) -> RepositoryGraph {
    let user = User::create(
        pool,
        NewUser {
            username: unique_name("user"),
            email: "dev@example.com".to_string(),
        },
    )
    .await
    .expect("Failed to create test User");

    let social_account = SocialAccount::create(
        pool,
        NewSocialAccount {
            user_id: user.id,
            provider: "github".to_string(),
            uid: unique_name("uid"),
        },
    )
    .await
    .expect("Failed to create test SocialAccount");

    let repo_name = unique_name("repo");
    let repository = Repository::create(
        pool,
        NewRepository {
            name: repo_name.clone(),
            repo_url: format!("https://github.com/sfdo/{repo_name}"),
            repo_id: Some(user.id * 1000),
            description: "Test repository".to_string(),
            is_managed: false,
        },
    )
    .await
    .expect("Failed to create test Repository");

    let repository_slug = Slug::create(
        pool,
        EntityKind::RepositorySlug,
        NewSlug {
            parent_id: repository.id,
            slug: unique_name("repo-slug"),
            is_active: true,
        },
    )
    .await
    .expect("Failed to create test RepositorySlug");

    let github_repository = GitHubRepository::create(
        pool,
        NewGitHubRepository {
            repository_id: repository.id,
            user_id: user.id,
            url: repository.repo_url.clone(),
            repo_id: repository.id * 1000 + 1,
        },
    )
    .await
    .expect("Failed to create test GitHubRepository");

    let epic = Epic::create(
        pool,
        NewEpic {
            repository_id: repository.id,
            name: unique_name("epic"),
            description: String::new(),
            branch_name: "feature/epic".to_string(),
        },
    )
    .await
    .expect("Failed to create test Epic");

    let epic_slug = Slug::create(
        pool,
        EntityKind::EpicSlug,
        NewSlug {
            parent_id: epic.id,
            slug: unique_name("epic-slug"),
            is_active: true,
        },
    )
    .await
    .expect("Failed to create test EpicSlug");

    let task = Task::create(
        pool,
        NewTask {
            epic_id: epic.id,
            name: unique_name("task"),
            description: String::new(),
            branch_name: "feature/epic__task".to_string(),
        },
    )
    .await
    .expect("Failed to create test Task");

    let task_slug = Slug::create(
        pool,
        EntityKind::TaskSlug,
        NewSlug {
            parent_id: task.id,
            slug: unique_name("task-slug"),
            is_active: true,
        },
    )
    .await
    .expect("Failed to create test TaskSlug");

    let scratch_org = ScratchOrg::create(
        pool,
        NewScratchOrg {
            task_id: task.id,
            owner_id: user.id,
            org_type: metecho_core::models::scratch_org::org_type::DEV.to_string(),
            url: None,
            expires_at: None,
        },
    )
    .await
    .expect("Failed to create test ScratchOrg");

    RepositoryGraph {
        user,
        social_account,
        repository,
        repository_slug,
        github_repository,
        epic,
        epic_slug,
        task,
        task_slug,
        scratch_org,
    }
}

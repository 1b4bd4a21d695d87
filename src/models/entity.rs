//! # Entity Catalogue
//!
//! The closed set of entity kinds stored by Metecho, the tables backing them and
//! the foreign-key relations declared between them. The purge dependency graph is
//! built from [`RELATIONS`] rather than from a hand-maintained sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every entity kind known to the data layer.
///
/// Variant order is the declaration order used to break ties when the
/// dependency graph is sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    ScratchOrg,
    TaskSlug,
    Task,
    EpicSlug,
    Epic,
    #[serde(rename = "github_repository")]
    GitHubRepository,
    RepositorySlug,
    Repository,
    User,
    SocialAccount,
}

/// A foreign key from `from` (the referencing entity) to `to` (the referenced one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation {
    pub from: EntityKind,
    pub to: EntityKind,
    pub column: &'static str,
}

impl Relation {
    pub const fn new(from: EntityKind, to: EntityKind, column: &'static str) -> Self {
        Self { from, to, column }
    }
}

/// Foreign keys as declared in `migrations/`. None of them cascade.
pub const RELATIONS: &[Relation] = &[
    Relation::new(EntityKind::ScratchOrg, EntityKind::Task, "task_id"),
    Relation::new(EntityKind::ScratchOrg, EntityKind::User, "owner_id"),
    Relation::new(EntityKind::TaskSlug, EntityKind::Task, "parent_id"),
    Relation::new(EntityKind::Task, EntityKind::Epic, "epic_id"),
    Relation::new(EntityKind::EpicSlug, EntityKind::Epic, "parent_id"),
    Relation::new(EntityKind::Epic, EntityKind::Repository, "repository_id"),
    Relation::new(EntityKind::GitHubRepository, EntityKind::Repository, "repository_id"),
    Relation::new(EntityKind::GitHubRepository, EntityKind::User, "user_id"),
    Relation::new(EntityKind::RepositorySlug, EntityKind::Repository, "parent_id"),
    Relation::new(EntityKind::SocialAccount, EntityKind::User, "user_id"),
];

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        EntityKind::ScratchOrg,
        EntityKind::TaskSlug,
        EntityKind::Task,
        EntityKind::EpicSlug,
        EntityKind::Epic,
        EntityKind::GitHubRepository,
        EntityKind::RepositorySlug,
        EntityKind::Repository,
        EntityKind::User,
        EntityKind::SocialAccount,
    ];

    /// Backing table name.
    pub const fn table_name(self) -> &'static str {
        match self {
            EntityKind::ScratchOrg => "api_scratchorg",
            EntityKind::TaskSlug => "api_taskslug",
            EntityKind::Task => "api_task",
            EntityKind::EpicSlug => "api_epicslug",
            EntityKind::Epic => "api_epic",
            EntityKind::GitHubRepository => "api_githubrepository",
            EntityKind::RepositorySlug => "api_repositoryslug",
            EntityKind::Repository => "api_repository",
            EntityKind::User => "api_user",
            EntityKind::SocialAccount => "socialaccount_socialaccount",
        }
    }

    /// Whether rows of this kind are removed by the data purge. Users and their
    /// social-login accounts are always preserved.
    pub const fn is_purgeable(self) -> bool {
        !matches!(self, EntityKind::User | EntityKind::SocialAccount)
    }

    /// Whether the kind carries a `deleted_at` tombstone, and therefore supports a
    /// permanent removal distinct from its standard (soft) removal.
    pub const fn supports_hard_delete(self) -> bool {
        matches!(
            self,
            EntityKind::Repository | EntityKind::Epic | EntityKind::Task | EntityKind::ScratchOrg
        )
    }

    /// Slug kinds hold historical names of a parent entity.
    pub const fn slug_parent(self) -> Option<EntityKind> {
        match self {
            EntityKind::RepositorySlug => Some(EntityKind::Repository),
            EntityKind::EpicSlug => Some(EntityKind::Epic),
            EntityKind::TaskSlug => Some(EntityKind::Task),
            _ => None,
        }
    }

    /// Relations where this kind is the referencing side.
    pub fn references(self) -> impl Iterator<Item = &'static Relation> {
        RELATIONS.iter().filter(move |r| r.from == self)
    }

    /// Relations where this kind is the referenced side.
    pub fn referenced_by(self) -> impl Iterator<Item = &'static Relation> {
        RELATIONS.iter().filter(move |r| r.to == self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::ScratchOrg => "ScratchOrg",
            EntityKind::TaskSlug => "TaskSlug",
            EntityKind::Task => "Task",
            EntityKind::EpicSlug => "EpicSlug",
            EntityKind::Epic => "Epic",
            EntityKind::GitHubRepository => "GitHubRepository",
            EntityKind::RepositorySlug => "RepositorySlug",
            EntityKind::Repository => "Repository",
            EntityKind::User => "User",
            EntityKind::SocialAccount => "SocialAccount",
        };
        f.write_str(name)
    }
}

/// Nullable timestamp column marking a soft-deleted row.
pub const TOMBSTONE_COLUMN: &str = "deleted_at";

/// Marker for model types whose standard removal only sets a tombstone.
///
/// Implemented exactly by the models of kinds for which
/// [`EntityKind::supports_hard_delete`] holds.
pub trait SoftDeletable {
    const KIND: EntityKind;
    const TOMBSTONE_COLUMN: &'static str = TOMBSTONE_COLUMN;
}

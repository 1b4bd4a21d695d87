use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::models::entity::EntityKind;

/// A user's access link to a repository on GitHub.
/// Maps to `api_githubrepository`; `repo_id` is GitHub's numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GitHubRepository {
    pub id: i64,
    pub repository_id: i64,
    pub user_id: i64,
    pub url: String,
    pub repo_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGitHubRepository {
    pub repository_id: i64,
    pub user_id: i64,
    pub url: String,
    pub repo_id: i64,
}

impl GitHubRepository {
    pub async fn create(
        pool: &PgPool,
        new_link: NewGitHubRepository,
    ) -> Result<GitHubRepository, sqlx::Error> {
        sqlx::query_as::<_, GitHubRepository>(
            r#"
            INSERT INTO api_githubrepository (repository_id, user_id, url, repo_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, repository_id, user_id, url, repo_id
            "#,
        )
        .bind(new_link.repository_id)
        .bind(new_link.user_id)
        .bind(new_link.url)
        .bind(new_link.repo_id)
        .fetch_one(pool)
        .await
    }

    /// Links visible to a user
    pub async fn for_user(pool: &PgPool, user_id: i64) -> Result<Vec<GitHubRepository>, sqlx::Error> {
        sqlx::query_as::<_, GitHubRepository>(
            r#"
            SELECT id, repository_id, user_id, url, repo_id
            FROM api_githubrepository
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<u64, sqlx::Error> {
        super::count_rows(pool, EntityKind::GitHubRepository).await
    }
}

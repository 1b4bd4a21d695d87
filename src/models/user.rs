use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::models::entity::EntityKind;

/// User account. Maps to `api_user`. Never removed by the data purge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl User {
    pub async fn create(pool: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO api_user (username, email, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id, username, email, created_at
            "#,
        )
        .bind(new_user.username)
        .bind(new_user.email)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at FROM api_user WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<u64, sqlx::Error> {
        super::count_rows(pool, EntityKind::User).await
    }
}

/// Social-login link for a user. Maps to `socialaccount_socialaccount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SocialAccount {
    pub id: i64,
    pub user_id: i64,
    pub provider: String,
    pub uid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSocialAccount {
    pub user_id: i64,
    pub provider: String,
    pub uid: String,
}

impl SocialAccount {
    pub async fn create(
        pool: &PgPool,
        new_account: NewSocialAccount,
    ) -> Result<SocialAccount, sqlx::Error> {
        sqlx::query_as::<_, SocialAccount>(
            r#"
            INSERT INTO socialaccount_socialaccount (user_id, provider, uid)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, provider, uid
            "#,
        )
        .bind(new_account.user_id)
        .bind(new_account.provider)
        .bind(new_account.uid)
        .fetch_one(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<u64, sqlx::Error> {
        super::count_rows(pool, EntityKind::SocialAccount).await
    }
}

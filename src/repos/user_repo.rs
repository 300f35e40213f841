/*
 * Responsibility
 * - Credential store: users table (username + argon2 PHC hash)
 * - Username uniqueness is the unique index's job; violations come back as RepoError::Conflict
 */
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::with_timeout;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Persist a new user. Returns the store-assigned id.
    async fn create(&self, username: &str, password_hash: &str) -> RepoResult<Uuid>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
    op_timeout: Duration,
}

impl PgUserRepo {
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(&self, username: &str, password_hash: &str) -> RepoResult<Uuid> {
        let query = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool);

        with_timeout("users.create", self.op_timeout, query).await
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool);

        with_timeout("users.find_by_username", self.op_timeout, query).await
    }
}

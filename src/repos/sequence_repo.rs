/*
 * Responsibility
 * - Per-key monotonically increasing ids (counters table)
 * - Increment-and-fetch is ONE statement: concurrent callers never see the same value
 */
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::error::RepoResult;
use crate::repos::with_timeout;

/// Counter key used for task list ids.
pub const TASK_LIST_SEQUENCE: &str = "task_list_id";

#[async_trait]
pub trait SequenceRepo: Send + Sync {
    /// Atomically bump `key` and return the new value. A fresh key yields 1.
    async fn next(&self, key: &str) -> RepoResult<i64>;
}

#[derive(Clone, Debug)]
pub struct PgSequenceRepo {
    pool: PgPool,
    op_timeout: Duration,
}

impl PgSequenceRepo {
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }
}

#[async_trait]
impl SequenceRepo for PgSequenceRepo {
    async fn next(&self, key: &str) -> RepoResult<i64> {
        // upsert: missing row is created at 1, existing row is incremented under its row lock
        let query = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO counters (key, seq)
            VALUES ($1, 1)
            ON CONFLICT (key) DO UPDATE
                SET seq = counters.seq + 1
            RETURNING seq
            "#,
        )
        .bind(key)
        .fetch_one(&self.pool);

        with_timeout("counters.next", self.op_timeout, query).await
    }
}

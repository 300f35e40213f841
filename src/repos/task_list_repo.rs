/*
 * Responsibility
 * - task_lists CRUD, always filtered by (owner_id, id)
 * - id comes from the sequence repo, then the row is inserted (two steps, gaps are fine)
 * - get -> Option, update/delete -> bool; the service turns "nothing matched" into NotFound
 */
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::sequence_repo::{SequenceRepo, TASK_LIST_SEQUENCE};
use crate::repos::with_timeout;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TaskListRow {
    pub id: i64,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskList {
    pub title: String,
    pub description: String,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskListPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TaskListPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[async_trait]
pub trait TaskListRepo: Send + Sync {
    async fn create(&self, owner_id: Uuid, list: NewTaskList) -> RepoResult<i64>;
    async fn list(&self, owner_id: Uuid) -> RepoResult<Vec<TaskListRow>>;
    async fn get(&self, owner_id: Uuid, id: i64) -> RepoResult<Option<TaskListRow>>;
    async fn update(&self, owner_id: Uuid, id: i64, patch: TaskListPatch) -> RepoResult<bool>;
    async fn delete(&self, owner_id: Uuid, id: i64) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct PgTaskListRepo {
    pool: PgPool,
    sequences: Arc<dyn SequenceRepo>,
    op_timeout: Duration,
}

impl std::fmt::Debug for PgTaskListRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTaskListRepo")
            .field("op_timeout", &self.op_timeout)
            .finish()
    }
}

impl PgTaskListRepo {
    pub fn new(pool: PgPool, sequences: Arc<dyn SequenceRepo>, op_timeout: Duration) -> Self {
        Self {
            pool,
            sequences,
            op_timeout,
        }
    }
}

#[async_trait]
impl TaskListRepo for PgTaskListRepo {
    async fn create(&self, owner_id: Uuid, list: NewTaskList) -> RepoResult<i64> {
        let id = self.sequences.next(TASK_LIST_SEQUENCE).await?;

        let query = sqlx::query(
            r#"
            INSERT INTO task_lists (id, owner_id, title, description)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&list.title)
        .bind(&list.description)
        .execute(&self.pool);

        with_timeout("task_lists.create", self.op_timeout, query).await?;

        Ok(id)
    }

    async fn list(&self, owner_id: Uuid) -> RepoResult<Vec<TaskListRow>> {
        let query = sqlx::query_as::<_, TaskListRow>(
            r#"
            SELECT id, owner_id, title, description
            FROM task_lists
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool);

        with_timeout("task_lists.list", self.op_timeout, query).await
    }

    async fn get(&self, owner_id: Uuid, id: i64) -> RepoResult<Option<TaskListRow>> {
        let query = sqlx::query_as::<_, TaskListRow>(
            r#"
            SELECT id, owner_id, title, description
            FROM task_lists
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool);

        with_timeout("task_lists.get", self.op_timeout, query).await
    }

    async fn update(&self, owner_id: Uuid, id: i64, patch: TaskListPatch) -> RepoResult<bool> {
        let query = sqlx::query(
            r#"
            UPDATE task_lists
            SET
                title = COALESCE($3, title),
                description = COALESCE($4, description)
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .execute(&self.pool);

        let result = with_timeout("task_lists.update", self.op_timeout, query).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, owner_id: Uuid, id: i64) -> RepoResult<bool> {
        let query = sqlx::query(
            r#"
            DELETE FROM task_lists
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner_id)
        .bind(id)
        .execute(&self.pool);

        let result = with_timeout("task_lists.delete", self.op_timeout, query).await?;

        Ok(result.rows_affected() > 0)
    }
}

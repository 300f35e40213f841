/*
 * Responsibility
 * - Storage capabilities (traits) the services depend on
 * - Postgres pool bootstrap + the per-call deadline helper shared by every repo
 */
use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::repos::error::{RepoError, RepoResult};

pub mod error;
pub mod sequence_repo;
pub mod task_list_repo;
pub mod user_repo;

#[cfg(test)]
pub mod memory;

pub use sequence_repo::PgSequenceRepo;
pub use task_list_repo::{NewTaskList, PgTaskListRepo, TaskListPatch, TaskListRepo, TaskListRow};
pub use user_repo::{PgUserRepo, UserRepo};

/// Open the pool and make sure the database actually answers before we serve traffic.
pub async fn connect(config: &Config) -> RepoResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_connect_timeout)
        .connect(&config.database_url)
        .await
        .map_err(|e| RepoError::from_sqlx("pool.connect", e))?;

    with_timeout("pool.ping", config.db_connect_timeout, async {
        sqlx::query("SELECT 1").execute(&pool).await.map(|_| ())
    })
    .await?;

    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Bound a single store call.
/// Elapsed deadline -> `RepoError::Timeout`, driver error -> tagged with `op`.
pub async fn with_timeout<T, F>(op: &'static str, limit: Duration, fut: F) -> RepoResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res.map_err(|e| RepoError::from_sqlx(op, e)),
        Err(_) => Err(RepoError::Timeout { op }),
    }
}

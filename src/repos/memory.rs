//! In-memory repos for tests. Same contracts as the Postgres ones.
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::sequence_repo::{SequenceRepo, TASK_LIST_SEQUENCE};
use crate::repos::task_list_repo::{NewTaskList, TaskListPatch, TaskListRepo, TaskListRow};
use crate::repos::user_repo::{UserRepo, UserRow};

#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<HashMap<String, UserRow>>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(&self, username: &str, password_hash: &str) -> RepoResult<Uuid> {
        let mut users = self.users.lock().await;
        if users.contains_key(username) {
            return Err(RepoError::Conflict { op: "users.create" });
        }
        let id = Uuid::new_v4();
        users.insert(
            username.to_string(),
            UserRow {
                id,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        Ok(self.users.lock().await.get(username).cloned())
    }
}

#[derive(Default)]
pub struct MemorySequenceRepo {
    counters: Mutex<HashMap<String, i64>>,
}

impl MemorySequenceRepo {
    pub async fn current(&self, key: &str) -> i64 {
        self.counters.lock().await.get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl SequenceRepo for MemorySequenceRepo {
    async fn next(&self, key: &str) -> RepoResult<i64> {
        let mut counters = self.counters.lock().await;
        let seq = counters.entry(key.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

pub struct MemoryTaskListRepo {
    sequences: Arc<dyn SequenceRepo>,
    rows: Mutex<BTreeMap<i64, TaskListRow>>,
}

impl MemoryTaskListRepo {
    pub fn new(sequences: Arc<dyn SequenceRepo>) -> Self {
        Self {
            sequences,
            rows: Mutex::new(BTreeMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }
}

#[async_trait]
impl TaskListRepo for MemoryTaskListRepo {
    async fn create(&self, owner_id: Uuid, list: NewTaskList) -> RepoResult<i64> {
        let id = self.sequences.next(TASK_LIST_SEQUENCE).await?;
        self.rows.lock().await.insert(
            id,
            TaskListRow {
                id,
                owner_id,
                title: list.title,
                description: list.description,
            },
        );
        Ok(id)
    }

    async fn list(&self, owner_id: Uuid) -> RepoResult<Vec<TaskListRow>> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|row| row.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, owner_id: Uuid, id: i64) -> RepoResult<Option<TaskListRow>> {
        Ok(self
            .rows
            .lock()
            .await
            .get(&id)
            .filter(|row| row.owner_id == owner_id)
            .cloned())
    }

    async fn update(&self, owner_id: Uuid, id: i64, patch: TaskListPatch) -> RepoResult<bool> {
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.get_mut(&id).filter(|row| row.owner_id == owner_id) else {
            return Ok(false);
        };
        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        Ok(true)
    }

    async fn delete(&self, owner_id: Uuid, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.lock().await;
        match rows.get(&id) {
            Some(row) if row.owner_id == owner_id => {
                rows.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// A sequence repo whose backend is always down.
pub struct FailingSequenceRepo;

#[async_trait]
impl SequenceRepo for FailingSequenceRepo {
    async fn next(&self, _key: &str) -> RepoResult<i64> {
        Err(RepoError::Timeout { op: "counters.next" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_value_for_a_new_key_is_one() {
        let seq = MemorySequenceRepo::default();
        assert_eq!(seq.next("a").await.unwrap(), 1);
        assert_eq!(seq.next("a").await.unwrap(), 2);
        assert_eq!(seq.next("b").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let users = MemoryUserRepo::default();
        users.create("alice123", "hash").await.unwrap();
        let err = users.create("alice123", "hash").await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict { .. }));

        let row = users.find_by_username("alice123").await.unwrap().unwrap();
        assert_eq!(row.username, "alice123");
    }
}

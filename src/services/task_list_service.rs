/*
 * Responsibility
 * - Business rules for task lists (non-empty title, something to update, positive id)
 * - Rules are checked BEFORE the repo is touched: a rejected create never consumes an id
 * - "nothing matched" from the repo becomes NotFound (not yours == does not exist)
 */
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::{NewTaskList, TaskListPatch, TaskListRepo, TaskListRow};

const TASK_LIST: &str = "task list";

/// An owner with zero task lists gets NotFound instead of an empty collection.
/// Flip this to return `[]`.
const EMPTY_LIST_IS_NOT_FOUND: bool = true;

#[derive(Clone)]
pub struct TaskListService {
    repo: Arc<dyn TaskListRepo>,
}

impl TaskListService {
    pub fn new(repo: Arc<dyn TaskListRepo>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, owner_id: Uuid, list: NewTaskList) -> Result<i64, AppError> {
        validate_create(&list)?;

        let id = self.repo.create(owner_id, list).await?;

        info!(user_id = %owner_id, task_list_id = id, "task list created");
        Ok(id)
    }

    pub async fn get_all(&self, owner_id: Uuid) -> Result<Vec<TaskListRow>, AppError> {
        let rows = self.repo.list(owner_id).await?;

        if EMPTY_LIST_IS_NOT_FOUND && rows.is_empty() {
            return Err(AppError::NotFound(TASK_LIST));
        }
        Ok(rows)
    }

    pub async fn get_by_id(&self, owner_id: Uuid, id: i64) -> Result<TaskListRow, AppError> {
        self.repo
            .get(owner_id, id)
            .await?
            .ok_or(AppError::NotFound(TASK_LIST))
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        id: i64,
        patch: TaskListPatch,
    ) -> Result<(), AppError> {
        validate_update(&patch)?;

        if !self.repo.update(owner_id, id, patch).await? {
            return Err(AppError::NotFound(TASK_LIST));
        }

        info!(user_id = %owner_id, task_list_id = id, "task list updated");
        Ok(())
    }

    pub async fn delete(&self, owner_id: Uuid, id: i64) -> Result<(), AppError> {
        validate_list_id(id)?;

        if !self.repo.delete(owner_id, id).await? {
            return Err(AppError::NotFound(TASK_LIST));
        }

        info!(user_id = %owner_id, task_list_id = id, "task list deleted");
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("task list name cannot be empty"));
    }
    Ok(())
}

fn validate_create(list: &NewTaskList) -> Result<(), AppError> {
    validate_title(&list.title)
}

fn validate_update(patch: &TaskListPatch) -> Result<(), AppError> {
    if patch.is_empty() {
        return Err(AppError::validation("no fields to update"));
    }
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    Ok(())
}

fn validate_list_id(id: i64) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::validation("invalid task list ID"));
    }
    Ok(())
}

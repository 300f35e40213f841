/*
 * Responsibility
 * - Task list request/response DTOs
 * - Conversion into the repo input types (NewTaskList / TaskListPatch)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{NewTaskList, TaskListPatch, TaskListRow};

#[derive(Debug, Deserialize)]
pub struct CreateTaskListRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateTaskListRequest> for NewTaskList {
    fn from(req: CreateTaskListRequest) -> Self {
        NewTaskList {
            title: req.title,
            description: req.description.unwrap_or_default(),
        }
    }
}

/// Partial update: absent (or null) fields are left as they are.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskListRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateTaskListRequest> for TaskListPatch {
    fn from(req: UpdateTaskListRequest) -> Self {
        TaskListPatch {
            title: req.title,
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
}

impl From<TaskListRow> for TaskListResponse {
    fn from(row: TaskListRow) -> Self {
        TaskListResponse {
            id: row.id,
            user_id: row.owner_id,
            title: row.title,
            description: row.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskListsResponse {
    pub data: Vec<TaskListResponse>,
}

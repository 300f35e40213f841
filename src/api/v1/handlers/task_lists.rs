/*
 * Responsibility
 * - /tasks CRUD handlers
 * - The caller comes from AuthCtxExtractor (set by the identity middleware), never from the body
 * - {id} is parsed by the ListId extractor
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::{
            StatusResponse,
            task_lists::{
                CreateTaskListRequest, CreatedResponse, TaskListResponse, TaskListsResponse,
                UpdateTaskListRequest,
            },
        },
        extractors::{AuthCtxExtractor, JsonBody, ListId},
    },
    error::AppError,
    state::AppState,
};

pub async fn create_task_list(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<CreateTaskListRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    let id = state.task_lists.create(ctx.user_id, req.into()).await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn list_task_lists(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<TaskListsResponse>, AppError> {
    let rows = state.task_lists.get_all(ctx.user_id).await?;
    Ok(Json(TaskListsResponse {
        data: rows.into_iter().map(TaskListResponse::from).collect(),
    }))
}

pub async fn get_task_list(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ListId(id): ListId,
) -> Result<Json<TaskListResponse>, AppError> {
    let row = state.task_lists.get_by_id(ctx.user_id, id).await?;
    Ok(Json(row.into()))
}

pub async fn update_task_list(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ListId(id): ListId,
    JsonBody(req): JsonBody<UpdateTaskListRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .task_lists
        .update(ctx.user_id, id, req.into())
        .await?;
    Ok(Json(StatusResponse::ok()))
}

pub async fn delete_task_list(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    ListId(id): ListId,
) -> Result<Json<StatusResponse>, AppError> {
    state.task_lists.delete(ctx.user_id, id).await?;
    Ok(Json(StatusResponse::ok()))
}

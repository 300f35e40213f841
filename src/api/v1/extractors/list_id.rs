/*
 * Responsibility
 * - Take the `{id}` path segment and turn it into a task list id (i64)
 * - Anything that is not an integer is a 400 before the handler runs
 * - Range rules (id > 0) belong to the service, not here
 */
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListId(pub i64);

fn parse_list_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation("invalid task list ID"))
}

impl FromRequestParts<AppState> for ListId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("invalid task list ID"))?;
        parse_list_id(&raw).map(ListId)
    }
}

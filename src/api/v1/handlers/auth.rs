/*
 * Responsibility
 * - POST /auth/register, POST /auth/login
 * - Thin: DTO in -> AuthService -> DTO out
 */
use axum::{Json, extract::State};
use tracing::info;

use crate::{
    api::v1::{
        dto::auth::{CredentialsRequest, RegisterResponse, TokenResponse},
        extractors::JsonBody,
    },
    error::AppError,
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    info!(username = %req.username, "registering user");

    let id = state.auth.register(&req.username, &req.password).await?;

    Ok(Json(RegisterResponse { id }))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    info!(username = %req.username, "login attempt");

    let issued = state.auth.login(&req.username, &req.password).await?;

    Ok(Json(TokenResponse {
        token: issued.token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
    }))
}

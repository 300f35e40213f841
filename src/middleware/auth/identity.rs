//! Bearer token -> AuthCtx in request extensions.
//!
//! - `Authorization: Bearer <token>`: exactly two space-separated parts.
//! - Any failure short-circuits with 401; the handler never runs.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Put the identity check in front of every route of `router`.
///
/// Uses `route_layer` so unmatched paths still 404 instead of 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // from_fn cannot take a State extractor in axum 0.8, hence from_fn_with_state
    router.route_layer(middleware::from_fn_with_state(state, identity_middleware))
}

async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::Unauthorized("no authorization header provided"))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("invalid authorization header"))?;

    let token = bearer_token(header_value)?;

    let user_id = state.auth.verify_token(token)?;

    // middleware -> extractor
    req.extensions_mut().insert(AuthCtx::new(user_id));

    Ok(next.run(req).await)
}

fn bearer_token(header_value: &str) -> Result<&str, AppError> {
    let parts: Vec<&str> = header_value.split(' ').collect();
    let [scheme, token] = parts.as_slice() else {
        return Err(AppError::Unauthorized("invalid authorization header"));
    };
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.is_empty() {
        return Err(AppError::Unauthorized("invalid authorization header"));
    }
    Ok(*token)
}

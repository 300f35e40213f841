/*
 * Responsibility
 * - v1 URL layout
 * - health and auth routes are public; task routes sit behind the identity middleware
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth::identity;
use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, register},
    health::health,
    task_lists::{
        create_task_list, delete_task_list, get_task_list, list_task_lists, update_task_list,
    },
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let protected = Router::new()
        .route("/tasks", get(list_task_lists).post(create_task_list))
        .route(
            "/tasks/{id}",
            get(get_task_list)
                .put(update_task_list)
                .delete(delete_task_list),
        );

    public.merge(identity::apply(protected, state))
}

/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone-friendly: everything inside is Arc
 */
use std::sync::Arc;

use crate::services::{AuthService, TaskListService};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub task_lists: Arc<TaskListService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, task_lists: Arc<TaskListService>) -> Self {
        Self { auth, task_lists }
    }
}

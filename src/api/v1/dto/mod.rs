pub mod auth;
pub mod task_lists;

use serde::Serialize;

/// `{"status": "ok"}` for operations with nothing else to return.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

pub mod auth;
pub mod task_list_service;

pub use auth::AuthService;
pub use task_list_service::TaskListService;

pub mod auth_service;
pub mod credentials;
pub mod jwt;
pub mod password;

pub use auth_service::AuthService;
pub use jwt::TokenSigner;
pub use password::PasswordService;

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::repos::UserRepo;
use crate::repos::error::RepoError;
use crate::services::auth::credentials::validate_user;
use crate::services::auth::jwt::{IssuedToken, TokenSigner};
use crate::services::auth::password::PasswordService;

const INVALID_CREDENTIALS: &str = "invalid credentials";
const INVALID_TOKEN: &str = "invalid or expired token";

/// Registration, login and bearer-token verification.
///
/// - UserRepo persists credentials (username is unique there).
/// - PasswordService hashes/verifies (argon2id, off the async workers).
/// - TokenSigner issues/verifies stateless HS256 tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepo>,
    passwords: PasswordService,
    tokens: TokenSigner,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("passwords", &self.passwords)
            .field("tokens", &self.tokens)
            .finish()
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepo>, passwords: PasswordService, tokens: TokenSigner) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Validate the format, hash the password and store the user. Returns the new user id.
    pub async fn register(&self, username: &str, password: &str) -> Result<Uuid, AppError> {
        validate_user(username, password)?;

        let password_hash = self.passwords.hash_blocking(password.to_owned()).await?;

        let user_id = self
            .users
            .create(username, &password_hash)
            .await
            .map_err(|e| match e {
                RepoError::Conflict { .. } => AppError::Conflict("username already exists".into()),
                other => other.into(),
            })?;

        info!(user_id = %user_id, "user registered");
        Ok(user_id)
    }

    /// Check the credentials and issue a token valid for the configured TTL.
    ///
    /// Unknown user and wrong password produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized(INVALID_CREDENTIALS))?;

        let matches = self
            .passwords
            .verify_blocking(user.password_hash, password.to_owned())
            .await?;
        if !matches {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS));
        }

        let issued = self
            .tokens
            .issue(user.id)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        info!(
            user_id = %user.id,
            username = %user.username,
            expires_at = %issued.expires_at,
            "user logged in"
        );
        Ok(issued)
    }

    /// Resolve a bearer token to its user id.
    ///
    /// Every rejection reason collapses into one 401; the caller logs it once.
    pub fn verify_token(&self, token: &str) -> Result<Uuid, AppError> {
        self.tokens
            .verify(token)
            .map_err(|_| AppError::Unauthorized(INVALID_TOKEN))
    }
}

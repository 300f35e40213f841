//! argon2id password hashing.
//!
//! Hashes are PHC strings (algorithm, params and salt travel with the hash), so the
//! cost can be raised later without breaking existing users.
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::error;

use crate::config::PasswordHashCost;
use crate::error::AppError;

#[derive(Clone)]
pub struct PasswordService {
    params: Params,
}

impl std::fmt::Debug for PasswordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordService")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

impl PasswordService {
    pub fn new(cost: PasswordHashCost) -> Result<Self, AppError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| AppError::Internal(format!("invalid argon2 params: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| {
                error!(error = %e, "password hashing failed");
                AppError::Internal("password hashing failed".into())
            })
    }

    /// `Ok(false)` on mismatch. The comparison inside argon2 is constant-time.
    pub fn verify(&self, password_hash: &str, password: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(password_hash).map_err(|e| {
            error!(error = %e, "stored password hash is not a valid PHC string");
            AppError::Internal("invalid stored password hash".into())
        })?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => {
                error!(error = %e, "password verification failed");
                Err(AppError::Internal("password verification failed".into()))
            }
        }
    }

    // The two helpers below keep argon2 off the async workers.

    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
    }

    pub async fn verify_blocking(
        &self,
        password_hash: String,
        password: String,
    ) -> Result<bool, AppError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.verify(&password_hash, &password))
            .await
            .map_err(|e| AppError::Internal(format!("verification task failed: {e}")))?
    }
}

#[cfg(test)]
pub(crate) fn cheap_cost() -> PasswordHashCost {
    PasswordHashCost {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

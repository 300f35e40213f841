/**
 * Responsibility
 * - What the repo layer tells the layers above (which operation failed and how)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{op}: db error")]
    Db {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("{op}: timed out")]
    Timeout { op: &'static str },
    #[error("{op}: conflict")]
    Conflict { op: &'static str },
}

impl RepoError {
    /// Give meaning to driver errors: unique violations become `Conflict`.
    pub fn from_sqlx(op: &'static str, e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return RepoError::Conflict { op };
        }
        RepoError::Db { op, source: e }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

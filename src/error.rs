/*
 * Responsibility
 * - The app-wide error taxonomy (validation / auth / conflict / not found / backend)
 * - IntoResponse: HTTP status + JSON error body, and the one log line per failed request
 * - Driver details are logged, never returned to the client
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-policy input. Never retried.
    #[error("{0}")]
    Validation(String),

    /// Bad credentials, or a missing/invalid/expired token.
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Conflict(String),

    /// Also used for records owned by someone else.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{op}: timed out")]
    Timeout { op: &'static str },

    #[error("{op}: storage failure: {detail}")]
    Storage { op: &'static str, detail: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout { .. }
            | AppError::Storage { .. }
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Timeouts and backend failures may succeed on retry; everything else will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Timeout { .. } | AppError::Storage { .. })
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Conflict(_) => "CONFLICT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Timeout { .. } => "TIMEOUT",
            AppError::Storage { .. } => "STORAGE_ERROR",
            AppError::Config(_) | AppError::Internal(_) => "INTERNAL",
        }
    }

    /// What the client gets to see.
    fn public_message(&self) -> String {
        match self {
            AppError::Validation(_)
            | AppError::Unauthorized(_)
            | AppError::Conflict(_)
            | AppError::NotFound(_) => self.to_string(),
            AppError::Timeout { .. } => "service temporarily unavailable, retry later".into(),
            AppError::Storage { .. } | AppError::Config(_) | AppError::Internal(_) => {
                "internal server error".into()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                code = self.code(),
                retryable = self.is_retryable(),
                error = %self,
                "request failed"
            );
        } else {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.public_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Timeout { op } => AppError::Timeout { op },
            RepoError::Conflict { .. } => AppError::Conflict("resource already exists".into()),
            RepoError::Db { op, source } => AppError::Storage {
                op,
                detail: source.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("invalid request body: {}", rejection.body_text()))
    }
}

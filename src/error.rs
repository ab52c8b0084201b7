use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

use crate::services::hierarchy::MAX_NESTING_DEPTH;

/// Unified application error type that maps to JSON HTTP responses.
///
/// Error format: `{ "error": { "code": "...", "message": "...", "detail": "..." } }`.
/// `detail` is only present for hierarchy violations.
#[derive(Debug)]
pub enum AppError {
    /// 400 Bad Request: malformed input or a broken registration rule
    BadRequest(String),
    /// 400 Bad Request: the tournament tree would become invalid
    InvalidHierarchy(HierarchyViolation),
    /// 404 Not Found
    NotFound(String),
    /// 409 Conflict
    Conflict(String),
    /// 500 Internal Server Error (wraps any error, logs details, returns generic message
    /// unless the error carries operation context)
    Internal(anyhow::Error),
}

/// The ways a create or reparent request can break the tournament tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyViolation {
    SelfParent,
    Cycle { parent: String },
    UnknownParent { parent: String },
    NestingTooDeep,
}

impl HierarchyViolation {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SelfParent => "SELF_PARENT",
            Self::Cycle { .. } => "CYCLE",
            Self::UnknownParent { .. } => "UNKNOWN_PARENT",
            Self::NestingTooDeep => "NESTING_DEPTH_EXCEEDED",
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::NestingTooDeep => "Maximum tournament nesting depth exceeded",
            _ => "Invalid tournament hierarchy",
        }
    }

    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::SelfParent => "A tournament cannot be its own parent".to_string(),
            Self::Cycle { parent } => {
                format!("Tournament '{parent}' is a sub-tournament of this tournament")
            }
            Self::UnknownParent { parent } => {
                format!("Parent tournament '{parent}' does not exist")
            }
            Self::NestingTooDeep => format!(
                "Tournaments can only be nested up to {MAX_NESTING_DEPTH} levels deep \
                 (parent-child-child-child-child)"
            ),
        }
    }
}

impl AppError {
    /// Map a database error, turning unique-key violations into `Conflict`.
    ///
    /// Used where a concurrent request may have inserted the same key between
    /// our existence check and our insert.
    pub fn from_db(err: DbErr, conflict_message: impl Into<String>) -> Self {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            Self::Conflict(conflict_message.into())
        } else {
            Self::Internal(err.into())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "code": "BAD_REQUEST", "message": msg }),
            ),
            Self::InvalidHierarchy(violation) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "code": violation.code(),
                    "message": violation.title(),
                    "detail": violation.detail(),
                }),
            ),
            Self::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "code": "NOT_FOUND", "message": msg }),
            ),
            Self::Conflict(msg) => (
                StatusCode::CONFLICT,
                json!({ "code": "CONFLICT", "message": msg }),
            ),
            Self::Internal(err) => {
                tracing::error!("Internal server error: {err:#}");
                // Errors with attached context name the failed operation; bare ones stay generic.
                let message = if err.chain().count() > 1 {
                    err.to_string()
                } else {
                    "An internal error occurred".to_string()
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "code": "INTERNAL_ERROR", "message": message }),
                )
            }
        };

        (status, Json(json!({ "error": body }))).into_response()
    }
}

impl From<HierarchyViolation> for AppError {
    fn from(violation: HierarchyViolation) -> Self {
        Self::InvalidHierarchy(violation)
    }
}

/// Allow `?` to automatically convert any `anyhow::Error`-compatible error into `AppError::Internal`.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

/*
 * Responsibility
 * - App-wide AppError definition
 * - IntoResponse impl (HTTP status / error body)
 * - Unified conversion from auth/scope errors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::scope::ScopeError;

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
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden: {message}")]
    Forbidden { message: String },
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // 401 carries no body: clients get no hint about why the token
            // was rejected (the reason is logged server-side).
            AppError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),

            // 403 carries a plain-text explanation naming the scopes that
            // would have been accepted.
            AppError::Forbidden { message } => {
                (StatusCode::FORBIDDEN, message).into_response()
            }

            AppError::Internal => {
                let body = ErrorResponse {
                    error: ErrorBody {
                        code: "INTERNAL_SERVER_ERROR",
                        message: "internal server error".into(),
                    },
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl From<ScopeError> for AppError {
    fn from(e: ScopeError) -> Self {
        match e {
            // Caller-side programming error (empty acceptance list); never a
            // client-facing authorization verdict.
            ScopeError::MissingAcceptedScopes => AppError::Internal,
            ScopeError::Unauthenticated => AppError::Unauthorized,
            ScopeError::InsufficientScope { .. } => AppError::Forbidden {
                message: e.to_string(),
            },
        }
    }
}

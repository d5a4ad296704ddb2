use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::{StatusCode, request::Parts};

use crate::state::AppState;

use super::AuthCtx;

/// Extractor for receiving an `AuthCtx` in a handler.
/// Assumes the bearer middleware has already inserted `AuthCtx` into
/// `request.extensions()`; if it is missing the route rejects with 401
/// (unauthenticated, or the middleware was not applied).
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

// `Option<AuthCtxExtractor>` never rejects: handlers that run their own
// authorization check (the scope guard) take the principal as optional and
// let the guard decide, so an absent principal surfaces as the guard's
// unauthenticated verdict instead of an extractor rejection.
impl OptionalFromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor))
    }
}
